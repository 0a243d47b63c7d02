//! The relay itself: normalize, render, send.

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::error::{EventError, Result};
use crate::event::envelope::SnsEnvelope;
use crate::event::normalize::normalize;
use crate::mailer::{Mailer, OutboundEmail};
use crate::render;

/// What a single invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// One email was sent.
    Sent,
    /// The event type is not handled; nothing was sent.
    Skipped,
}

/// Stateless per-event dispatcher.
pub struct Relay {
    config: RelayConfig,
    mailer: Arc<dyn Mailer>,
}

impl Relay {
    pub fn new(config: RelayConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self { config, mailer }
    }

    /// Handle one inbound envelope, sending at most one email.
    pub async fn handle(&self, envelope: &SnsEnvelope) -> Result<Outcome> {
        let record = envelope
            .records
            .first()
            .ok_or(EventError::EmptyEnvelope)?;

        let Some(notification) = normalize(&record.sns)? else {
            tracing::info!("Event type not handled, skipping");
            return Ok(Outcome::Skipped);
        };

        let email = OutboundEmail {
            recipient: self.config.recipient.clone(),
            sender: self.config.sender.clone(),
            subject: render::subject(&notification),
            body: render::body(&notification),
        };

        tracing::info!(subject = %email.subject, "Sending notification email");
        self.mailer.send(&email).await?;

        Ok(Outcome::Sent)
    }
}
