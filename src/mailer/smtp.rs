//! SMTP transport via lettre — for running the relay outside AWS, pointed
//! at any SMTP relay.

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::error::MailError;
use crate::mailer::{Mailer, OutboundEmail};

/// SMTP connection settings, built from environment variables.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl SmtpConfig {
    /// Build config from environment variables.
    /// Returns `None` if `SMTP_HOST` is not set (transport unavailable).
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;

        let port: u16 = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);

        let username = std::env::var("SMTP_USERNAME").unwrap_or_default();
        let password = std::env::var("SMTP_PASSWORD").unwrap_or_default();

        Some(Self {
            host,
            port,
            username,
            password,
        })
    }
}

/// Mailer backed by an SMTP relay.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let creds = Credentials::new(
            self.config.username.clone(),
            self.config.password.clone(),
        );

        let transport = SmtpTransport::relay(&self.config.host)
            .map_err(|e| MailError::Send(format!("SMTP relay error: {e}")))?
            .port(self.config.port)
            .credentials(creds)
            .build();

        let message = Message::builder()
            .from(email.sender.parse().map_err(|e| MailError::InvalidAddress {
                address: email.sender.clone(),
                reason: format!("{e}"),
            })?)
            .to(email.recipient.parse().map_err(|e| MailError::InvalidAddress {
                address: email.recipient.clone(),
                reason: format!("{e}"),
            })?)
            .subject(&email.subject)
            .body(email.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))?;

        transport
            .send(&message)
            .map_err(|e| MailError::Send(e.to_string()))?;

        tracing::info!(recipient = %email.recipient, "Email sent via SMTP");
        Ok(())
    }
}
