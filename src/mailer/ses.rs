//! SES transport — the default mailer when running in Lambda.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};

use crate::error::MailError;
use crate::mailer::{Mailer, OutboundEmail};

const CHARSET: &str = "UTF-8";

/// Mailer backed by the SES `SendEmail` API.
pub struct SesMailer {
    client: aws_sdk_sesv2::Client,
}

impl SesMailer {
    /// Build a client for the given region, using the environment's default
    /// credential chain.
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_owned()))
            .load()
            .await;
        Self {
            client: aws_sdk_sesv2::Client::new(&config),
        }
    }

    fn content(data: &str) -> Result<Content, MailError> {
        Content::builder()
            .charset(CHARSET)
            .data(data)
            .build()
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let destination = Destination::builder()
            .to_addresses(email.recipient.clone())
            .build();
        let message = Message::builder()
            .subject(Self::content(&email.subject)?)
            .body(Body::builder().text(Self::content(&email.body)?).build())
            .build();
        let content = EmailContent::builder().simple(message).build();

        self.client
            .send_email()
            .from_email_address(email.sender.clone())
            .destination(destination)
            .content(content)
            .send()
            .await
            .map_err(|e| MailError::Send(e.to_string()))?;

        tracing::info!(recipient = %email.recipient, "Email sent via SES");
        Ok(())
    }
}
