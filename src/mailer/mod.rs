//! Outbound mail — the `Mailer` seam plus SES and SMTP transports.

pub mod ses;
pub mod smtp;

pub use ses::SesMailer;
pub use smtp::{SmtpConfig, SmtpMailer};

use async_trait::async_trait;

use crate::error::MailError;

/// One fully-rendered outbound email.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub recipient: String,
    pub sender: String,
    pub subject: String,
    pub body: String,
}

/// Mail-sending collaborator. The relay performs exactly one `send` per
/// handled notification; failures propagate to the caller unchanged.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}
