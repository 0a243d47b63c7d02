//! Relay configuration, read once at process start.

use crate::error::ConfigError;

/// Region used when `AWS_REGION` is not set.
pub const DEFAULT_REGION: &str = "ap-northeast-1";

/// Which transport outbound mail goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailTransport {
    /// SES `SendEmail` API (default).
    Ses,
    /// Plain SMTP relay.
    Smtp,
}

impl MailTransport {
    /// Parse a `MAIL_TRANSPORT` value.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "ses" => Ok(Self::Ses),
            "smtp" => Ok(Self::Smtp),
            other => Err(ConfigError::InvalidValue {
                key: "MAIL_TRANSPORT".to_string(),
                message: format!("unknown transport: {other}"),
            }),
        }
    }
}

/// Relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Destination address for every alert.
    pub recipient: String,
    /// Verified sender address.
    pub sender: String,
    /// Region the SES client talks to.
    pub region: String,
    /// Outbound transport.
    pub transport: MailTransport,
}

impl RelayConfig {
    /// Build config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let recipient = require_env("EMAIL_RECIPIENT")?;
        let sender = require_env("EMAIL_SENDER")?;

        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());

        let transport = std::env::var("MAIL_TRANSPORT")
            .ok()
            .map(|v| MailTransport::parse(&v))
            .transpose()?
            .unwrap_or(MailTransport::Ses);

        Ok(Self {
            recipient,
            sender,
            region,
            transport,
        })
    }
}

fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}
