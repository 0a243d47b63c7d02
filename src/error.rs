//! Error types for the notification relay.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Event error: {0}")]
    Event(#[from] EventError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Inbound event decode errors.
///
/// Unrecognized event types are not errors — the normalizer returns `None`
/// for those. These cover envelopes that matched a known type but are
/// missing or corrupting fields that type requires.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Envelope contains no records")]
    EmptyEnvelope,

    #[error("Failed to decode notification payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Malformed {variant} payload: {reason}")]
    MalformedPayload { variant: &'static str, reason: String },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Outbound mail errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("Invalid address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Mail send failed: {0}")]
    Send(String),
}

/// Result type alias for the relay.
pub type Result<T> = std::result::Result<T, Error>;
