//! Transport-level SNS envelope types.
//!
//! A minimal model of the SNS → Lambda delivery shape, covering only the
//! fields the relay consumes. Everything else in the envelope is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The full event delivered per invocation: a batch of SNS records.
#[derive(Debug, Clone, Deserialize)]
pub struct SnsEnvelope {
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsRecord>,
}

/// One SNS delivery record.
#[derive(Debug, Clone, Deserialize)]
pub struct SnsRecord {
    #[serde(rename = "Sns")]
    pub sns: SnsEntity,
}

/// The SNS payload: a JSON-encoded message plus transport metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct SnsEntity {
    /// JSON-encoded notification body.
    #[serde(rename = "Message")]
    pub message: String,
    /// Publish time, stamped by SNS.
    #[serde(rename = "Timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Subject line; only set on manual-approval notifications.
    #[serde(rename = "Subject", default)]
    pub subject: Option<String>,
}
