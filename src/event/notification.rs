//! Canonical notification model — the normalized, strongly-typed shape an
//! inbound event is reduced to, independent of its wire format.

use chrono::{DateTime, Utc};

/// One normalized inbound event. Immutable once constructed; the outbound
/// email is fully determined by it.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Approval(Approval),
    PipelineState(PipelineState),
    StackState(StackState),
}

/// A manual approval action waiting on a reviewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Approval {
    pub pipeline: String,
    /// Review deadline, rendered verbatim.
    pub expires: String,
    pub review_link: String,
    /// Free-form reviewer note attached by the pipeline author.
    pub custom_message: Option<String>,
    pub region: String,
    pub time: DateTime<Utc>,
    /// Transport-supplied subject, passed through to the email verbatim.
    pub subject: String,
}

/// A pipeline execution or action state change.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineState {
    pub pipeline: String,
    pub state: String,
    pub time: DateTime<Utc>,
    pub region: String,
    /// First failed action's detail; set only when `state` is FAILED.
    pub additional_information: Option<String>,
    /// Set only when `state` is FAILED.
    pub failed_stage: Option<String>,
}

/// A CloudFormation stack status change.
#[derive(Debug, Clone, PartialEq)]
pub struct StackState {
    pub stack_id: String,
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub region: String,
    /// Human-readable event type from `detail-type`, used in the subject.
    pub event_type: String,
}
