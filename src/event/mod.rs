//! Inbound event handling — envelope decode and normalization.

pub mod envelope;
pub mod normalize;
pub mod notification;

pub use envelope::{SnsEntity, SnsEnvelope, SnsRecord};
pub use normalize::normalize;
pub use notification::Notification;
