//! Port for the publish-only notification channel.

use async_trait::async_trait;

use crate::domain::Notification;

use super::define_port_error;

define_port_error! {
    /// Delivery failures reported by notification adapters.
    pub enum NotificationError {
        /// The channel could not be reached.
        Delivery { message: String } => "notification delivery failed: {message}",
        /// The channel answered but refused the message.
        Rejected { message: String } => "notification rejected: {message}",
    }
}

/// Outbound channel for human-readable event messages.
///
/// Adapters report failures; callers decide whether to surface them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one message.
    async fn publish(&self, notification: &Notification) -> Result<(), NotificationError>;
}
