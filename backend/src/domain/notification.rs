//! Notification messages and the best-effort publisher.
//!
//! Delivery is fire-and-forget: [`Notifier::publish`] never fails. Adapter
//! errors are logged and dropped, with no retry.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::domain::ports::NotificationSink;
use crate::domain::{TrainId, Username};

/// Human-readable event message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    subject: String,
    message: String,
}

impl Notification {
    /// Build a message from raw parts.
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Sent after a successful signup.
    pub fn signup(username: &Username) -> Self {
        Self::new("New Signup", format!("{username} registered."))
    }

    /// Sent after a successful passenger login.
    pub fn login(username: &Username) -> Self {
        Self::new("User Login", format!("{username} logged in."))
    }

    /// Sent after a booking is recorded.
    pub fn booking(username: &Username, train_id: &TrainId) -> Self {
        Self::new("Train Booking", format!("{username} booked train {train_id}"))
    }

    /// Subject line.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Message body.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Wraps a [`NotificationSink`] and swallows its failures.
#[derive(Clone)]
pub struct Notifier {
    sink: Arc<dyn NotificationSink>,
}

impl Notifier {
    /// Wrap a sink.
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Publish `notification`, logging and discarding any delivery error.
    ///
    /// The sink is awaited inline so callers observe a deterministic order of
    /// side effects; adapters bound their own latency with timeouts.
    pub async fn publish(&self, notification: Notification) {
        if let Err(error) = self.sink.publish(&notification).await {
            warn!(
                subject = notification.subject(),
                error = %error,
                "notification dropped"
            );
        }
    }
}
