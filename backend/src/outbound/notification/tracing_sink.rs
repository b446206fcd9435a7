//! Log-only notification sink used when no webhook is configured.

use async_trait::async_trait;
use tracing::info;

use crate::domain::Notification;
use crate::domain::ports::{NotificationError, NotificationSink};

/// Emits every notification as an `info` event under the configured topic.
#[derive(Debug, Clone)]
pub struct TracingNotificationSink {
    topic: String,
}

impl TracingNotificationSink {
    /// Create a sink that tags events with `topic`.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }
}

#[async_trait]
impl NotificationSink for TracingNotificationSink {
    async fn publish(&self, notification: &Notification) -> Result<(), NotificationError> {
        info!(
            topic = %self.topic,
            subject = notification.subject(),
            message = notification.message(),
            "notification"
        );
        Ok(())
    }
}
