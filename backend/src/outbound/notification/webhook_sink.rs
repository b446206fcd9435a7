//! Reqwest-backed webhook notification sink.
//!
//! Each notification becomes one JSON POST of `{topic, subject, message}`.
//! There is no retry; the request timeout bounds how long a publish can take.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;

use crate::domain::Notification;
use crate::domain::ports::{NotificationError, NotificationSink};

const BODY_PREVIEW_LIMIT: usize = 200;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    topic: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// Notification sink that POSTs to a single webhook endpoint.
#[derive(Debug, Clone)]
pub struct WebhookNotificationSink {
    client: Client,
    endpoint: Url,
    topic: String,
}

impl WebhookNotificationSink {
    /// Build a sink with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        topic: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            topic: topic.into(),
        })
    }
}

#[async_trait]
impl NotificationSink for WebhookNotificationSink {
    async fn publish(&self, notification: &Notification) -> Result<(), NotificationError> {
        let payload = WebhookPayload {
            topic: &self.topic,
            subject: notification.subject(),
            message: notification.message(),
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(map_status_error(status, body.as_ref()))
    }
}

fn map_transport_error(error: reqwest::Error) -> NotificationError {
    if error.is_timeout() {
        NotificationError::delivery(format!("timed out: {error}"))
    } else {
        NotificationError::delivery(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> NotificationError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    if status.is_client_error() {
        NotificationError::rejected(message)
    } else {
        NotificationError::delivery(message)
    }
}

fn body_preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .trim()
        .chars()
        .take(BODY_PREVIEW_LIMIT)
        .collect()
}
