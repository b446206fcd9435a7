//! Notification sink adapters.
//!
//! - [`TracingNotificationSink`] writes each message to the log.
//! - [`WebhookNotificationSink`] POSTs each message as JSON to a fixed URL.

mod tracing_sink;
mod webhook_sink;

pub use tracing_sink::TracingNotificationSink;
pub use webhook_sink::WebhookNotificationSink;
