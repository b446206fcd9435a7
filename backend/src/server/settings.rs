//! Process settings loaded via OrthoConfig.
//!
//! Every field may come from a `RAILBOOK_*` environment variable or the
//! matching command-line flag. Unset values fall back to the defaults below.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use railbook::domain::{AdminCredential, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_NOTIFY_TOPIC: &str = "train-booking";
const DEFAULT_NOTIFY_TIMEOUT_MS: u64 = 2_000;

/// Runtime configuration for the booking server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RAILBOOK")]
pub struct RailbookSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Admin login name.
    pub admin_username: Option<String>,
    /// Admin password.
    pub admin_password: Option<String>,
    /// Webhook receiving notifications. Without it notifications are logged.
    pub notify_webhook_url: Option<String>,
    /// Topic attached to every notification.
    pub notify_topic: Option<String>,
    /// Webhook request timeout in milliseconds.
    pub notify_timeout_ms: Option<u64>,
    /// Reject bookings for trains that do not exist.
    #[ortho_config(default = false)]
    pub strict_booking: bool,
}

impl RailbookSettings {
    /// Configured listen address, or `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured admin credential; each half defaults independently.
    pub fn admin_credential(&self) -> AdminCredential {
        AdminCredential::new(
            self.admin_username
                .as_deref()
                .unwrap_or(DEFAULT_ADMIN_USERNAME),
            self.admin_password
                .as_deref()
                .unwrap_or(DEFAULT_ADMIN_PASSWORD),
        )
    }

    /// Notification topic, or `train-booking`.
    pub fn notify_topic(&self) -> &str {
        self.notify_topic.as_deref().unwrap_or(DEFAULT_NOTIFY_TOPIC)
    }

    /// Webhook request timeout, or two seconds.
    pub fn notify_timeout(&self) -> Duration {
        Duration::from_millis(self.notify_timeout_ms.unwrap_or(DEFAULT_NOTIFY_TIMEOUT_MS))
    }
}
