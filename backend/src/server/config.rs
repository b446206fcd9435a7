//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use railbook::domain::AdminCredential;
use railbook::domain::ports::NotificationSink;
use railbook::outbound::notification::TracingNotificationSink;
use railbook::outbound::persistence::DbPool;

const DEFAULT_TOPIC: &str = "train-booking";

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) admin: AdminCredential,
    pub(crate) notifications: Arc<dyn NotificationSink>,
    pub(crate) strict_booking: bool,
}

impl ServerConfig {
    /// Session and socket settings with the in-memory store, the default
    /// admin credential and log-only notifications.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            admin: AdminCredential::default(),
            notifications: Arc::new(TracingNotificationSink::new(DEFAULT_TOPIC)),
            strict_booking: false,
        }
    }

    /// Store users, trains and bookings in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Replace the admin credential.
    #[must_use]
    pub fn with_admin_credential(mut self, admin: AdminCredential) -> Self {
        self.admin = admin;
        self
    }

    /// Replace the notification sink.
    #[must_use]
    pub fn with_notification_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.notifications = sink;
        self
    }

    /// Reject bookings for unknown trains.
    #[must_use]
    pub fn with_strict_booking(mut self, strict: bool) -> Self {
        self.strict_booking = strict;
        self
    }
}
