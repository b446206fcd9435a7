//! Railbook entry-point: loads configuration, picks the store and
//! notification adapters, and serves the booking pages.

mod server;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use reqwest::Url;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use railbook::domain::ports::NotificationSink;
use railbook::inbound::http::health::HealthState;
use railbook::inbound::http::session_config::{BuildMode, SessionSettings};
use railbook::outbound::notification::{TracingNotificationSink, WebhookNotificationSink};
use railbook::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{RailbookSettings, ServerConfig, create_server};

fn notification_sink(settings: &RailbookSettings) -> std::io::Result<Arc<dyn NotificationSink>> {
    let topic = settings.notify_topic();
    match settings.notify_webhook_url.as_deref() {
        Some(raw) => {
            let url = Url::parse(raw).map_err(|error| {
                std::io::Error::other(format!("invalid RAILBOOK_NOTIFY_WEBHOOK_URL: {error}"))
            })?;
            info!(%url, topic, "publishing notifications to webhook");
            let sink = WebhookNotificationSink::new(url, topic, settings.notify_timeout())
                .map_err(std::io::Error::other)?;
            Ok(Arc::new(sink))
        }
        None => {
            info!(topic, "no notification webhook configured; logging notifications");
            Ok(Arc::new(TracingNotificationSink::new(topic)))
        }
    }
}

async fn database_pool(database_url: &str) -> std::io::Result<DbPool> {
    let applied = run_pending_migrations(database_url)
        .await
        .map_err(std::io::Error::other)?;
    info!(applied, "database migrations applied");
    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(std::io::Error::other)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = RailbookSettings::load()
        .map_err(|error| std::io::Error::other(format!("invalid configuration: {error}")))?;
    let session = SessionSettings::from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr: SocketAddr = settings.bind_addr().parse().map_err(|error| {
        std::io::Error::other(format!("invalid RAILBOOK_BIND_ADDR: {error}"))
    })?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_admin_credential(settings.admin_credential())
    .with_notification_sink(notification_sink(&settings)?)
    .with_strict_booking(settings.strict_booking);

    match settings.database_url.as_deref() {
        Some(url) => config = config.with_db_pool(database_pool(url).await?),
        None => warn!("RAILBOOK_DATABASE_URL not set; data is lost on restart"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "railbook listening");
    server.await
}
