//! Builders wiring repositories and services into the HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;
use railbook::domain::ports::{BookingRepository, TrainRepository, UserRepository};
use railbook::domain::{Notifier, PassengerBookingService, TrainInventoryService};
use railbook::inbound::http::state::HttpState;
use railbook::outbound::memory::{
    MemoryBookingRepository, MemoryTrainRepository, MemoryUserRepository,
};
use railbook::outbound::persistence::{
    DbPool, DieselBookingRepository, DieselTrainRepository, DieselUserRepository,
};
use tracing::info;

use super::ServerConfig;

/// The three persistence ports, backed by one store.
struct Repositories {
    users: Arc<dyn UserRepository>,
    trains: Arc<dyn TrainRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl Repositories {
    fn diesel(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            trains: Arc::new(DieselTrainRepository::new(pool.clone())),
            bookings: Arc::new(DieselBookingRepository::new(pool.clone())),
        }
    }

    fn memory() -> Self {
        Self {
            users: Arc::new(MemoryUserRepository::new()),
            trains: Arc::new(MemoryTrainRepository::new()),
            bookings: Arc::new(MemoryBookingRepository::new()),
        }
    }
}

/// Build the HTTP state from the configured store and notification sink.
///
/// The train repository is shared so trains added by the admin are visible to
/// passenger searches.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let repos = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL store");
            Repositories::diesel(pool)
        }
        None => {
            info!("using in-memory store");
            Repositories::memory()
        }
    };

    let passengers = PassengerBookingService::new(
        repos.users,
        repos.trains.clone(),
        repos.bookings,
        Notifier::new(config.notifications.clone()),
        Arc::new(DefaultClock),
    )
    .with_strict_booking(config.strict_booking);
    let admin = TrainInventoryService::new(repos.trains, config.admin.clone());

    HttpState::new(Arc::new(passengers), Arc::new(admin))
}
