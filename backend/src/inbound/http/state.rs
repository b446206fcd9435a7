//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AdminService, PassengerService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup, login, search and booking use-cases.
    pub passengers: Arc<dyn PassengerService>,
    /// Admin login and train inventory use-cases.
    pub admin: Arc<dyn AdminService>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use railbook::domain::{
    ///     AdminCredential, Notifier, PassengerBookingService, TrainInventoryService,
    /// };
    /// use railbook::inbound::http::state::HttpState;
    /// use railbook::outbound::memory::{
    ///     MemoryBookingRepository, MemoryTrainRepository, MemoryUserRepository,
    /// };
    /// use railbook::outbound::notification::TracingNotificationSink;
    ///
    /// let trains = Arc::new(MemoryTrainRepository::default());
    /// let passengers = PassengerBookingService::new(
    ///     Arc::new(MemoryUserRepository::default()),
    ///     trains.clone(),
    ///     Arc::new(MemoryBookingRepository::default()),
    ///     Notifier::new(Arc::new(TracingNotificationSink::new("train-booking"))),
    ///     Arc::new(DefaultClock),
    /// );
    /// let admin = TrainInventoryService::new(trains, AdminCredential::default());
    /// let state = HttpState::new(Arc::new(passengers), Arc::new(admin));
    /// let _admin = state.admin.clone();
    /// ```
    pub fn new(passengers: Arc<dyn PassengerService>, admin: Arc<dyn AdminService>) -> Self {
        Self { passengers, admin }
    }
}
