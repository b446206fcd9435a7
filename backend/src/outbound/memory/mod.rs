//! In-memory repository adapters.
//!
//! Used when no database URL is configured and by integration tests. Each
//! store keeps its records behind a single `tokio::sync::RwLock`, so every
//! operation is atomic with respect to the others on the same store.
//! Secondary indexes mirror the PostgreSQL indexes and are maintained under
//! the same lock as the primary map.

mod booking_repository;
mod train_repository;
mod user_repository;

pub use booking_repository::MemoryBookingRepository;
pub use train_repository::MemoryTrainRepository;
pub use user_repository::MemoryUserRepository;
