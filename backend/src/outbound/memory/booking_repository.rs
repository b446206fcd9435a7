//! In-memory `BookingRepository` with a per-username index.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{Booking, BookingId, Username, sort_chronologically};

#[derive(Debug, Default)]
struct BookingTable {
    by_id: HashMap<BookingId, Booking>,
    by_user: HashMap<Username, BTreeSet<BookingId>>,
}

impl BookingTable {
    fn put(&mut self, booking: Booking) {
        if let Some(previous) = self.by_id.remove(&booking.id()) {
            if let Some(ids) = self.by_user.get_mut(previous.username()) {
                ids.remove(&previous.id());
                if ids.is_empty() {
                    self.by_user.remove(previous.username());
                }
            }
        }
        self.by_user
            .entry(booking.username().clone())
            .or_default()
            .insert(booking.id());
        self.by_id.insert(booking.id(), booking);
    }
}

/// Bookings keyed by identifier.
#[derive(Debug, Default)]
pub struct MemoryBookingRepository {
    table: RwLock<BookingTable>,
}

impl MemoryBookingRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(self.table.read().await.by_id.get(id).cloned())
    }

    async fn upsert(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        self.table.write().await.put(booking.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingRepositoryError> {
        let mut bookings: Vec<Booking> = self.table.read().await.by_id.values().cloned().collect();
        sort_chronologically(&mut bookings);
        Ok(bookings)
    }

    async fn list_for_user(
        &self,
        username: &Username,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        let table = self.table.read().await;
        let mut bookings: Vec<Booking> = table
            .by_user
            .get(username)
            .into_iter()
            .flatten()
            .filter_map(|id| table.by_id.get(id).cloned())
            .collect();
        sort_chronologically(&mut bookings);
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrainId;
    use chrono::Utc;
    use rstest::rstest;

    fn booking(user: &str, train: &str) -> Booking {
        Booking::new(
            BookingId::random(),
            Username::new(user).expect("valid username"),
            TrainId::new(train).expect("valid id"),
            Utc::now(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn list_for_user_ignores_other_passengers() {
        let repo = MemoryBookingRepository::new();
        for b in [
            booking("alice", "t-1"),
            booking("bob", "t-1"),
            booking("alice", "t-2"),
            booking("Alice", "t-3"),
        ] {
            repo.upsert(&b).await.expect("upsert");
        }

        let alice = Username::new("alice").expect("valid");
        let indexed = repo.list_for_user(&alice).await.expect("list");
        let scanned: Vec<Booking> = repo
            .list_all()
            .await
            .expect("list")
            .into_iter()
            .filter(|b| b.username() == &alice)
            .collect();

        assert_eq!(indexed.len(), 2);
        assert_eq!(indexed, scanned);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_user_has_no_bookings() {
        let repo = MemoryBookingRepository::new();
        repo.upsert(&booking("alice", "t-1")).await.expect("upsert");

        let none = repo
            .list_for_user(&Username::new("carol").expect("valid"))
            .await
            .expect("list");
        assert!(none.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn reassigning_a_booking_updates_the_index() {
        let repo = MemoryBookingRepository::new();
        let original = booking("alice", "t-1");
        repo.upsert(&original).await.expect("upsert");

        let moved = Booking::new(
            original.id(),
            Username::new("bob").expect("valid"),
            original.train_id().clone(),
            original.booked_at(),
        );
        repo.upsert(&moved).await.expect("upsert");

        let alice = repo
            .list_for_user(&Username::new("alice").expect("valid"))
            .await
            .expect("list");
        let found = repo
            .find_by_id(&original.id())
            .await
            .expect("lookup")
            .expect("present");
        assert!(alice.is_empty());
        assert_eq!(found.username().as_str(), "bob");
    }
}
