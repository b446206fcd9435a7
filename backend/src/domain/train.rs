//! Train inventory model.
//!
//! Train attributes are free-form strings: departure time and price are
//! stored exactly as the admin entered them.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by [`TrainId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainIdValidationError {
    /// Identifier was empty.
    Empty,
    /// Identifier contained a NUL byte, which text columns cannot store.
    ContainsNul,
}

impl fmt::Display for TrainIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "train id must not be empty"),
            Self::ContainsNul => write!(f, "train id must not contain NUL bytes"),
        }
    }
}

impl std::error::Error for TrainIdValidationError {}

/// Opaque train identifier.
///
/// Generated identifiers are UUID v4 text, but any non-empty string without
/// NUL bytes is a valid reference: bookings may point at trains that do not
/// exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrainId(String);

impl TrainId {
    /// Validate and construct a [`TrainId`] from caller input.
    pub fn new(raw: impl Into<String>) -> Result<Self, TrainIdValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(TrainIdValidationError::Empty);
        }
        if raw.contains('\0') {
            return Err(TrainIdValidationError::ContainsNul);
        }
        Ok(Self(raw))
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for TrainId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TrainId> for String {
    fn from(value: TrainId) -> Self {
        value.0
    }
}

impl TryFrom<String> for TrainId {
    type Error = TrainIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Admin-supplied train attributes before an identifier is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrain {
    /// Display name of the service.
    pub name: String,
    /// Departure station.
    pub source: String,
    /// Arrival station.
    pub destination: String,
    /// Departure time, unvalidated.
    pub time: String,
    /// Fare, unvalidated.
    pub price: String,
}

/// Persisted train record.
///
/// ## Invariants
/// - `id` never changes once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Train {
    id: TrainId,
    name: String,
    source: String,
    destination: String,
    time: String,
    price: String,
}

impl Train {
    /// Attach an identifier to admin-supplied attributes.
    pub fn from_new(id: TrainId, new: NewTrain) -> Self {
        let NewTrain {
            name,
            source,
            destination,
            time,
            price,
        } = new;
        Self {
            id,
            name,
            source,
            destination,
            time,
            price,
        }
    }

    /// Train identifier.
    pub fn id(&self) -> &TrainId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Departure station.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Arrival station.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Departure time as entered.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Fare as entered.
    pub fn price(&self) -> &str {
        &self.price
    }

    /// Exact, case-sensitive match on both endpoints.
    pub fn serves(&self, source: &str, destination: &str) -> bool {
        self.source == source && self.destination == destination
    }
}
