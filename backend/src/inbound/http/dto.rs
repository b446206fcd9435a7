//! Request forms and JSON response bodies for the HTTP adapter.
//!
//! Forms arrive as `application/x-www-form-urlencoded` with snake_case field
//! names. Responses are camelCase JSON.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{
    Booking, Error, LoginCredentials, LoginValidationError, NewTrain, SessionIdentity, Train,
};

/// Username and password form used by signup and both login endpoints.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CredentialsForm {
    /// Account name, matched verbatim.
    pub username: String,
    /// Plain-text password, matched verbatim.
    pub password: String,
}

impl TryFrom<CredentialsForm> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: CredentialsForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
    }
}

/// Route search form.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SearchForm {
    /// Departure station, matched exactly.
    pub source: String,
    /// Arrival station, matched exactly.
    pub destination: String,
}

/// Admin form describing a new train. Every field is stored verbatim.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NewTrainForm {
    /// Display name.
    pub name: String,
    /// Departure station.
    pub source: String,
    /// Arrival station.
    pub destination: String,
    /// Free-form departure time.
    pub time: String,
    /// Free-form fare.
    pub price: String,
}

impl From<NewTrainForm> for NewTrain {
    fn from(value: NewTrainForm) -> Self {
        Self {
            name: value.name,
            source: value.source,
            destination: value.destination,
            time: value.time,
            price: value.price,
        }
    }
}

/// Train as returned by search and the admin dashboard.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainResponse {
    /// Identifier used in `/book/{train_id}`.
    #[schema(example = "0b6c1a52-4c0f-4b8e-9d7e-3f3c1f9a2d11")]
    pub train_id: String,
    #[schema(example = "Night Mail")]
    pub name: String,
    pub source: String,
    pub destination: String,
    #[schema(example = "23:40")]
    pub time: String,
    #[schema(example = "45")]
    pub price: String,
}

impl From<Train> for TrainResponse {
    fn from(value: Train) -> Self {
        Self {
            train_id: value.id().to_string(),
            name: value.name().to_owned(),
            source: value.source().to_owned(),
            destination: value.destination().to_owned(),
            time: value.time().to_owned(),
            price: value.price().to_owned(),
        }
    }
}

/// Booking as listed on the passenger's bookings page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: String,
    pub username: String,
    pub train_id: String,
    /// RFC 3339 timestamp.
    pub booked_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        Self {
            booking_id: value.id().to_string(),
            username: value.username().to_string(),
            train_id: value.train_id().to_string(),
            booked_at: value.booked_at().to_rfc3339(),
        }
    }
}

/// Summary of the caller's session, served by the home page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    /// Logged-in passenger, if any.
    pub username: Option<String>,
    /// Whether an admin session is active.
    pub admin: bool,
}

impl From<&SessionIdentity> for SessionSummary {
    fn from(value: &SessionIdentity) -> Self {
        Self {
            username: value.current_user().map(|u| u.as_str().to_owned()),
            admin: value.is_admin(),
        }
    }
}

/// Description of a form page: where to post and which fields to send.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FormPage {
    #[schema(example = "/login")]
    pub action: String,
    #[schema(example = json!(["username", "password"]))]
    pub fields: Vec<String>,
}

impl FormPage {
    pub(crate) fn new(action: &str, fields: &[&str]) -> Self {
        Self {
            action: action.to_owned(),
            fields: fields.iter().map(|f| (*f).to_owned()).collect(),
        }
    }
}
