//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects every passenger, admin and health endpoint together
//! with the request and response schemas. Swagger UI serves it in debug
//! builds and `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::dto::{
    BookingResponse, CredentialsForm, FormPage, NewTrainForm, SearchForm, SessionSummary,
    TrainResponse,
};

/// Register the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login or POST /admin/login.",
            ))),
        );
    }
}

/// OpenAPI document for the booking pages.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Railbook",
        description = "Train search and booking for passengers, with an admin-managed inventory."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::passenger::home,
        crate::inbound::http::passenger::signup_page,
        crate::inbound::http::passenger::signup,
        crate::inbound::http::passenger::login_page,
        crate::inbound::http::passenger::login,
        crate::inbound::http::passenger::search_page,
        crate::inbound::http::passenger::search,
        crate::inbound::http::passenger::book,
        crate::inbound::http::passenger::my_bookings,
        crate::inbound::http::passenger::logout,
        crate::inbound::http::admin::admin_login_page,
        crate::inbound::http::admin::admin_login,
        crate::inbound::http::admin::dashboard,
        crate::inbound::http::admin::add_train_page,
        crate::inbound::http::admin::add_train,
        crate::inbound::http::admin::admin_logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CredentialsForm,
        SearchForm,
        NewTrainForm,
        TrainResponse,
        BookingResponse,
        SessionSummary,
        FormPage,
    )),
    tags(
        (name = "passenger", description = "Signup, login, search and booking"),
        (name = "admin", description = "Train inventory administration"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
