//! HTTP inbound adapter exposing the passenger and admin pages.

pub mod admin;
pub mod dto;
pub mod error;
pub mod health;
pub mod passenger;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, web};

use crate::domain::Error;

pub use error::ApiResult;

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Unwrap a form body extracted as a `Result` so a session guard can run
/// first. Keeps the payload built by the form error handler.
pub(crate) fn guarded_form<T>(form: Result<web::Form<T>, actix_web::Error>) -> Result<T, Error> {
    form.map(web::Form::into_inner).map_err(|err| {
        err.as_error::<Error>()
            .cloned()
            .unwrap_or_else(|| Error::invalid_request(err.to_string()))
    })
}

/// Register every passenger and admin page.
///
/// Malformed forms are answered with the JSON `invalid_request` payload,
/// except on guarded pages where a missing session redirects first. The
/// caller supplies [`state::HttpState`] and the session middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
///
/// let app = App::new().configure(railbook::inbound::http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        Error::invalid_request(err.to_string()).into()
    }))
    .service(passenger::home)
    .service(passenger::signup_page)
    .service(passenger::signup)
    .service(passenger::login_page)
    .service(passenger::login)
    .service(passenger::search_page)
    .service(passenger::search)
    .service(passenger::book)
    .service(passenger::my_bookings)
    .service(passenger::logout)
    .service(admin::admin_login_page)
    .service(admin::admin_login)
    .service(admin::dashboard)
    .service(admin::add_train_page)
    .service(admin::add_train)
    .service(admin::admin_logout);
}
