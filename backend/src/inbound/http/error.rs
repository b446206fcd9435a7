//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into consistent responses. Missing sessions
//! become `303 See Other` redirects to the matching login page; everything
//! else is a JSON error payload.

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, HttpResponseBuilder, ResponseError, http::StatusCode};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Passenger login page.
pub const LOGIN_PATH: &str = "/login";
/// Admin login page.
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::LoginRequired | ErrorCode::AdminLoginRequired => StatusCode::SEE_OTHER,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redirect_for(code: ErrorCode) -> Option<&'static str> {
    match code {
        ErrorCode::LoginRequired => Some(LOGIN_PATH),
        ErrorCode::AdminLoginRequired => Some(ADMIN_LOGIN_PATH),
        _ => None,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

fn with_trace_header(builder: &mut HttpResponseBuilder, error: &Error) {
    if let Some(id) = error.trace_id() {
        builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        with_trace_header(&mut builder, self);

        match redirect_for(self.code()) {
            Some(location) => builder.insert_header((LOCATION, location)).finish(),
            None => builder.json(redact_if_internal(self)),
        }
    }
}
