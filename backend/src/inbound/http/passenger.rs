//! Passenger pages.
//!
//! ```text
//! GET  /                  session summary
//! POST /signup            username, password        -> 303 /login
//! POST /login             username, password        -> 303 /search
//! POST /search            source, destination       -> JSON trains
//! GET  /book/{train_id}                             -> 303 /my-bookings
//! GET  /my-bookings                                 -> JSON bookings
//! GET  /logout                                      -> 303 /
//! ```
//!
//! Guarded pages answer `303 See Other` to `/login` when no passenger is
//! logged in.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Error, LoginCredentials, TrainId};
use crate::inbound::http::dto::{
    BookingResponse, CredentialsForm, FormPage, SearchForm, SessionSummary, TrainResponse,
    map_login_validation_error,
};
use crate::inbound::http::error::LOGIN_PATH;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, guarded_form, see_other};

const CREDENTIAL_FIELDS: &[&str] = &["username", "password"];

fn credentials(form: web::Form<CredentialsForm>) -> Result<LoginCredentials, Error> {
    LoginCredentials::try_from(form.into_inner()).map_err(map_login_validation_error)
}

/// Home page: who is logged in.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Session summary", body = SessionSummary)),
    tags = ["passenger"],
    operation_id = "home"
)]
#[get("/")]
pub async fn home(session: SessionContext) -> ApiResult<web::Json<SessionSummary>> {
    let identity = session.identity()?;
    Ok(web::Json(SessionSummary::from(&identity)))
}

/// Signup form description.
#[utoipa::path(
    get,
    path = "/signup",
    responses((status = 200, description = "Signup form", body = FormPage)),
    tags = ["passenger"],
    operation_id = "signupPage"
)]
#[get("/signup")]
pub async fn signup_page() -> web::Json<FormPage> {
    web::Json(FormPage::new("/signup", CREDENTIAL_FIELDS))
}

/// Register a passenger account.
#[utoipa::path(
    post,
    path = "/signup",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Account created; continue to /login"),
        (status = 400, description = "Blank username", body = Error),
        (status = 409, description = "User already exists", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["passenger"],
    operation_id = "signup"
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = credentials(form)?;
    state.passengers.signup(&credentials).await?;
    Ok(see_other(LOGIN_PATH))
}

/// Login form description.
#[utoipa::path(
    get,
    path = "/login",
    responses((status = 200, description = "Login form", body = FormPage)),
    tags = ["passenger"],
    operation_id = "loginPage"
)]
#[get("/login")]
pub async fn login_page() -> web::Json<FormPage> {
    web::Json(FormPage::new(LOGIN_PATH, CREDENTIAL_FIELDS))
}

/// Log a passenger in and establish the session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in; continue to /search", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank username", body = Error),
        (status = 401, description = "Invalid Login", body = Error)
    ),
    tags = ["passenger"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let credentials = credentials(form)?;
    let mut identity = session.identity()?;
    state
        .passengers
        .authenticate(&mut identity, &credentials)
        .await?;
    session.store(&identity)?;
    Ok(see_other("/search"))
}

/// Empty search page for a logged-in passenger.
#[utoipa::path(
    get,
    path = "/search",
    responses(
        (status = 200, description = "No results yet", body = [TrainResponse]),
        (status = 303, description = "Not logged in; continue to /login")
    ),
    tags = ["passenger"],
    operation_id = "searchPage"
)]
#[get("/search")]
pub async fn search_page(session: SessionContext) -> ApiResult<web::Json<Vec<TrainResponse>>> {
    session.identity()?.require_user()?;
    Ok(web::Json(Vec::new()))
}

/// Trains running exactly from `source` to `destination`.
#[utoipa::path(
    post,
    path = "/search",
    request_body(content = SearchForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Matching trains", body = [TrainResponse]),
        (status = 303, description = "Not logged in; continue to /login"),
        (status = 400, description = "Missing form fields", body = Error)
    ),
    tags = ["passenger"],
    operation_id = "searchTrains"
)]
#[post("/search")]
pub async fn search(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: Result<web::Form<SearchForm>, actix_web::Error>,
) -> ApiResult<web::Json<Vec<TrainResponse>>> {
    let identity = session.identity()?;
    identity.require_user()?;
    let SearchForm {
        source,
        destination,
    } = guarded_form(form)?;
    let trains = state
        .passengers
        .search_trains(&identity, &source, &destination)
        .await?;
    Ok(web::Json(trains.into_iter().map(TrainResponse::from).collect()))
}

/// Book a seat on a train.
#[utoipa::path(
    get,
    path = "/book/{train_id}",
    params(("train_id" = String, Path, description = "Train to book")),
    responses(
        (status = 303, description = "Booked; continue to /my-bookings (or /login when logged out)"),
        (status = 404, description = "Unknown train (strict booking only)", body = Error)
    ),
    tags = ["passenger"],
    operation_id = "bookTrain"
)]
#[get("/book/{train_id}")]
pub async fn book(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    let train_id = TrainId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    state.passengers.book_train(&identity, &train_id).await?;
    Ok(see_other("/my-bookings"))
}

/// The logged-in passenger's bookings, oldest first.
#[utoipa::path(
    get,
    path = "/my-bookings",
    responses(
        (status = 200, description = "Bookings", body = [BookingResponse]),
        (status = 303, description = "Not logged in; continue to /login")
    ),
    tags = ["passenger"],
    operation_id = "myBookings"
)]
#[get("/my-bookings")]
pub async fn my_bookings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<BookingResponse>>> {
    let identity = session.identity()?;
    let bookings = state.passengers.list_my_bookings(&identity).await?;
    Ok(web::Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}

/// End the passenger session. Safe to call when logged out.
#[utoipa::path(
    get,
    path = "/logout",
    responses((status = 303, description = "Logged out; continue to /")),
    tags = ["passenger"],
    operation_id = "logout"
)]
#[get("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let mut identity = session.identity()?;
    state.passengers.logout(&mut identity).await;
    session.store(&identity)?;
    Ok(see_other("/"))
}

#[cfg(test)]
#[path = "passenger_tests.rs"]
mod tests;
