//! Handler tests for the passenger pages, driven through mocked services.

use super::*;
use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header::LOCATION};
use actix_web::{App, test};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::Value;

use crate::domain::ports::{MockAdminService, MockPassengerService};
use crate::domain::{Booking, BookingId, NewTrain, Train, Username};
use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

async fn app(
    passengers: MockPassengerService,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(HttpState::new(
                Arc::new(passengers),
                Arc::new(MockAdminService::new()),
            )))
            .configure(crate::inbound::http::configure),
    )
    .await
}

fn location(res: &ServiceResponse) -> Option<&str> {
    res.headers().get(LOCATION).and_then(|v| v.to_str().ok())
}

fn alice() -> Username {
    Username::new("alice").expect("valid username")
}

fn signing_in_as_alice(passengers: &mut MockPassengerService) {
    passengers
        .expect_authenticate()
        .withf(|_, credentials| {
            credentials.username().as_str() == "alice" && credentials.password() == "pw1"
        })
        .times(1)
        .returning(|identity, _| {
            identity.sign_in(alice());
            Ok(())
        });
}

async fn login_cookie<S>(app: &S) -> actix_web::cookie::Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "alice"), ("password", "pw1")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/search"));
    session_cookie(&res).expect("login sets the session cookie")
}

#[rstest]
#[actix_web::test]
async fn signup_redirects_to_login() {
    let mut passengers = MockPassengerService::new();
    passengers
        .expect_signup()
        .withf(|credentials| credentials.username().as_str() == "alice")
        .times(1)
        .returning(|_| Ok(()));
    let app = app(passengers).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/signup")
            .set_form([("username", "alice"), ("password", "pw1")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/login"));
}

#[rstest]
#[actix_web::test]
async fn duplicate_signup_is_a_conflict() {
    let mut passengers = MockPassengerService::new();
    passengers
        .expect_signup()
        .returning(|_| Err(Error::conflict("User already exists")));
    let app = app(passengers).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/signup")
            .set_form([("username", "alice"), ("password", "other")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "User already exists");
}

#[rstest]
#[case("", "pw1")]
#[case("  ", "")]
#[actix_web::test]
async fn blank_username_is_rejected_before_the_service(
    #[case] username: &str,
    #[case] password: &str,
) {
    let mut passengers = MockPassengerService::new();
    passengers.expect_signup().times(0);
    let app = app(passengers).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/signup")
            .set_form([("username", username), ("password", password)])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "username");
}

#[rstest]
#[actix_web::test]
async fn empty_password_reaches_signup() {
    let mut passengers = MockPassengerService::new();
    passengers
        .expect_signup()
        .withf(|credentials| credentials.password().is_empty())
        .times(1)
        .returning(|_| Ok(()));
    let app = app(passengers).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/signup")
            .set_form([("username", "alice"), ("password", "")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/login"));
}

#[rstest]
#[actix_web::test]
async fn malformed_form_is_an_invalid_request() {
    let app = app(MockPassengerService::new()).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "alice")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn invalid_login_is_unauthorised_and_sets_no_cookie() {
    let mut passengers = MockPassengerService::new();
    passengers
        .expect_authenticate()
        .returning(|_, _| Err(Error::invalid_credentials("Invalid Login")));
    let app = app(passengers).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("username", "alice"), ("password", "Pw1")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&res).is_none());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Invalid Login");
}

#[rstest]
#[actix_web::test]
async fn login_session_reaches_my_bookings() {
    let mut passengers = MockPassengerService::new();
    signing_in_as_alice(&mut passengers);
    passengers
        .expect_list_my_bookings()
        .withf(|identity| identity.current_user() == Some(&alice()))
        .times(1)
        .returning(|_| {
            let booked_at = Utc
                .with_ymd_and_hms(2026, 1, 10, 8, 0, 0)
                .single()
                .expect("valid timestamp");
            Ok(vec![Booking::new(
                BookingId::random(),
                alice(),
                TrainId::new("t-1").expect("valid id"),
                booked_at,
            )])
        });
    let app = app(passengers).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/my-bookings")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Vec<BookingResponse> = test::read_body_json(res).await;
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].username, "alice");
    assert_eq!(body[0].train_id, "t-1");
}

#[rstest]
#[actix_web::test]
async fn search_forwards_route_and_returns_trains() {
    let mut passengers = MockPassengerService::new();
    signing_in_as_alice(&mut passengers);
    passengers
        .expect_search_trains()
        .withf(|identity, source, destination| {
            identity.current_user().is_some() && source == "A" && destination == "B"
        })
        .times(1)
        .returning(|_, source, destination| {
            Ok(vec![Train::from_new(
                TrainId::new("t-1").expect("valid id"),
                NewTrain {
                    name: "Express".to_owned(),
                    source: source.to_owned(),
                    destination: destination.to_owned(),
                    time: "09:00".to_owned(),
                    price: "10".to_owned(),
                },
            )])
        });
    let app = app(passengers).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/search")
            .cookie(cookie)
            .set_form([("source", "A"), ("destination", "B")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body[0]["trainId"], "t-1");
    assert_eq!(body[0]["name"], "Express");
}

#[rstest]
#[actix_web::test]
async fn empty_search_page_requires_login() {
    let app = app(MockPassengerService::new()).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/search").to_request()).await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/login"));
}

#[rstest]
#[actix_web::test]
async fn anonymous_partial_search_redirects_before_form_validation() {
    let mut passengers = MockPassengerService::new();
    passengers.expect_search_trains().times(0);
    let app = app(passengers).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/search")
            .set_form([("source", "A")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/login"));
}

#[rstest]
#[actix_web::test]
async fn logged_in_partial_search_is_an_invalid_request() {
    let mut passengers = MockPassengerService::new();
    signing_in_as_alice(&mut passengers);
    passengers.expect_search_trains().times(0);
    let app = app(passengers).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/search")
            .cookie(cookie)
            .set_form([("source", "A")])
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn nul_byte_train_id_is_an_invalid_request() {
    let mut passengers = MockPassengerService::new();
    signing_in_as_alice(&mut passengers);
    passengers.expect_book_train().times(0);
    let app = app(passengers).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/book/t-1%00x")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn logged_out_booking_redirects_to_login() {
    let mut passengers = MockPassengerService::new();
    passengers
        .expect_book_train()
        .withf(|identity, _| identity.current_user().is_none())
        .returning(|identity, _| identity.require_user().map(|_| unreachable!()));
    let app = app(passengers).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/book/t-1").to_request())
        .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/login"));
}

#[rstest]
#[actix_web::test]
async fn booking_passes_the_raw_path_segment() {
    let mut passengers = MockPassengerService::new();
    signing_in_as_alice(&mut passengers);
    passengers
        .expect_book_train()
        .withf(|_, train_id| train_id.as_str() == "no-such-train")
        .times(1)
        .returning(|identity, train_id| {
            Ok(Booking::new(
                BookingId::random(),
                identity.require_user()?.clone(),
                train_id.clone(),
                Utc::now(),
            ))
        });
    let app = app(passengers).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/book/no-such-train")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/my-bookings"));
}

#[rstest]
#[actix_web::test]
async fn strict_booking_miss_is_not_found() {
    let mut passengers = MockPassengerService::new();
    signing_in_as_alice(&mut passengers);
    passengers
        .expect_book_train()
        .returning(|_, train_id| Err(Error::not_found(format!("train {train_id} not found"))));
    let app = app(passengers).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/book/ghost")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn logout_clears_the_passenger_and_redirects_home() {
    let mut passengers = MockPassengerService::new();
    signing_in_as_alice(&mut passengers);
    passengers
        .expect_logout()
        .times(1)
        .returning(|identity| identity.sign_out());
    let app = app(passengers).await;
    let cookie = login_cookie(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/"));
    let cookie = session_cookie(&res).expect("logout rewrites the session");

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(cookie).to_request(),
    )
    .await;
    let summary: SessionSummary = test::read_body_json(res).await;
    assert_eq!(summary.username, None);
    assert!(!summary.admin);
}

#[rstest]
#[case("/signup", "/signup")]
#[case("/login", "/login")]
#[actix_web::test]
async fn form_pages_describe_credentials(#[case] uri: &str, #[case] action: &str) {
    let app = app(MockPassengerService::new()).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let page: FormPage = test::read_body_json(res).await;
    assert_eq!(page.action, action);
    assert_eq!(page.fields, ["username", "password"]);
}
