//! Tests for the passenger domain service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;
use rstest_bdd_macros::{given, then, when};

use super::*;
use crate::domain::ports::{
    MockBookingRepository, MockNotificationSink, MockTrainRepository, MockUserRepository,
    NotificationError,
};
use crate::domain::{ErrorCode, NewTrain, Username};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct Doubles {
    users: MockUserRepository,
    trains: MockTrainRepository,
    bookings: MockBookingRepository,
    sink: MockNotificationSink,
}

impl Doubles {
    fn new() -> Self {
        Self {
            users: MockUserRepository::new(),
            trains: MockTrainRepository::new(),
            bookings: MockBookingRepository::new(),
            sink: MockNotificationSink::new(),
        }
    }

    fn expect_notification(mut self, subject: &'static str, message: String) -> Self {
        self.sink
            .expect_publish()
            .withf(move |n| n.subject() == subject && n.message() == message)
            .times(1)
            .return_once(|_| Ok(()));
        self
    }

    fn expect_no_notification(mut self) -> Self {
        self.sink.expect_publish().times(0);
        self
    }

    fn build(self) -> PassengerBookingService {
        PassengerBookingService::new(
            Arc::new(self.users),
            Arc::new(self.trains),
            Arc::new(self.bookings),
            Notifier::new(Arc::new(self.sink)),
            Arc::new(FixtureClock {
                utc_now: fixture_timestamp(),
            }),
        )
    }
}

fn alice() -> Username {
    Username::new("alice").expect("valid username")
}

fn credentials(username: &str, password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(username, password).expect("valid credentials")
}

fn signed_in() -> SessionIdentity {
    SessionIdentity::from_parts(Some(alice()), false)
}

fn train(id: &str, source: &str, destination: &str) -> Train {
    Train::from_new(
        TrainId::new(id).expect("valid id"),
        NewTrain {
            name: format!("{source}-{destination}"),
            source: source.to_owned(),
            destination: destination.to_owned(),
            time: "10:00".to_owned(),
            price: "25".to_owned(),
        },
    )
}

#[given("a username that is already registered")]
fn a_username_that_is_already_registered() -> PassengerBookingService {
    let mut doubles = Doubles::new().expect_no_notification();
    doubles
        .users
        .expect_insert_new()
        .times(1)
        .return_once(|_| Ok(false));
    doubles.build()
}

#[when("the passenger signs up again")]
fn the_passenger_signs_up_again(service: PassengerBookingService) -> Result<(), Error> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime")
        .block_on(service.signup(&credentials("alice", "other")))
}

#[then("the signup is rejected as a conflict")]
fn the_signup_is_rejected_as_a_conflict(result: Result<(), Error>) {
    let error = result.expect_err("duplicate signup must fail");
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "User already exists");
}

#[rstest]
fn duplicate_signup_is_rejected() {
    let service = a_username_that_is_already_registered();
    let result = the_passenger_signs_up_again(service);
    the_signup_is_rejected_as_a_conflict(result);
}

#[rstest]
#[tokio::test]
async fn signup_persists_user_verbatim_and_notifies() {
    let mut doubles = Doubles::new().expect_notification("New Signup", "alice registered.".into());
    doubles
        .users
        .expect_insert_new()
        .withf(|user| user.username().as_ref() == "alice" && user.password() == " pw1 ")
        .times(1)
        .return_once(|_| Ok(true));

    doubles
        .build()
        .signup(&credentials("alice", " pw1 "))
        .await
        .expect("signup succeeds");
}

#[rstest]
#[tokio::test]
async fn signup_succeeds_when_notification_fails() {
    let mut doubles = Doubles::new();
    doubles
        .users
        .expect_insert_new()
        .return_once(|_| Ok(true));
    doubles
        .sink
        .expect_publish()
        .times(1)
        .return_once(|_| Err(NotificationError::delivery("topic unreachable")));

    doubles
        .build()
        .signup(&credentials("alice", "pw1"))
        .await
        .expect("notification failure is swallowed");
}

#[rstest]
#[case(UserRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn signup_maps_repository_failures(
    #[case] failure: UserRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut doubles = Doubles::new().expect_no_notification();
    doubles
        .users
        .expect_insert_new()
        .return_once(move |_| Err(failure));

    let error = doubles
        .build()
        .signup(&credentials("alice", "pw1"))
        .await
        .expect_err("repository failure surfaces");
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case("abc", true)]
#[case("Abc", false)]
#[case("abc ", false)]
#[tokio::test]
async fn authenticate_requires_exact_password(#[case] candidate: &str, #[case] accepted: bool) {
    let mut doubles = if accepted {
        Doubles::new().expect_notification("User Login", "alice logged in.".into())
    } else {
        Doubles::new().expect_no_notification()
    };
    doubles
        .users
        .expect_find_by_username()
        .withf(|name| name.as_ref() == "alice")
        .return_once(|_| Ok(Some(User::new(alice(), "abc"))));

    let mut identity = SessionIdentity::anonymous();
    let result = doubles
        .build()
        .authenticate(&mut identity, &credentials("alice", candidate))
        .await;

    if accepted {
        result.expect("login succeeds");
        assert_eq!(identity.current_user(), Some(&alice()));
    } else {
        let error = result.expect_err("login fails");
        assert_eq!(error.code(), ErrorCode::InvalidCredentials);
        assert!(identity.current_user().is_none());
    }
}

#[rstest]
#[tokio::test]
async fn authenticate_rejects_unknown_user() {
    let mut doubles = Doubles::new().expect_no_notification();
    doubles
        .users
        .expect_find_by_username()
        .return_once(|_| Ok(None));

    let mut identity = SessionIdentity::anonymous();
    let error = doubles
        .build()
        .authenticate(&mut identity, &credentials("ghost", "pw"))
        .await
        .expect_err("unknown user");
    assert_eq!(error.code(), ErrorCode::InvalidCredentials);
    assert_eq!(identity, SessionIdentity::anonymous());
}

#[rstest]
#[tokio::test]
async fn guarded_operations_require_login() {
    let mut doubles = Doubles::new().expect_no_notification();
    doubles.trains.expect_find_by_route().times(0);
    doubles.bookings.expect_upsert().times(0);
    doubles.bookings.expect_list_for_user().times(0);
    let service = doubles.build();
    let anonymous = SessionIdentity::anonymous();
    let train_id = TrainId::new("t-1").expect("valid id");

    let search = service.search_trains(&anonymous, "A", "B").await;
    let book = service.book_train(&anonymous, &train_id).await;
    let list = service.list_my_bookings(&anonymous).await;

    for error in [
        search.expect_err("search guarded"),
        book.expect_err("book guarded"),
        list.expect_err("list guarded"),
    ] {
        assert_eq!(error.code(), ErrorCode::LoginRequired);
    }
}

#[rstest]
#[tokio::test]
async fn search_returns_route_matches_and_empty_is_not_an_error() {
    let mut doubles = Doubles::new();
    doubles
        .trains
        .expect_find_by_route()
        .withf(|source, destination| source == "A" && destination == "B")
        .return_once(|_, _| Ok(vec![train("t-1", "A", "B")]));
    doubles
        .trains
        .expect_find_by_route()
        .withf(|source, _| source == "X")
        .return_once(|_, _| Ok(Vec::new()));
    let service = doubles.build();

    let hits = service
        .search_trains(&signed_in(), "A", "B")
        .await
        .expect("search succeeds");
    let misses = service
        .search_trains(&signed_in(), "X", "Y")
        .await
        .expect("empty search succeeds");

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id().as_ref(), "t-1");
    assert!(misses.is_empty());
}

#[rstest]
#[tokio::test]
async fn booking_accepts_unknown_train_by_default() {
    let mut doubles =
        Doubles::new().expect_notification("Train Booking", "alice booked train ghost".into());
    doubles.trains.expect_find_by_id().times(0);
    doubles
        .bookings
        .expect_upsert()
        .withf(|booking| {
            booking.username().as_ref() == "alice"
                && booking.train_id().as_ref() == "ghost"
                && booking.booked_at() == fixture_timestamp()
        })
        .times(1)
        .return_once(|_| Ok(()));

    let booking = doubles
        .build()
        .book_train(&signed_in(), &TrainId::new("ghost").expect("valid id"))
        .await
        .expect("dangling booking accepted");
    assert_eq!(booking.train_id().as_ref(), "ghost");
}

#[rstest]
#[tokio::test]
async fn repeated_bookings_get_distinct_ids() {
    let mut doubles = Doubles::new();
    doubles.bookings.expect_upsert().times(2).returning(|_| Ok(()));
    doubles.sink.expect_publish().times(2).returning(|_| Ok(()));
    let service = doubles.build();
    let train_id = TrainId::new("t-1").expect("valid id");

    let first = service
        .book_train(&signed_in(), &train_id)
        .await
        .expect("first booking");
    let second = service
        .book_train(&signed_in(), &train_id)
        .await
        .expect("second booking");
    assert_ne!(first.id(), second.id());
}

#[rstest]
#[tokio::test]
async fn strict_booking_rejects_unknown_train_without_side_effects() {
    let mut doubles = Doubles::new().expect_no_notification();
    doubles
        .trains
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    doubles.bookings.expect_upsert().times(0);

    let error = doubles
        .build()
        .with_strict_booking(true)
        .book_train(&signed_in(), &TrainId::new("ghost").expect("valid id"))
        .await
        .expect_err("unknown train rejected");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn strict_booking_accepts_known_train() {
    let mut doubles =
        Doubles::new().expect_notification("Train Booking", "alice booked train t-1".into());
    doubles
        .trains
        .expect_find_by_id()
        .return_once(|_| Ok(Some(train("t-1", "A", "B"))));
    doubles.bookings.expect_upsert().times(1).return_once(|_| Ok(()));

    doubles
        .build()
        .with_strict_booking(true)
        .book_train(&signed_in(), &TrainId::new("t-1").expect("valid id"))
        .await
        .expect("known train booked");
}

#[rstest]
#[tokio::test]
async fn list_my_bookings_sorts_oldest_first() {
    let later = fixture_timestamp() + chrono::Duration::minutes(5);
    let mut doubles = Doubles::new();
    doubles
        .bookings
        .expect_list_for_user()
        .withf(|name| name.as_ref() == "alice")
        .return_once(move |_| {
            Ok(vec![
                Booking::new(
                    BookingId::random(),
                    alice(),
                    TrainId::new("late").expect("valid id"),
                    later,
                ),
                Booking::new(
                    BookingId::random(),
                    alice(),
                    TrainId::new("early").expect("valid id"),
                    fixture_timestamp(),
                ),
            ])
        });

    let bookings = doubles
        .build()
        .list_my_bookings(&signed_in())
        .await
        .expect("listing succeeds");
    let trains: Vec<&str> = bookings.iter().map(|b| b.train_id().as_ref()).collect();
    assert_eq!(trains, vec!["early", "late"]);
}

#[rstest]
#[tokio::test]
async fn logout_is_idempotent_and_keeps_admin_flag() {
    let service = Doubles::new().expect_no_notification().build();
    let mut identity = SessionIdentity::from_parts(Some(alice()), true);

    service.logout(&mut identity).await;
    service.logout(&mut identity).await;

    assert!(identity.current_user().is_none());
    assert!(identity.is_admin());
}
