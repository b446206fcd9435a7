//! Admin pages.
//!
//! ```text
//! POST /admin/login       username, password                    -> 303 /admin/dashboard
//! GET  /admin/dashboard                                         -> JSON trains
//! POST /admin/add-train   name, source, destination, time, price -> 303 /admin/dashboard
//! GET  /admin/logout                                            -> 303 /
//! ```
//!
//! Guarded pages answer `303 See Other` to `/admin/login` without an admin
//! session.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::Error;
use crate::inbound::http::dto::{CredentialsForm, FormPage, NewTrainForm, TrainResponse};
use crate::inbound::http::error::ADMIN_LOGIN_PATH;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, guarded_form, see_other};

const DASHBOARD_PATH: &str = "/admin/dashboard";
const ADD_TRAIN_PATH: &str = "/admin/add-train";

/// Admin login form description.
#[utoipa::path(
    get,
    path = "/admin/login",
    responses((status = 200, description = "Admin login form", body = FormPage)),
    tags = ["admin"],
    operation_id = "adminLoginPage"
)]
#[get("/admin/login")]
pub async fn admin_login_page() -> web::Json<FormPage> {
    web::Json(FormPage::new(ADMIN_LOGIN_PATH, &["username", "password"]))
}

/// Check the configured admin credential and flag the session.
#[utoipa::path(
    post,
    path = "/admin/login",
    request_body(content = CredentialsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Admin session established; continue to /admin/dashboard"),
        (status = 401, description = "Invalid Admin", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminLogin"
)]
#[post("/admin/login")]
pub async fn admin_login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<CredentialsForm>,
) -> ApiResult<HttpResponse> {
    let CredentialsForm { username, password } = form.into_inner();
    let mut identity = session.identity()?;
    state
        .admin
        .admin_authenticate(&mut identity, &username, &password)
        .await?;
    session.store(&identity)?;
    Ok(see_other(DASHBOARD_PATH))
}

/// Every train in the inventory.
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    responses(
        (status = 200, description = "All trains", body = [TrainResponse]),
        (status = 303, description = "No admin session; continue to /admin/login")
    ),
    tags = ["admin"],
    operation_id = "adminDashboard"
)]
#[get("/admin/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<TrainResponse>>> {
    let identity = session.identity()?;
    let trains = state.admin.list_all_trains(&identity).await?;
    Ok(web::Json(trains.into_iter().map(TrainResponse::from).collect()))
}

/// Add-train form description.
#[utoipa::path(
    get,
    path = "/admin/add-train",
    responses(
        (status = 200, description = "Add-train form", body = FormPage),
        (status = 303, description = "No admin session; continue to /admin/login")
    ),
    tags = ["admin"],
    operation_id = "addTrainPage"
)]
#[get("/admin/add-train")]
pub async fn add_train_page(session: SessionContext) -> ApiResult<web::Json<FormPage>> {
    session.identity()?.require_admin()?;
    Ok(web::Json(FormPage::new(
        ADD_TRAIN_PATH,
        &["name", "source", "destination", "time", "price"],
    )))
}

/// Store a new train under a freshly generated id.
#[utoipa::path(
    post,
    path = "/admin/add-train",
    request_body(content = NewTrainForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Train added; continue to /admin/dashboard (or /admin/login without an admin session)"),
        (status = 400, description = "Missing form fields", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["admin"],
    operation_id = "addTrain"
)]
#[post("/admin/add-train")]
pub async fn add_train(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: Result<web::Form<NewTrainForm>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    identity.require_admin()?;
    let train = guarded_form(form)?;
    state.admin.add_train(&identity, train.into()).await?;
    Ok(see_other(DASHBOARD_PATH))
}

/// Drop the admin flag. Safe to call without an admin session.
#[utoipa::path(
    get,
    path = "/admin/logout",
    responses((status = 303, description = "Admin logged out; continue to /")),
    tags = ["admin"],
    operation_id = "adminLogout"
)]
#[get("/admin/logout")]
pub async fn admin_logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let mut identity = session.identity()?;
    state.admin.admin_logout(&mut identity).await;
    session.store(&identity)?;
    Ok(see_other("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::{StatusCode, header::LOCATION};
    use actix_web::{App, test};
    use rstest::rstest;

    use crate::domain::ports::{MockAdminService, MockPassengerService};
    use crate::domain::{NewTrain, Train, TrainId};
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    fn state(admin: MockAdminService) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(MockPassengerService::new()),
            Arc::new(admin),
        ))
    }

    fn location<B>(res: &actix_web::dev::ServiceResponse<B>) -> Option<&str> {
        res.headers().get(LOCATION).and_then(|v| v.to_str().ok())
    }

    fn granting_admin(admin: &mut MockAdminService) {
        admin
            .expect_admin_authenticate()
            .times(1)
            .returning(|identity, _, _| {
                identity.grant_admin();
                Ok(())
            });
    }

    async fn admin_cookie<S>(app: &S) -> actix_web::cookie::Cookie<'static>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
            >,
    {
        let res = test::call_service(
            app,
            test::TestRequest::post()
                .uri("/admin/login")
                .set_form([("username", "admin"), ("password", "admin123")])
                .to_request(),
        )
        .await;
        session_cookie(&res).expect("admin session cookie")
    }

    fn train(name: &str) -> Train {
        Train::from_new(
            TrainId::new(format!("id-{name}")).expect("valid id"),
            NewTrain {
                name: name.to_owned(),
                source: "A".to_owned(),
                destination: "B".to_owned(),
                time: "10:00".to_owned(),
                price: "12".to_owned(),
            },
        )
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_login_then_dashboard_lists_trains() {
        let mut admin = MockAdminService::new();
        admin
            .expect_admin_authenticate()
            .withf(|_, username, password| username == "admin" && password == "admin123")
            .times(1)
            .returning(|identity, _, _| {
                identity.grant_admin();
                Ok(())
            });
        admin
            .expect_list_all_trains()
            .withf(|identity| identity.is_admin())
            .times(1)
            .returning(|_| Ok(vec![train("Express"), train("Local")]));
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state(admin))
                .configure(crate::inbound::http::configure),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/admin/login")
                .set_form([("username", "admin"), ("password", "admin123")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(DASHBOARD_PATH));
        let cookie = session_cookie(&res).expect("admin session cookie");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(DASHBOARD_PATH)
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Vec<TrainResponse> = test::read_body_json(res).await;
        let names: Vec<_> = body.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Express", "Local"]);
    }

    #[rstest]
    #[actix_web::test]
    async fn rejected_admin_login_leaves_no_session() {
        let mut admin = MockAdminService::new();
        admin
            .expect_admin_authenticate()
            .returning(|_, _, _| Err(Error::invalid_credentials("Invalid Admin")));
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state(admin))
                .configure(crate::inbound::http::configure),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/admin/login")
                .set_form([("username", "admin"), ("password", "nope")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(session_cookie(&res).is_none());
    }

    #[rstest]
    #[case("/admin/dashboard")]
    #[case("/admin/add-train")]
    #[actix_web::test]
    async fn guarded_pages_redirect_to_admin_login(#[case] uri: &str) {
        let mut admin = MockAdminService::new();
        admin
            .expect_list_all_trains()
            .returning(|identity| identity.require_admin().map(|()| Vec::new()));
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state(admin))
                .configure(crate::inbound::http::configure),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(ADMIN_LOGIN_PATH));
    }

    #[rstest]
    #[actix_web::test]
    async fn add_train_forwards_form_fields_verbatim() {
        let mut admin = MockAdminService::new();
        granting_admin(&mut admin);
        admin
            .expect_add_train()
            .withf(|_, train| {
                train.name == "Night Mail" && train.time == "23:40" && train.price == "forty"
            })
            .times(1)
            .returning(|_, train| Ok(Train::from_new(TrainId::random(), train)));
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state(admin))
                .configure(crate::inbound::http::configure),
        )
        .await;
        let cookie = admin_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(ADD_TRAIN_PATH)
                .cookie(cookie)
                .set_form([
                    ("name", "Night Mail"),
                    ("source", "London"),
                    ("destination", "Glasgow"),
                    ("time", "23:40"),
                    ("price", "forty"),
                ])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(DASHBOARD_PATH));
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_partial_add_train_redirects_before_form_validation() {
        let mut admin = MockAdminService::new();
        admin.expect_add_train().times(0);
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state(admin))
                .configure(crate::inbound::http::configure),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(ADD_TRAIN_PATH)
                .set_form([("name", "x")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(ADMIN_LOGIN_PATH));
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_partial_add_train_is_an_invalid_request() {
        let mut admin = MockAdminService::new();
        granting_admin(&mut admin);
        admin.expect_add_train().times(0);
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state(admin))
                .configure(crate::inbound::http::configure),
        )
        .await;
        let cookie = admin_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(ADD_TRAIN_PATH)
                .cookie(cookie)
                .set_form([("name", "x")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_logout_redirects_home_even_without_session() {
        let mut admin = MockAdminService::new();
        admin.expect_admin_logout().times(1).returning(|identity| {
            identity.revoke_admin();
        });
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state(admin))
                .configure(crate::inbound::http::configure),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/admin/logout").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/"));
    }
}
