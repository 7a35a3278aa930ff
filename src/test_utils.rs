//! Helpers for exercising the full route table in-process.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, http::header, test, web};

use crate::config::Config;
use crate::middlewares::authmw::SessionAuth;
use crate::routes::init_routes;
use crate::state::app_state::AppState;

pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(&Config::for_tests()))
}

pub fn test_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(SessionAuth)
        .app_data(state)
        .configure(init_routes)
}

pub fn location(response: &ServiceResponse) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
        .to_string()
}

pub fn response_cookie(response: &ServiceResponse, name: &str) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.into_owned())
}

/// Register through the form endpoint and hand back the session cookie.
pub async fn register_user(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> Cookie<'static> {
    let request = test::TestRequest::post()
        .uri("/register")
        .set_form([("email", email), ("password", password)])
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), 302, "registration of {email} failed");

    response_cookie(&response, crate::utils::cookies::SESSION_COOKIE).expect("session cookie")
}

/// Create a link as the holder of `session` and return its alias.
pub async fn create_link(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    session: &Cookie<'static>,
    long_url: &str,
) -> String {
    let request = test::TestRequest::post()
        .uri("/urls")
        .cookie(session.clone())
        .set_form([("longURL", long_url)])
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), 302);

    location(&response)
        .strip_prefix("/urls/")
        .expect("redirect to the new link")
        .to_string()
}
