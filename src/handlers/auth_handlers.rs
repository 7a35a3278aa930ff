use actix_web::{Either, HttpResponse, Result, web};
use log::{info, warn};
use validator::Validate;

use crate::errors::AppError;
use crate::handlers::{html_page, redirect};
use crate::middlewares::authmw::AuthenticatedUser;
use crate::models::user::User;
use crate::state::app_state::AppState;
use crate::structs::user::{LoginRequest, RegisterRequest};
use crate::utils::session::TokenKind;
use crate::views::{LOGIN_PAGE, REGISTER_PAGE};

pub async fn login_form(user: Option<AuthenticatedUser>) -> HttpResponse {
    match user {
        Some(_) => redirect("/urls").finish(),
        None => html_page(LOGIN_PAGE),
    }
}

pub async fn register_form(user: Option<AuthenticatedUser>) -> HttpResponse {
    match user {
        Some(_) => redirect("/urls").finish(),
        None => html_page(REGISTER_PAGE),
    }
}

pub async fn login(
    app_state: web::Data<AppState>,
    body: Either<web::Form<LoginRequest>, web::Json<LoginRequest>>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();

    let user = app_state
        .users
        .verify(&req.email, &req.password)
        .inspect_err(|e| {
            if let AppError::Auth(reason) = e {
                warn!("Rejected login for {}: {}", req.email, reason);
            }
        })?;

    info!("User {} logged in", user.id);
    start_session(&app_state, &user)
}

pub async fn register(
    app_state: web::Data<AppState>,
    body: Either<web::Form<RegisterRequest>, web::Json<RegisterRequest>>,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    req.validate()?;

    let user = app_state.users.create(&req.email, &req.password)?;

    start_session(&app_state, &user)
}

pub async fn logout(app_state: web::Data<AppState>) -> HttpResponse {
    redirect("/login")
        .cookie(app_state.cookies.build_expired_session_cookie())
        .finish()
}

fn start_session(app_state: &AppState, user: &User) -> Result<HttpResponse, AppError> {
    let token = app_state.sessions.create_token(&user.id, TokenKind::Session)?;

    Ok(redirect("/urls")
        .cookie(app_state.cookies.build_session_cookie(token))
        .finish())
}
