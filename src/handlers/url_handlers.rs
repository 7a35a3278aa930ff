use actix_web::{Either, HttpRequest, HttpResponse, Result, web};
use log::{debug, info};
use validator::Validate;

use crate::errors::AppError;
use crate::handlers::{html_page, redirect};
use crate::middlewares::authmw::AuthenticatedUser;
use crate::state::app_state::AppState;
use crate::structs::url_request::{UrlRequest, UrlResponse};
use crate::utils::cookies::VISITOR_COOKIE;
use crate::utils::id_gen::generate_id;
use crate::utils::session::TokenKind;
use crate::views::NEW_URL_PAGE;

type UrlBody = Either<web::Form<UrlRequest>, web::Json<UrlRequest>>;

pub async fn index(user: Option<AuthenticatedUser>) -> HttpResponse {
    match user {
        Some(_) => redirect("/urls").finish(),
        None => redirect("/login").finish(),
    }
}

/// List the caller's own URLs with their visit counts
pub async fn get_user_urls(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> HttpResponse {
    let urls: Vec<UrlResponse> = app_state
        .links
        .read()
        .list_by_owner(user.id())
        .values()
        .map(UrlResponse::from)
        .collect();

    HttpResponse::Ok().json(urls)
}

pub async fn new_url_form(user: Option<AuthenticatedUser>) -> HttpResponse {
    match user {
        Some(_) => html_page(NEW_URL_PAGE),
        None => redirect("/login").finish(),
    }
}

/// Create a shortened URL
pub async fn create_short_url(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: UrlBody,
) -> Result<HttpResponse, AppError> {
    let req = body.into_inner();
    req.validate()?;

    let link = app_state.links.write().create(user.id(), &req.long_url);
    info!(
        "User {} shortened {} as {}",
        user.id(),
        link.long_url,
        link.alias
    );

    Ok(redirect(&format!("/urls/{}", link.alias)).finish())
}

/// Show one URL with its analytics. Ownership is enforced by `LinkOwnership`
/// and re-checked by the store.
pub async fn get_url(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let alias = path.into_inner();
    let links = app_state.links.read();
    let link = links.check_owner(&alias, user.id())?;

    Ok(HttpResponse::Ok().json(UrlResponse::from(link)))
}

pub async fn update_short_url(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    body: UrlBody,
) -> Result<HttpResponse, AppError> {
    let alias = path.into_inner();
    let req = body.into_inner();
    req.validate()?;

    app_state
        .links
        .write()
        .update_target(&alias, user.id(), &req.long_url)?;
    info!("User {} pointed {} at {}", user.id(), alias, req.long_url);

    Ok(redirect("/urls").finish())
}

pub async fn delete_short_url(
    app_state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let alias = path.into_inner();
    app_state.links.write().delete(&alias, user.id())?;
    info!("User {} deleted {}", user.id(), alias);

    Ok(redirect("/urls").finish())
}

/// Redirect to original URL, counting the visit
pub async fn redirect_to_url(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let alias = path.into_inner();

    // Reuse the browser's visitor id when it carries a valid one
    let known_visitor = req.cookie(VISITOR_COOKIE).and_then(|cookie| {
        app_state
            .sessions
            .validate_token(cookie.value(), TokenKind::Visitor)
            .inspect_err(|e| debug!("Ignoring visitor cookie: {:#}", e))
            .ok()
            .map(|claims| claims.sub)
    });
    let visitor_id = known_visitor.clone().unwrap_or_else(generate_id);

    let outcome = app_state.links.write().record_visit(&alias, &visitor_id)?;
    debug!(
        "Redirecting {} to {} (first visit: {})",
        alias, outcome.long_url, outcome.first_visit
    );

    let mut response = redirect(&outcome.long_url);
    if known_visitor.is_none() {
        let token = app_state
            .sessions
            .create_token(&visitor_id, TokenKind::Visitor)?;
        response.cookie(app_state.cookies.build_visitor_cookie(token));
    }

    Ok(response.finish())
}
