use std::future::{Ready, ready};

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use futures_util::future::LocalBoxFuture;
use log::debug;

use crate::errors::AppError;
use crate::state::app_state::AppState;
use crate::utils::cookies::SESSION_COOKIE;
use crate::utils::session::TokenKind;

/// Id of the logged-in user, placed in request extensions by `SessionAuth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub String);

impl AuthenticatedUser {
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Rejects the request with 401 unless `SessionAuth` recognised the caller.
/// Use `Option<AuthenticatedUser>` where anonymous access is allowed.
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(user.ok_or_else(|| AppError::unauthorized("Please log in to continue")))
    }
}

/// Resolves the session cookie to a user. Never rejects by itself; an absent,
/// forged or expired cookie just leaves the request anonymous.
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware { service }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(user_id) = resolve_user(&req) {
            req.extensions_mut().insert(AuthenticatedUser(user_id));
        }

        Box::pin(self.service.call(req))
    }
}

fn resolve_user(req: &ServiceRequest) -> Option<String> {
    let cookie = req.cookie(SESSION_COOKIE)?;
    let state = req.app_data::<web::Data<AppState>>()?;

    let claims = match state
        .sessions
        .validate_token(cookie.value(), TokenKind::Session)
    {
        Ok(claims) => claims,
        Err(e) => {
            debug!("Ignoring session cookie: {:#}", e);
            return None;
        }
    };

    // A token can outlive the user it names (the store is in memory)
    if state.users.get(&claims.sub).is_none() {
        debug!("Session names unknown user {}", claims.sub);
        return None;
    }

    Some(claims.sub)
}
