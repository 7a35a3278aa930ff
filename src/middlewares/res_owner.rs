use std::future::{Ready, ready};

use actix_web::{
    Error, HttpMessage, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use futures_util::future::LocalBoxFuture;

use crate::errors::AppError;
use crate::middlewares::authmw::AuthenticatedUser;
use crate::state::app_state::AppState;

/// Guards a link resource so only its owner reaches the handler.
///
/// Answers 401 for anonymous callers, 404 for an unknown alias and 403 when
/// the link belongs to someone else.
pub struct LinkOwnership {
    pub param_name: String, // Name of the path parameter that holds the alias
}

impl<S, B> Transform<S, ServiceRequest> for LinkOwnership
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = LinkOwnershipMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LinkOwnershipMiddleware {
            service,
            param_name: self.param_name.clone(),
        }))
    }
}

pub struct LinkOwnershipMiddleware<S> {
    service: S,
    param_name: String,
}

impl<S> LinkOwnershipMiddleware<S> {
    fn check(&self, req: &ServiceRequest) -> Result<(), AppError> {
        let current_user = req
            .extensions()
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Please log in to continue"))?;

        // No alias in the path: nothing to guard
        let Some(alias) = req.match_info().get(&self.param_name) else {
            return Ok(());
        };

        let state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("AppState not configured")))?;

        state
            .links
            .read()
            .check_owner(alias, current_user.id())
            .map(|_| ())
    }
}

impl<S, B> Service<ServiceRequest> for LinkOwnershipMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Err(e) = self.check(&req) {
            let response = e.error_response().map_into_right_body();
            return Box::pin(async move { Ok(req.into_response(response)) });
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}
