use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::verify_token;
use crate::config::AuthConfig;
use crate::error::AppError;

/// Bearer-token authentication for the `/api` scope.
///
/// The `Authorization` header must be exactly `Bearer <token>`. A missing or
/// malformed header yields 401; a token that fails signature or expiry checks
/// yields 403. On success the decoded `Claims` are inserted into request
/// extensions for the `AuthenticatedUser` extractor.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
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
        // Registration and login are the only public routes inside the scope.
        if req.path().starts_with("/api/auth/") {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let auth_config = match req.app_data::<web::Data<AuthConfig>>() {
            Some(cfg) => cfg.clone(),
            None => {
                let app_err =
                    AppError::InternalServerError("Auth configuration not registered".into());
                return Box::pin(async move { Err(app_err.into()) });
            }
        };

        let header_value = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok());

        let header_value = match header_value {
            Some(value) => value,
            None => {
                let app_err = AppError::Unauthorized("Authorization header missing".into());
                return Box::pin(async move { Err(app_err.into()) });
            }
        };

        // Exactly two parts, the first being the literal "Bearer".
        let mut parts = header_value.split_whitespace();
        let token = match (parts.next(), parts.next(), parts.next()) {
            (Some("Bearer"), Some(token), None) => token,
            _ => {
                let app_err = AppError::Unauthorized("Authorization header malformed".into());
                return Box::pin(async move { Err(app_err.into()) });
            }
        };

        match verify_token(&auth_config, token) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
        }
    }
}
