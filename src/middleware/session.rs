use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use crate::models::SESSION_COOKIE;
use crate::services::TokenCodec;
use crate::utils::ApiError;

/// Requires a valid session cookie. The verified `Identity` is stored in the
/// request extensions for the stages behind it.
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
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
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = match req
            .cookie(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
        {
            Some(token) => token,
            None => {
                log::warn!("🔒 {} {} - missing session cookie", req.method(), req.path());
                return reject(req, ApiError::unauthenticated());
            }
        };

        let codec = match req.app_data::<web::Data<TokenCodec>>() {
            Some(codec) => codec.clone(),
            None => {
                return reject(req, ApiError::Internal("token codec is not registered".to_string()));
            }
        };

        match codec.verify(&token) {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
            }
            Err(e) => {
                log::warn!("🔒 {} {} - session rejected: {}", req.method(), req.path(), e);
                return reject(req, ApiError::forbidden("Forbidden to access"));
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Answers the request directly; the wrapped service is never called.
pub(crate) fn reject<B: 'static>(
    req: ServiceRequest,
    error: ApiError,
) -> LocalBoxFuture<'static, Result<ServiceResponse<EitherBody<B>>, Error>> {
    let res = req.error_response(error).map_into_right_body();
    Box::pin(async move { Ok(res) })
}
