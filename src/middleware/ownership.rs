use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};

use super::session::reject;
use crate::models::Identity;
use crate::utils::ApiError;

/// Path parameter naming the owner of the requested resource
pub const OWNER_PARAM: &str = "uid";

/// Lets the request through only when the session identity owns the `{uid}`
/// in the path. Must sit behind `SessionAuth`.
pub struct OwnershipGuard;

impl<S, B> Transform<S, ServiceRequest> for OwnershipGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = OwnershipGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OwnershipGuardMiddleware { service }))
    }
}

pub struct OwnershipGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for OwnershipGuardMiddleware<S>
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
        let session_uid = req.extensions().get::<Identity>().map(|identity| identity.uid.clone());
        let path_uid = req.match_info().get(OWNER_PARAM);

        let owns = matches!((session_uid.as_deref(), path_uid), (Some(a), Some(b)) if a == b);
        if !owns {
            log::warn!(
                "🚫 {} {} - session {:?} does not own this resource",
                req.method(),
                req.path(),
                session_uid
            );
            return reject(req, ApiError::forbidden("Access to another user's data is forbidden"));
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}
