use actix_web::{
    cookie::{time::Duration, Cookie, CookieBuilder, SameSite},
    web, HttpResponse,
};

use crate::models::{Identity, SuccessResponse, SESSION_COOKIE};
use crate::services::TokenCodec;
use crate::utils::{ApiError, MessageResponse};

/// Attributes of the session cookie. Production deployments serve the frontend
/// from another site, so the cookie must be `Secure; SameSite=None` there.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    pub production: bool,
}

impl CookiePolicy {
    pub fn new(production: bool) -> Self {
        Self { production }
    }

    pub fn session(&self, token: String) -> Cookie<'static> {
        self.builder(token).finish()
    }

    pub fn cleared(&self) -> Cookie<'static> {
        self.builder(String::new()).max_age(Duration::ZERO).finish()
    }

    fn builder(&self, value: String) -> CookieBuilder<'static> {
        let same_site = if self.production { SameSite::None } else { SameSite::Strict };

        Cookie::build(SESSION_COOKIE, value)
            .path("/")
            .http_only(true)
            .secure(self.production)
            .same_site(same_site)
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = Identity,
    responses(
        (status = 200, description = "Session cookie set", body = SuccessResponse),
        (status = 400, description = "Invalid login body", body = MessageResponse)
    )
)]
pub async fn login(
    codec: web::Data<TokenCodec>,
    cookies: web::Data<CookiePolicy>,
    request: web::Json<Identity>,
) -> Result<HttpResponse, ApiError> {
    let identity = request.into_inner();
    log::info!("🔐 POST /login - uid: {}", identity.uid);

    if identity.uid.trim().is_empty() {
        return Err(ApiError::bad_request("uid must not be empty"));
    }

    let token = codec
        .issue(&identity)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    log::info!("✅ Session issued: {}", identity.uid);
    Ok(HttpResponse::Ok()
        .cookie(cookies.session(token))
        .json(SuccessResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = SuccessResponse)
    )
)]
pub async fn logout(cookies: web::Data<CookiePolicy>) -> HttpResponse {
    log::info!("👋 POST /logout");

    HttpResponse::Ok()
        .cookie(cookies.cleared())
        .json(SuccessResponse::ok())
}
