use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::models::SESSION_COOKIE;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Booking Service API",
        version = "1.0.0",
        description = "Service catalog, bookings and users for the service-booking web app.\n\n**Authentication:** `POST /login` sets the `myToken` session cookie. Per-user booking listings require that cookie and only return the caller's own data."
    ),
    paths(
        // Auth
        crate::api::auth::login,
        crate::api::auth::logout,

        // Health
        crate::api::health::health_check,

        // Services
        crate::api::services::list_services,
        crate::api::services::get_service,
        crate::api::services::manage_services,
        crate::api::services::list_marquee,
        crate::api::services::add_service,
        crate::api::services::put_service,
        crate::api::services::delete_service,

        // Bookings
        crate::api::bookings::booked_services,
        crate::api::bookings::services_todo,
        crate::api::bookings::book_service,
        crate::api::bookings::update_booking,

        // Users
        crate::api::users::create_user,
    ),
    components(
        schemas(
            crate::models::Identity,
            crate::models::SuccessResponse,
            crate::utils::MessageResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Session cookie issue and removal."),
        (name = "Health", description = "Liveness endpoint."),
        (name = "Services", description = "Service catalog: listing, search, details and provider management."),
        (name = "Bookings", description = "Bookings made by users and received by providers."),
        (name = "Users", description = "User profile documents."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}
