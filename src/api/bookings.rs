use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::database::{CollectionName, DocumentStore};
use crate::models::{parse_object_id, DocumentPolicy};
use crate::services::booking_service;
use crate::utils::{documents_to_json, ApiError, MessageResponse};

/// Sits behind `SessionAuth` and `OwnershipGuard`.
#[utoipa::path(
    get,
    path = "/booked-services/{uid}",
    tag = "Bookings",
    params(("uid" = String, Path, description = "Uid of the booking user")),
    responses(
        (status = 200, description = "The user's bookings, newest first"),
        (status = 401, description = "No session cookie", body = MessageResponse),
        (status = 403, description = "Invalid session or another user's data", body = MessageResponse)
    )
)]
pub async fn booked_services(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let uid = path.into_inner();
    log::info!("📅 GET /booked-services/{}", uid);

    let bookings = booking_service::bookings_for_user(store.get_ref(), &uid).await?;
    log::info!("✅ Bookings found: {}", bookings.len());
    Ok(HttpResponse::Ok().json(documents_to_json(bookings)))
}

/// Sits behind `SessionAuth` and `OwnershipGuard`.
#[utoipa::path(
    get,
    path = "/services-todo/{uid}",
    tag = "Bookings",
    params(("uid" = String, Path, description = "Uid of the providing user")),
    responses(
        (status = 200, description = "Bookings of the provider's services, newest first"),
        (status = 401, description = "No session cookie", body = MessageResponse),
        (status = 403, description = "Invalid session or another user's data", body = MessageResponse)
    )
)]
pub async fn services_todo(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let uid = path.into_inner();
    log::info!("🛠️ GET /services-todo/{}", uid);

    let bookings = booking_service::bookings_for_provider(store.get_ref(), &uid).await?;
    log::info!("✅ To-do bookings found: {}", bookings.len());
    Ok(HttpResponse::Ok().json(documents_to_json(bookings)))
}

#[utoipa::path(
    post,
    path = "/book-service",
    tag = "Bookings",
    responses(
        (status = 200, description = "Insert acknowledgement"),
        (status = 400, description = "Invalid body", body = MessageResponse)
    )
)]
pub async fn book_service(
    store: web::Data<dyn DocumentStore>,
    policy: web::Data<DocumentPolicy>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    log::info!("📝 POST /book-service");

    let booking = policy.new_document(CollectionName::Bookings, body.into_inner())?;
    let ack = booking_service::book_service(store.get_ref(), booking).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    patch,
    path = "/services-todo/{id}",
    tag = "Bookings",
    params(("id" = String, Path, description = "Booking id (24 hex characters)")),
    responses(
        (status = 200, description = "Update acknowledgement, with upsertedId when created"),
        (status = 400, description = "Malformed id or body", body = MessageResponse)
    )
)]
pub async fn update_booking(
    store: web::Data<dyn DocumentStore>,
    policy: web::Data<DocumentPolicy>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    log::info!("🔧 PATCH /services-todo/{}", path);

    let id = parse_object_id(&path)?;
    let fields = policy.update_fields(body.into_inner())?;
    let ack = booking_service::update_booking(store.get_ref(), id, fields).await?;
    Ok(HttpResponse::Ok().json(ack))
}
