use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::database::{CollectionName, DocumentStore};
use crate::models::{parse_object_id, DocumentPolicy};
use crate::services::catalog_service;
use crate::utils::{document_to_json, documents_to_json, ApiError, MessageResponse};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServiceListQuery {
    /// Case-insensitive substring of the service name
    pub search: Option<String>,
    /// Maximum number of results; 0 or absent means unlimited
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/services",
    tag = "Services",
    params(ServiceListQuery),
    responses(
        (status = 200, description = "Services, newest first"),
        (status = 400, description = "Invalid query", body = MessageResponse)
    )
)]
pub async fn list_services(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<ServiceListQuery>,
) -> Result<HttpResponse, ApiError> {
    log::info!("🔎 GET /services - search: {:?}, limit: {:?}", query.search, query.limit);

    let limit = query.limit.unwrap_or(0);
    if limit < 0 {
        return Err(ApiError::bad_request("limit must not be negative"));
    }

    let services = catalog_service::list_services(store.get_ref(), query.search.as_deref(), limit).await?;
    log::info!("✅ Services listed: {}", services.len());
    Ok(HttpResponse::Ok().json(documents_to_json(services)))
}

#[utoipa::path(
    get,
    path = "/services/detail/{id}",
    tag = "Services",
    params(("id" = String, Path, description = "Service id (24 hex characters)")),
    responses(
        (status = 200, description = "The service"),
        (status = 400, description = "Malformed id", body = MessageResponse),
        (status = 404, description = "Service not found", body = MessageResponse)
    )
)]
pub async fn get_service(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    log::info!("📄 GET /services/detail/{}", path);

    let id = parse_object_id(&path)?;
    let service = catalog_service::get_service(store.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(document_to_json(service)))
}

#[utoipa::path(
    get,
    path = "/manage-services/{uid}",
    tag = "Services",
    params(("uid" = String, Path, description = "Provider uid")),
    responses((status = 200, description = "Services offered by the provider"))
)]
pub async fn manage_services(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let provider_uid = path.into_inner();
    log::info!("🧰 GET /manage-services/{}", provider_uid);

    let services = catalog_service::services_by_provider(store.get_ref(), &provider_uid).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(services)))
}

#[utoipa::path(
    get,
    path = "/services/marquee",
    tag = "Services",
    responses((status = 200, description = "All marquee entries"))
)]
pub async fn list_marquee(store: web::Data<dyn DocumentStore>) -> Result<HttpResponse, ApiError> {
    log::info!("🎞️ GET /services/marquee");

    let entries = catalog_service::list_marquee(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(entries)))
}

#[utoipa::path(
    post,
    path = "/add-service",
    tag = "Services",
    responses(
        (status = 200, description = "Insert acknowledgement"),
        (status = 400, description = "Invalid body", body = MessageResponse)
    )
)]
pub async fn add_service(
    store: web::Data<dyn DocumentStore>,
    policy: web::Data<DocumentPolicy>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    log::info!("➕ POST /add-service");

    let service = policy.new_document(CollectionName::Services, body.into_inner())?;
    let ack = catalog_service::add_service(store.get_ref(), service).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    put,
    path = "/services/put/{id}",
    tag = "Services",
    params(("id" = String, Path, description = "Service id (24 hex characters)")),
    responses(
        (status = 200, description = "Update acknowledgement, with upsertedId when created"),
        (status = 400, description = "Malformed id or body", body = MessageResponse)
    )
)]
pub async fn put_service(
    store: web::Data<dyn DocumentStore>,
    policy: web::Data<DocumentPolicy>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    log::info!("✏️ PUT /services/put/{}", path);

    let id = parse_object_id(&path)?;
    let fields = policy.update_fields(body.into_inner())?;
    let ack = catalog_service::upsert_service(store.get_ref(), id, fields).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[utoipa::path(
    delete,
    path = "/services/delete/{id}",
    tag = "Services",
    params(("id" = String, Path, description = "Service id (24 hex characters)")),
    responses(
        (status = 200, description = "Delete acknowledgement"),
        (status = 400, description = "Malformed id", body = MessageResponse)
    )
)]
pub async fn delete_service(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    log::info!("🗑️ DELETE /services/delete/{}", path);

    let id = parse_object_id(&path)?;
    let ack = catalog_service::delete_service(store.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(ack))
}
