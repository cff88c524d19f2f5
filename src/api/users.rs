use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use crate::database::{CollectionName, DocumentStore};
use crate::models::DocumentPolicy;
use crate::services::user_service;
use crate::utils::{ApiError, MessageResponse};

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Insert acknowledgement"),
        (status = 400, description = "Invalid body", body = MessageResponse)
    )
)]
pub async fn create_user(
    store: web::Data<dyn DocumentStore>,
    policy: web::Data<DocumentPolicy>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    log::info!("👤 POST /users");

    let user = policy.new_document(CollectionName::Users, body.into_inner())?;
    let ack = user_service::create_user(store.get_ref(), user).await?;
    log::info!("✅ User stored");
    Ok(HttpResponse::Ok().json(ack))
}
