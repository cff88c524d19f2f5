use mongodb::bson::Document;

use crate::database::{CollectionName, DocumentStore, InsertAck};
use crate::utils::ApiError;

pub async fn create_user(store: &dyn DocumentStore, user: Document) -> Result<InsertAck, ApiError> {
    Ok(store.insert_one(CollectionName::Users, user).await?)
}
