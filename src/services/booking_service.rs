use mongodb::bson::{oid::ObjectId, Document};

use crate::database::{CollectionName, DocumentStore, Filter, FindOptions, InsertAck, UpdateAck};
use crate::utils::ApiError;

const USER_FIELD: &str = "userUid";
const PROVIDER_FIELD: &str = "serviceData.providerUid";

/// Bookings made by `user_uid`, newest first
pub async fn bookings_for_user(
    store: &dyn DocumentStore,
    user_uid: &str,
) -> Result<Vec<Document>, ApiError> {
    let bookings = store
        .find(
            CollectionName::Bookings,
            Filter::eq(USER_FIELD, user_uid),
            FindOptions::newest_first(),
        )
        .await?;
    Ok(bookings)
}

/// Bookings of services offered by `provider_uid`, newest first
pub async fn bookings_for_provider(
    store: &dyn DocumentStore,
    provider_uid: &str,
) -> Result<Vec<Document>, ApiError> {
    let bookings = store
        .find(
            CollectionName::Bookings,
            Filter::eq(PROVIDER_FIELD, provider_uid),
            FindOptions::newest_first(),
        )
        .await?;
    Ok(bookings)
}

pub async fn book_service(store: &dyn DocumentStore, booking: Document) -> Result<InsertAck, ApiError> {
    Ok(store.insert_one(CollectionName::Bookings, booking).await?)
}

pub async fn update_booking(
    store: &dyn DocumentStore,
    id: ObjectId,
    fields: Document,
) -> Result<UpdateAck, ApiError> {
    Ok(store
        .update_one(CollectionName::Bookings, Filter::Id(id), fields, true)
        .await?)
}
