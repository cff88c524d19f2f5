use mongodb::bson::{oid::ObjectId, Document};

use crate::database::{
    CollectionName, DeleteAck, DocumentStore, Filter, FindOptions, InsertAck, UpdateAck,
};
use crate::utils::ApiError;

const NAME_FIELD: &str = "service_name";
const PROVIDER_FIELD: &str = "providerUid";

/// Services newest first, optionally narrowed to names containing `search`.
/// A `limit` of zero returns everything.
pub async fn list_services(
    store: &dyn DocumentStore,
    search: Option<&str>,
    limit: i64,
) -> Result<Vec<Document>, ApiError> {
    let filter = match search.map(str::trim) {
        Some(term) if !term.is_empty() => Filter::contains(NAME_FIELD, term),
        _ => Filter::All,
    };

    let services = store
        .find(
            CollectionName::Services,
            filter,
            FindOptions::newest_first().with_limit(limit),
        )
        .await?;
    Ok(services)
}

pub async fn get_service(store: &dyn DocumentStore, id: ObjectId) -> Result<Document, ApiError> {
    store
        .find_one(CollectionName::Services, Filter::Id(id))
        .await?
        .ok_or_else(|| ApiError::not_found("service not found"))
}

pub async fn services_by_provider(
    store: &dyn DocumentStore,
    provider_uid: &str,
) -> Result<Vec<Document>, ApiError> {
    let services = store
        .find(
            CollectionName::Services,
            Filter::eq(PROVIDER_FIELD, provider_uid),
            FindOptions::default(),
        )
        .await?;
    Ok(services)
}

pub async fn add_service(store: &dyn DocumentStore, service: Document) -> Result<InsertAck, ApiError> {
    Ok(store.insert_one(CollectionName::Services, service).await?)
}

/// `$set` the given fields, creating the service under `id` when it does not exist.
pub async fn upsert_service(
    store: &dyn DocumentStore,
    id: ObjectId,
    fields: Document,
) -> Result<UpdateAck, ApiError> {
    Ok(store
        .update_one(CollectionName::Services, Filter::Id(id), fields, true)
        .await?)
}

pub async fn delete_service(store: &dyn DocumentStore, id: ObjectId) -> Result<DeleteAck, ApiError> {
    Ok(store.delete_one(CollectionName::Services, Filter::Id(id)).await?)
}

pub async fn list_marquee(store: &dyn DocumentStore) -> Result<Vec<Document>, ApiError> {
    let entries = store
        .find(CollectionName::Marquee, Filter::All, FindOptions::default())
        .await?;
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_blank_search_lists_everything() {
        let store = MemoryStore::new();
        store.seed(
            CollectionName::Services,
            vec![doc! { "service_name": "Roofing" }, doc! { "service_name": "Painting" }],
        );

        let all = list_services(&store, Some("   "), 0).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].get_str("service_name").unwrap(), "Painting");
    }

    #[tokio::test]
    async fn test_search_is_trimmed_and_literal() {
        let store = MemoryStore::new();
        store.seed(
            CollectionName::Services,
            vec![doc! { "service_name": "A.C. repair" }, doc! { "service_name": "ABC repair" }],
        );

        let found = list_services(&store, Some("  a.c. "), 0).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_str("service_name").unwrap(), "A.C. repair");
    }

    #[tokio::test]
    async fn test_missing_service_is_not_found() {
        let store = MemoryStore::new();
        let err = get_service(&store, ObjectId::new()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
