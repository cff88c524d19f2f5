pub mod store;

#[cfg(test)]
pub mod memory;

pub use store::*;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database, IndexModel,
};

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the lookup indexes used by the per-user listings
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let indexes = [
            (BOOKINGS, "userUid"),
            (BOOKINGS, "serviceData.providerUid"),
            (SERVICES, "providerUid"),
        ];

        for (collection, field) in indexes {
            let index = IndexModel::builder().keys(doc! { field: 1 }).build();

            match self.db.collection::<Document>(collection).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}({})", collection, field),
                Err(e) => log::debug!("   ℹ️  Index not created for {}({}): {}", collection, field, e),
            }
        }

        log::info!("✅ Database indexes ready");
    }

    fn collection(&self, name: CollectionName) -> Collection<Document> {
        self.db.collection(name.as_str())
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn find(
        &self,
        collection: CollectionName,
        filter: Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        let collection = self.collection(collection);
        let mut action = collection.find(filter.to_document());
        if options.newest_first {
            action = action.sort(doc! { "_id": -1 });
        }
        if options.limit > 0 {
            action = action.limit(options.limit);
        }

        let cursor = action.await?;
        Ok(cursor.try_collect::<Vec<Document>>().await?)
    }

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(collection).find_one(filter.to_document()).await?)
    }

    async fn insert_one(
        &self,
        collection: CollectionName,
        document: Document,
    ) -> Result<InsertAck, StoreError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(InsertAck {
            acknowledged: true,
            inserted_id: result.inserted_id,
        })
    }

    async fn update_one(
        &self,
        collection: CollectionName,
        filter: Filter,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateAck, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter.to_document(), doc! { "$set": fields })
            .upsert(upsert)
            .await?;

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(result.upserted_id.is_some()),
            upserted_id: result.upserted_id,
        })
    }

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> Result<DeleteAck, StoreError> {
        let result = self.collection(collection).delete_one(filter.to_document()).await?;
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();

        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri, "booking_service_test").await;
        assert!(db.is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_find_sorted_and_limited() {
        dotenv::dotenv().ok();

        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri, "booking_service_test").await.unwrap();
        let uid = uuid::Uuid::new_v4().to_string();

        for n in 0..3 {
            db.insert_one(CollectionName::Bookings, doc! { "userUid": uid.as_str(), "n": n })
                .await
                .unwrap();
        }

        let found = db
            .find(
                CollectionName::Bookings,
                Filter::eq("userUid", uid.as_str()),
                FindOptions::newest_first().with_limit(2),
            )
            .await
            .unwrap();
        let order: Vec<i32> = found.iter().map(|d| d.get_i32("n").unwrap()).collect();
        assert_eq!(order, vec![2, 1]);
    }
}
