//! In-process `DocumentStore` used by the HTTP tests.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::store::*;
use crate::models::lookup_path;

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<CollectionName, Vec<Document>>>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Inserts documents directly, without counting as calls. Returns their ids.
    pub fn seed(&self, collection: CollectionName, docs: Vec<Document>) -> Vec<ObjectId> {
        let mut collections = self.collections.lock().unwrap();
        let entries = collections.entry(collection).or_default();
        docs.into_iter()
            .map(|mut doc| {
                let id = ObjectId::new();
                doc.insert("_id", id);
                entries.push(doc);
                id
            })
            .collect()
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn matches(doc: &Document, filter: &Filter) -> bool {
    match filter {
        Filter::All => true,
        Filter::Id(id) => doc.get("_id") == Some(&Bson::ObjectId(*id)),
        Filter::Eq(path, value) => lookup_path(doc, path).and_then(Bson::as_str) == Some(value.as_str()),
        Filter::Contains(path, needle) => lookup_path(doc, path)
            .and_then(Bson::as_str)
            .map(|s| s.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(
        &self,
        collection: CollectionName,
        filter: Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        self.touch();
        let collections = self.collections.lock().unwrap();
        let mut found: Vec<Document> = collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| matches(d, &filter)).cloned().collect())
            .unwrap_or_default();

        if options.newest_first {
            found.sort_by(|a, b| b.get_object_id("_id").ok().cmp(&a.get_object_id("_id").ok()));
        }
        if options.limit > 0 {
            found.truncate(options.limit as usize);
        }
        Ok(found)
    }

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        self.touch();
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn insert_one(
        &self,
        collection: CollectionName,
        mut document: Document,
    ) -> Result<InsertAck, StoreError> {
        self.touch();
        let inserted_id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };

        self.collections
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(document);

        Ok(InsertAck { acknowledged: true, inserted_id })
    }

    async fn update_one(
        &self,
        collection: CollectionName,
        filter: Filter,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateAck, StoreError> {
        self.touch();
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection).or_default();

        if let Some(existing) = docs.iter_mut().find(|d| matches(d, &filter)) {
            let mut modified = false;
            for (key, value) in fields {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_id: None,
                upserted_count: 0,
            });
        }

        if !upsert {
            return Ok(UpdateAck {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_id: None,
                upserted_count: 0,
            });
        }

        let id = match filter {
            Filter::Id(id) => id,
            _ => ObjectId::new(),
        };
        let mut document = Document::new();
        document.insert("_id", id);
        for (key, value) in fields {
            document.insert(key, value);
        }
        docs.push(document);

        Ok(UpdateAck {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(Bson::ObjectId(id)),
            upserted_count: 1,
        })
    }

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> Result<DeleteAck, StoreError> {
        self.touch();
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection).or_default();

        let deleted_count = match docs.iter().position(|d| matches(d, &filter)) {
            Some(index) => {
                docs.remove(index);
                1
            }
            None => 0,
        };

        Ok(DeleteAck { acknowledged: true, deleted_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_find_filters_sorts_and_limits() {
        let store = MemoryStore::new();
        store.seed(
            CollectionName::Services,
            vec![
                doc! { "service_name": "Pipe Plumbing" },
                doc! { "service_name": "Roofing" },
                doc! { "service_name": "Emergency PLUMBER" },
                doc! { "service_name": "plumbing inspection" },
            ],
        );

        let found = store
            .find(
                CollectionName::Services,
                Filter::contains("service_name", "plumb"),
                FindOptions::newest_first().with_limit(2),
            )
            .await
            .unwrap();

        let names: Vec<&str> = found.iter().map(|d| d.get_str("service_name").unwrap()).collect();
        assert_eq!(names, vec!["plumbing inspection", "Emergency PLUMBER"]);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_nested_equality() {
        let store = MemoryStore::new();
        store.seed(
            CollectionName::Bookings,
            vec![
                doc! { "userUid": "u1", "serviceData": { "providerUid": "p1" } },
                doc! { "userUid": "u2", "serviceData": { "providerUid": "p2" } },
            ],
        );

        let found = store
            .find(
                CollectionName::Bookings,
                Filter::eq("serviceData.providerUid", "p2"),
                FindOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get_str("userUid").unwrap(), "u2");
    }

    #[tokio::test]
    async fn test_upsert_then_update() {
        let store = MemoryStore::new();
        let id = ObjectId::new();

        let ack = store
            .update_one(CollectionName::Services, Filter::Id(id), doc! { "price": 10 }, true)
            .await
            .unwrap();
        assert_eq!(ack.upserted_id, Some(Bson::ObjectId(id)));

        let ack = store
            .update_one(CollectionName::Services, Filter::Id(id), doc! { "price": 12 }, true)
            .await
            .unwrap();
        assert_eq!((ack.matched_count, ack.modified_count, ack.upserted_count), (1, 1, 0));

        let doc = store
            .find_one(CollectionName::Services, Filter::Id(id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.get_i32("price").unwrap(), 12);
    }
}
