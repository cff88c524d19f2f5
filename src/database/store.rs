use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use serde::Serialize;
use thiserror::Error;

use crate::utils::escape_regex;

pub const USERS: &str = "users";
pub const SERVICES: &str = "services";
pub const BOOKINGS: &str = "bookings";
pub const MARQUEE: &str = "marquee_services";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Users,
    Services,
    Bookings,
    Marquee,
}

impl CollectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Users => USERS,
            CollectionName::Services => SERVICES,
            CollectionName::Bookings => BOOKINGS,
            CollectionName::Marquee => MARQUEE,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Driver(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        StoreError::Driver(e.to_string())
    }
}

/// The only filter shapes the handlers issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    Id(ObjectId),
    /// Equality on a (possibly dotted) field path.
    Eq(String, String),
    /// Case-insensitive literal substring match on a field.
    Contains(String, String),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<String>) -> Self {
        Filter::Eq(field.to_string(), value.into())
    }

    pub fn contains(field: &str, needle: impl Into<String>) -> Self {
        Filter::Contains(field.to_string(), needle.into())
    }

    pub fn to_document(&self) -> Document {
        match self {
            Filter::All => Document::new(),
            Filter::Id(id) => doc! { "_id": *id },
            Filter::Eq(field, value) => doc! { field.as_str(): value.as_str() },
            Filter::Contains(field, needle) => doc! {
                field.as_str(): { "$regex": escape_regex(needle), "$options": "i" }
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FindOptions {
    /// Sort by `_id` descending, i.e. newest insert first.
    pub newest_first: bool,
    /// Zero means unlimited.
    pub limit: i64,
}

impl FindOptions {
    pub fn newest_first() -> Self {
        Self { newest_first: true, limit: 0 }
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    #[serde(serialize_with = "serialize_bson")]
    pub inserted_id: Bson,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    #[serde(serialize_with = "serialize_optional_bson")]
    pub upserted_id: Option<Bson>,
    pub upserted_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

fn serialize_bson<S: serde::Serializer>(value: &Bson, serializer: S) -> Result<S::Ok, S::Error> {
    crate::utils::bson_to_json(value.clone()).serialize(serializer)
}

fn serialize_optional_bson<S: serde::Serializer>(
    value: &Option<Bson>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    value
        .clone()
        .map(crate::utils::bson_to_json)
        .serialize(serializer)
}

/// Document collection access used by the route handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(
        &self,
        collection: CollectionName,
        filter: Filter,
        options: FindOptions,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError>;

    async fn insert_one(
        &self,
        collection: CollectionName,
        document: Document,
    ) -> Result<InsertAck, StoreError>;

    /// `updateOne(filter, { $set: fields }, { upsert })`
    async fn update_one(
        &self,
        collection: CollectionName,
        filter: Filter,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateAck, StoreError>;

    async fn delete_one(
        &self,
        collection: CollectionName,
        filter: Filter,
    ) -> Result<DeleteAck, StoreError>;
}
