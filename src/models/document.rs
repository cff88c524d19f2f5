use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use serde_json::{Map, Value};

use crate::database::CollectionName;
use crate::utils::ApiError;

/// Fields an insert must carry when strict validation is switched on
fn required_fields(collection: CollectionName) -> &'static [&'static str] {
    match collection {
        CollectionName::Users => &["uid"],
        CollectionName::Services => &["service_name", "providerUid"],
        CollectionName::Bookings => &["userUid", "serviceData.providerUid"],
        CollectionName::Marquee => &[],
    }
}

/// Boundary checks applied to client-supplied documents before they reach the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentPolicy {
    pub strict: bool,
}

impl DocumentPolicy {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Body of an insert. Stored verbatim unless strict mode finds a missing field.
    pub fn new_document(
        &self,
        collection: CollectionName,
        body: Map<String, Value>,
    ) -> Result<Document, ApiError> {
        let doc = to_document(body)?;

        if self.strict {
            for field in required_fields(collection) {
                match lookup_path(&doc, field) {
                    Some(Bson::Null) | None => {
                        return Err(ApiError::bad_request(format!("Missing required field: {}", field)));
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(doc)
    }

    /// Body of a `$set` update. Must be non-empty and must not touch `_id`.
    pub fn update_fields(&self, body: Map<String, Value>) -> Result<Document, ApiError> {
        if body.is_empty() {
            return Err(ApiError::bad_request("Update body must contain at least one field"));
        }
        if body.contains_key("_id") {
            return Err(ApiError::bad_request("The _id field cannot be updated"));
        }
        to_document(body)
    }
}

pub fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid id: {}", raw)))
}

fn to_document(body: Map<String, Value>) -> Result<Document, ApiError> {
    bson::to_document(&body).map_err(|e| ApiError::bad_request(format!("Invalid document: {}", e)))
}

/// Resolves a dotted field path such as `serviceData.providerUid`.
pub fn lookup_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut current = doc.get(parts.next()?)?;
    for part in parts {
        current = current.as_document()?.get(part)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_lenient_policy_stores_anything() {
        let doc = DocumentPolicy::new(false)
            .new_document(CollectionName::Services, object(json!({ "anything": [1, 2] })))
            .unwrap();
        assert!(doc.contains_key("anything"));
    }

    #[test]
    fn test_strict_policy_requires_nested_fields() {
        let policy = DocumentPolicy::new(true);

        let err = policy
            .new_document(CollectionName::Bookings, object(json!({ "userUid": "u1", "serviceData": {} })))
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg.contains("serviceData.providerUid")));

        let ok = policy.new_document(
            CollectionName::Bookings,
            object(json!({ "userUid": "u1", "serviceData": { "providerUid": "p1" } })),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn test_update_fields_rules() {
        let policy = DocumentPolicy::default();
        assert!(policy.update_fields(Map::new()).is_err());
        assert!(policy.update_fields(object(json!({ "_id": "x" }))).is_err());

        let fields = policy.update_fields(object(json!({ "status": "done" }))).unwrap();
        assert_eq!(fields.get_str("status").unwrap(), "done");
    }

    #[test]
    fn test_parse_object_id() {
        assert!(parse_object_id("65f1c0ffee0000000000abcd").is_ok());
        assert!(matches!(parse_object_id("not-an-id"), Err(ApiError::BadRequest(_))));
        assert!(parse_object_id("65f1c0ffee0000000000abc").is_err());
    }
}
