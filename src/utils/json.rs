use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

/// Renders a stored document as plain JSON. ObjectIds become their hex string,
/// everything else uses relaxed extended JSON.
pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Escapes regex metacharacters so user input matches as a literal substring.
pub fn escape_regex(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$' | '#' | '-'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    #[test]
    fn test_object_ids_render_as_hex() {
        let id = ObjectId::new();
        let json = document_to_json(doc! {
            "_id": id,
            "service_name": "Plumbing",
            "serviceData": { "providerUid": "p1", "ref": id },
            "tags": [id, 3_i32],
        });

        assert_eq!(json["_id"], Value::String(id.to_hex()));
        assert_eq!(json["service_name"], "Plumbing");
        assert_eq!(json["serviceData"]["ref"], Value::String(id.to_hex()));
        assert_eq!(json["tags"][0], Value::String(id.to_hex()));
        assert_eq!(json["tags"][1], 3);
    }

    #[test]
    fn test_escape_regex() {
        assert_eq!(escape_regex("plumb"), "plumb");
        assert_eq!(escape_regex("a.b*c"), "a\\.b\\*c");
        assert_eq!(escape_regex("(x)"), "\\(x\\)");
    }
}
