//! BSON document conversion helpers.

use bson::{Bson, Document};
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use stratum_domain::DocumentMapping;

use crate::error::{MongoError, MongoResult};

/// Extension trait for BSON documents.
pub trait DocumentExt {
    /// The `_id` element as a string identity.
    fn entity_id(&self) -> MongoResult<&str>;

    /// Convert to a typed struct.
    fn to_struct<T: DeserializeOwned>(&self) -> MongoResult<T>;
}

impl DocumentExt for Document {
    fn entity_id(&self) -> MongoResult<&str> {
        self.get_str("_id")
            .map_err(|_| MongoError::query("element '_id' is not a string"))
    }

    fn to_struct<T: DeserializeOwned>(&self) -> MongoResult<T> {
        bson::from_document(self.clone()).map_err(|e| MongoError::serialization(e.to_string()))
    }
}

/// Convert an entity to a BSON document.
pub fn to_document<T: Serialize>(value: &T) -> MongoResult<Document> {
    bson::to_document(value).map_err(|e| MongoError::serialization(e.to_string()))
}

/// Convert a BSON document to an entity.
pub fn from_document<T: DeserializeOwned>(doc: Document) -> MongoResult<T> {
    bson::from_document(doc).map_err(|e| MongoError::serialization(e.to_string()))
}

/// Convert an entity to the document that may be persisted.
///
/// Elements the mapping declares secured are stripped before the
/// document leaves the process.
pub fn to_persisted_document<T: Serialize>(
    value: &T,
    mapping: &DocumentMapping,
) -> MongoResult<Document> {
    let mut doc = to_document(value)?;
    for element in mapping.secured_elements() {
        doc.remove(element);
    }
    Ok(doc)
}

/// Convert a stored document to an entity, honoring the mapping.
///
/// A strict mapping rejects elements it never mapped; a mapping built
/// with `ignore_extra` tolerates them. List-backed elements must carry
/// arrays either way.
pub fn from_mapped_document<T: DeserializeOwned>(
    doc: Document,
    mapping: &DocumentMapping,
) -> MongoResult<T> {
    if !mapping.ignores_extra() {
        let elements = mapping.elements();
        if let Some(unmapped) = doc.keys().find(|key| !elements.contains(&key.as_str())) {
            return Err(MongoError::serialization(format!(
                "unmapped element '{}' in document for {}",
                unmapped,
                mapping.type_name()
            )));
        }
    }

    for element in mapping.list_elements() {
        if let Some(value) = doc.get(element) {
            if !matches!(value, Bson::Array(_)) {
                return Err(MongoError::serialization(format!(
                    "element '{}' of {} must be an array",
                    element,
                    mapping.type_name()
                )));
            }
        }
    }

    from_document(doc)
}

/// Convert JSON criteria into a BSON filter document.
///
/// Only JSON objects qualify as filters; anything else is rejected.
pub fn criteria_document(value: &Value) -> MongoResult<Document> {
    match value {
        Value::Object(_) => bson::to_document(value)
            .map_err(|e| MongoError::query(format!("invalid criteria: {}", e))),
        Value::Null => Ok(Document::new()),
        other => Err(MongoError::query(format!(
            "criteria must be a JSON object, got {}",
            other
        ))),
    }
}

/// Convert a timestamp to its BSON element form.
pub fn datetime_to_bson(dt: DateTime<Utc>) -> Bson {
    Bson::DateTime(bson::DateTime::from_chrono(dt))
}

/// Read a timestamp out of its BSON element form.
pub fn bson_to_datetime(bson: &Bson) -> MongoResult<DateTime<Utc>> {
    match bson {
        Bson::DateTime(dt) => Ok(dt.to_chrono()),
        _ => Err(MongoError::serialization("expected DateTime")),
    }
}
