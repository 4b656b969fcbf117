//! Document mapping metadata.
//!
//! A [`DocumentMapping`] is the translation rule from a type's fields to
//! a document's element layout: which collection instances live in,
//! which field is the identity, what each field is called on the wire,
//! and which fields never leave the process. Types declare their layout
//! by implementing [`DocumentMapped`]; a backend registry caches the
//! result per `TypeId`.

use crate::naming;

/// The document layout for one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMapping {
    type_name: String,
    collection: String,
    id_element: String,
    fields: Vec<FieldMap>,
    ignore_extra: bool,
}

/// How one field maps onto a document element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    name: String,
    element: String,
    secured: bool,
    list: bool,
}

impl FieldMap {
    /// The in-memory field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The document element name.
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Whether the field is excluded from persistence.
    pub fn is_secured(&self) -> bool {
        self.secured
    }

    /// Whether the field is a list-backed collection.
    pub fn is_list(&self) -> bool {
        self.list
    }
}

impl DocumentMapping {
    /// Start a mapping for the named type.
    ///
    /// The collection name defaults to the pluralized snake_case form
    /// of the type name.
    pub fn new(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let collection = naming::collection_name(&type_name);
        Self {
            type_name,
            collection,
            id_element: "_id".to_string(),
            fields: Vec::new(),
            ignore_extra: false,
        }
    }

    /// The root mapping applied to every entity: identity stored as `_id`.
    pub fn entity_root() -> Self {
        Self::new("Entity").id_field("id")
    }

    /// The root mapping applied to every event: name and timestamp elements.
    pub fn event_root() -> Self {
        Self::new("Event").field("event_name").field("timestamp")
    }

    /// Override the collection name.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.collection = name.into();
        self
    }

    /// Map the identity field onto the `_id` element.
    pub fn id_field(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.fields.push(FieldMap {
            name,
            element: self.id_element.clone(),
            secured: false,
            list: false,
        });
        self
    }

    /// Map a field onto an element of the same name.
    pub fn field(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let element = name.clone();
        self.field_as(name, element)
    }

    /// Map a field onto an explicitly named element.
    pub fn field_as(mut self, name: impl Into<String>, element: impl Into<String>) -> Self {
        self.fields.push(FieldMap {
            name: name.into(),
            element: element.into(),
            secured: false,
            list: false,
        });
        self
    }

    /// Map a list-backed field onto an element of the same name.
    pub fn list_field(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let element = name.clone();
        self.fields.push(FieldMap {
            name,
            element,
            secured: false,
            list: true,
        });
        self
    }

    /// Declare a field that must never be persisted.
    ///
    /// The field is stripped from outgoing documents, so the type must
    /// tolerate its absence when deserializing (a serde default or an
    /// `Option`).
    pub fn secured(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let element = name.clone();
        self.fields.push(FieldMap {
            name,
            element,
            secured: true,
            list: false,
        });
        self
    }

    /// Tolerate document elements with no matching field.
    pub fn ignore_extra(mut self, ignore: bool) -> Self {
        self.ignore_extra = ignore;
        self
    }

    /// The mapped type's name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The collection instances are stored in.
    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    /// The element carrying the identity.
    pub fn id_element(&self) -> &str {
        &self.id_element
    }

    /// All field maps, secured included.
    pub fn fields(&self) -> &[FieldMap] {
        &self.fields
    }

    /// The element names that are persisted.
    pub fn elements(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| !f.secured)
            .map(|f| f.element())
            .collect()
    }

    /// The element names that must be stripped before persisting.
    pub fn secured_elements(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.secured)
            .map(|f| f.element())
            .collect()
    }

    /// The element names that carry list-backed fields.
    pub fn list_elements(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.list)
            .map(|f| f.element())
            .collect()
    }

    /// Whether the named field is excluded from persistence.
    pub fn is_secured(&self, field: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.secured && f.name == field)
    }

    /// Whether unmatched document elements are tolerated.
    pub fn ignores_extra(&self) -> bool {
        self.ignore_extra
    }
}

/// A type that can describe its own document layout.
///
/// This is the reflection seam: each persistable type declares its
/// mapping once, and the backend registry caches it by `TypeId`.
pub trait DocumentMapped: 'static {
    /// Build the document mapping for this type.
    fn document_mapping() -> DocumentMapping;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_collection_name() {
        let mapping = DocumentMapping::new("LineItem");
        assert_eq!(mapping.collection_name(), "line_items");
        assert_eq!(mapping.id_element(), "_id");
    }

    #[test]
    fn test_collection_override() {
        let mapping = DocumentMapping::new("Person").collection("people");
        assert_eq!(mapping.collection_name(), "people");
    }

    #[test]
    fn test_id_field_maps_to_id_element() {
        let mapping = DocumentMapping::new("Item").id_field("id").field("name");
        assert_eq!(mapping.elements(), vec!["_id", "name"]);
    }

    #[test]
    fn test_secured_fields_excluded() {
        let mapping = DocumentMapping::new("Account")
            .id_field("id")
            .field("email")
            .secured("password_hash");

        assert!(mapping.is_secured("password_hash"));
        assert!(!mapping.is_secured("email"));
        assert_eq!(mapping.elements(), vec!["_id", "email"]);
        assert_eq!(mapping.secured_elements(), vec!["password_hash"]);
    }

    #[test]
    fn test_list_field() {
        let mapping = DocumentMapping::new("Order").id_field("id").list_field("lines");
        let lines = mapping
            .fields()
            .iter()
            .find(|f| f.name() == "lines")
            .unwrap();
        assert!(lines.is_list());
        assert_eq!(mapping.list_elements(), vec!["lines"]);
    }

    #[test]
    fn test_root_mappings() {
        let entity = DocumentMapping::entity_root();
        assert_eq!(entity.elements(), vec!["_id"]);

        let event = DocumentMapping::event_root();
        assert_eq!(event.elements(), vec!["event_name", "timestamp"]);
    }
}
