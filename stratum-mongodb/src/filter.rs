//! MongoDB filter building.

use bson::{Bson, Document, doc};
use stratum_domain::Criteria;

use crate::error::{MongoError, MongoResult};

/// Builder for MongoDB filter documents.
///
/// The write-side stand-in for expression filters: conditions compose
/// into a single BSON document.
///
/// # Example
///
/// ```rust
/// use stratum_mongodb::FilterBuilder;
///
/// let filter = FilterBuilder::new()
///     .eq("status", "active")
///     .gte("count", 3)
///     .build();
///
/// assert_eq!(filter.get_str("status").unwrap(), "active");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    doc: Document,
}

impl FilterBuilder {
    /// Create a new empty filter builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn op(mut self, field: &str, operator: &str, value: Bson) -> Self {
        let mut condition = Document::new();
        condition.insert(operator, value);
        self.doc.insert(field, condition);
        self
    }

    /// Add an equality condition.
    pub fn eq(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.doc.insert(field, value.into());
        self
    }

    /// Add a not-equal condition.
    pub fn ne(self, field: &str, value: impl Into<Bson>) -> Self {
        self.op(field, "$ne", value.into())
    }

    /// Add a greater-than condition.
    pub fn gt(self, field: &str, value: impl Into<Bson>) -> Self {
        self.op(field, "$gt", value.into())
    }

    /// Add a greater-than-or-equal condition.
    pub fn gte(self, field: &str, value: impl Into<Bson>) -> Self {
        self.op(field, "$gte", value.into())
    }

    /// Add a less-than condition.
    pub fn lt(self, field: &str, value: impl Into<Bson>) -> Self {
        self.op(field, "$lt", value.into())
    }

    /// Add a less-than-or-equal condition.
    pub fn lte(self, field: &str, value: impl Into<Bson>) -> Self {
        self.op(field, "$lte", value.into())
    }

    /// Add an "in" condition (value in array).
    pub fn in_array(self, field: &str, values: Vec<impl Into<Bson>>) -> Self {
        let values: Vec<Bson> = values.into_iter().map(Into::into).collect();
        self.op(field, "$in", values.into())
    }

    /// Add a regex condition.
    pub fn regex(self, field: &str, pattern: &str) -> Self {
        self.op(field, "$regex", pattern.into())
    }

    /// Add an exists condition.
    pub fn exists(self, field: &str, exists: bool) -> Self {
        self.op(field, "$exists", exists.into())
    }

    /// Filter on the entity identity.
    pub fn by_id(mut self, id: &str) -> Self {
        self.doc.insert("_id", id);
        self
    }

    /// Combine with AND ($and).
    pub fn and(mut self, conditions: Vec<Document>) -> Self {
        self.doc.insert("$and", conditions);
        self
    }

    /// Combine with OR ($or).
    pub fn or(mut self, conditions: Vec<Document>) -> Self {
        self.doc.insert("$or", conditions);
        self
    }

    /// Build the filter document.
    pub fn build(self) -> Document {
        self.doc
    }

    /// Build domain [`Criteria`] from this filter, for use with the
    /// backend-agnostic context surface.
    pub fn criteria(self) -> MongoResult<Criteria> {
        let value = serde_json::to_value(&self.doc)
            .map_err(|e| MongoError::serialization(e.to_string()))?;
        Ok(Criteria::from_value(value))
    }

    /// Check if the filter is empty.
    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }
}

/// Create an empty filter (matches all documents).
pub fn all() -> Document {
    doc! {}
}

/// Create an identity filter.
pub fn by_id(id: &str) -> Document {
    doc! { "_id": id }
}

/// Create an identity filter matching any of the given ids.
pub fn by_ids<I, S>(ids: I) -> Document
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let values: Vec<Bson> = ids
        .into_iter()
        .map(|id| Bson::String(id.as_ref().to_string()))
        .collect();
    doc! { "_id": { "$in": values } }
}
