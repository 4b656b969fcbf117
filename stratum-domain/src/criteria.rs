//! Backend-agnostic query criteria.
//!
//! Filters cross the abstraction boundary as JSON; each backend
//! translates the JSON object into its native filter form. An empty
//! object matches everything.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A filter carried as a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria(Value);

impl Criteria {
    /// A criteria that matches all instances.
    pub fn all() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Create criteria from a JSON value.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parse criteria from a JSON string.
    pub fn parse(input: &str) -> Result<Self, serde_json::Error> {
        Ok(Self(serde_json::from_str(input)?))
    }

    /// A single field-equals condition.
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = Map::new();
        map.insert(field.into(), value.into());
        Self(Value::Object(map))
    }

    /// Borrow the underlying JSON value.
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Take the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Check whether this criteria matches everything.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Object(map) => map.is_empty(),
            Value::Null => true,
            _ => false,
        }
    }
}

impl Default for Criteria {
    fn default() -> Self {
        Self::all()
    }
}

impl From<Value> for Criteria {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
