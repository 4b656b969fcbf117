//! Aggregate-root and domain-event contracts.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::mapping::DocumentMapped;

/// A domain entity that is the unit of persistence and identity.
///
/// Aggregate roots carry a string identity and describe their own
/// document layout via [`DocumentMapped`]. The serde bounds are what a
/// document backend needs to move instances in and out of storage.
pub trait AggregateRoot:
    DocumentMapped + Serialize + DeserializeOwned + Unpin + Send + Sync + 'static
{
    /// The identity of this instance.
    fn id(&self) -> &str;
}

/// A domain event raised by an aggregate.
///
/// Events are persisted alongside entities; the mapping registry
/// registers a root mapping for the name and timestamp elements.
pub trait Event: DocumentMapped + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The name of the event, e.g. `"ItemAdded"`.
    fn event_name(&self) -> &str;

    /// When the event was raised.
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Generate a new entity identity.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_ne;

    #[test]
    fn test_new_id_is_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
