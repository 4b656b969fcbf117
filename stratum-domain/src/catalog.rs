//! Entity type discovery.
//!
//! The catalog is the discovery collaborator a registration module
//! consumes: application code (or generated startup glue) registers its
//! entity and event types here, and the backend's mapping registry
//! builds document maps for everything the catalog holds. A generation
//! counter lets a module detect late registrations and re-sync.

use std::any::TypeId;
use std::collections::HashSet;

use parking_lot::RwLock;
use tracing::debug;

use crate::mapping::{DocumentMapped, DocumentMapping};

/// One discovered type: its identity and how to build its mapping.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// The `TypeId` of the registered type.
    pub type_id: TypeId,
    /// The fully qualified type name, for diagnostics.
    pub type_name: &'static str,
    /// Builds the document mapping for the type.
    pub build: fn() -> DocumentMapping,
}

#[derive(Default)]
struct CatalogInner {
    entries: Vec<CatalogEntry>,
    seen: HashSet<TypeId>,
    generation: u64,
}

/// A registry of the entity and event types known to the application.
#[derive(Default)]
pub struct EntityCatalog {
    inner: RwLock<CatalogInner>,
}

impl EntityCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type. Returns `false` if it was already registered.
    pub fn register<T: DocumentMapped>(&self) -> bool {
        let mut inner = self.inner.write();
        if !inner.seen.insert(TypeId::of::<T>()) {
            return false;
        }

        let type_name = std::any::type_name::<T>();
        debug!(type_name, "type registered in entity catalog");

        inner.entries.push(CatalogEntry {
            type_id: TypeId::of::<T>(),
            type_name,
            build: T::document_mapping,
        });
        inner.generation += 1;
        true
    }

    /// Whether the type is registered.
    pub fn contains<T: DocumentMapped>(&self) -> bool {
        self.inner.read().seen.contains(&TypeId::of::<T>())
    }

    /// Snapshot of the current entries.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.inner.read().entries.clone()
    }

    /// A counter that increases whenever a new type is registered.
    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// The number of registered types.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Item;

    impl DocumentMapped for Item {
        fn document_mapping() -> DocumentMapping {
            DocumentMapping::new("Item").id_field("id")
        }
    }

    struct Order;

    impl DocumentMapped for Order {
        fn document_mapping() -> DocumentMapping {
            DocumentMapping::new("Order").id_field("id")
        }
    }

    #[test]
    fn test_register_is_idempotent() {
        let catalog = EntityCatalog::new();
        assert!(catalog.register::<Item>());
        assert!(!catalog.register::<Item>());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.generation(), 1);
    }

    #[test]
    fn test_generation_tracks_new_types() {
        let catalog = EntityCatalog::new();
        catalog.register::<Item>();
        let first = catalog.generation();
        catalog.register::<Order>();
        assert_eq!(catalog.generation(), first + 1);
    }

    #[test]
    fn test_entries_build_mappings() {
        let catalog = EntityCatalog::new();
        catalog.register::<Item>();

        let entries = catalog.entries();
        assert_eq!(entries.len(), 1);
        let mapping = (entries[0].build)();
        assert_eq!(mapping.collection_name(), "items");
    }

    #[test]
    fn test_contains() {
        let catalog = EntityCatalog::new();
        assert!(!catalog.contains::<Item>());
        catalog.register::<Item>();
        assert!(catalog.contains::<Item>());
    }
}
