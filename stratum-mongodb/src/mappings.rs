//! Builds and maintains document mappings for the MongoDB module.

use std::any::TypeId;
use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use stratum_domain::catalog::EntityCatalog;
use stratum_domain::mapping::{DocumentMapped, DocumentMapping};

#[derive(Default)]
struct RegistryInner {
    initialized: bool,
    maps: HashMap<TypeId, DocumentMapping>,
    known: HashMap<&'static str, DocumentMapping>,
}

/// Caches per-type document mappings.
///
/// Mappings are built at most once per type. Initialization registers
/// the known root mappings first, then builds a dynamic map for every
/// type in the catalog; repeat calls are no-ops.
#[derive(Default)]
pub struct MappingRegistry {
    inner: RwLock<RegistryInner>,
}

impl MappingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure that the maps are initialized.
    pub fn ensure_initialized(&self, catalog: &EntityCatalog) {
        {
            let mut inner = self.inner.write();
            if inner.initialized {
                return;
            }
            // Flag is set first so a failing provider cannot re-trigger
            // the known maps.
            inner.initialized = true;
            Self::create_known_maps(&mut inner);
        }

        self.create_dynamic_maps(catalog);
    }

    /// Whether `ensure_initialized` has run.
    pub fn is_initialized(&self) -> bool {
        self.inner.read().initialized
    }

    fn create_known_maps(inner: &mut RegistryInner) {
        inner.known.insert("Entity", DocumentMapping::entity_root());
        inner.known.insert("Event", DocumentMapping::event_root());
        debug!("known root mappings registered");
    }

    fn create_dynamic_maps(&self, catalog: &EntityCatalog) {
        for entry in catalog.entries() {
            self.insert(entry.type_id, (entry.build)());
        }
    }

    /// Register mappings for catalog types that arrived after
    /// initialization. Returns the number of new mappings built.
    pub fn sync(&self, catalog: &EntityCatalog) -> usize {
        catalog
            .entries()
            .into_iter()
            .filter(|entry| self.insert(entry.type_id, (entry.build)()))
            .count()
    }

    /// Register a single type. Returns `false` if it was already mapped.
    pub fn register<T: DocumentMapped>(&self) -> bool {
        self.insert(TypeId::of::<T>(), T::document_mapping())
    }

    /// Register a type for read-side use, tolerating extra elements.
    /// Returns `false` if it was already mapped.
    pub fn register_reader<T: DocumentMapped>(&self) -> bool {
        self.insert(TypeId::of::<T>(), T::document_mapping().ignore_extra(true))
    }

    fn insert(&self, type_id: TypeId, mapping: DocumentMapping) -> bool {
        let mut inner = self.inner.write();
        if inner.maps.contains_key(&type_id) {
            return false;
        }

        debug!(
            type_name = %mapping.type_name(),
            collection = %mapping.collection_name(),
            "document mapping registered"
        );
        inner.maps.insert(type_id, mapping);
        true
    }

    /// Whether a mapping is registered for the type.
    pub fn contains<T: 'static>(&self) -> bool {
        self.inner.read().maps.contains_key(&TypeId::of::<T>())
    }

    /// The mapping for the type, if registered.
    pub fn mapping_of<T: 'static>(&self) -> Option<DocumentMapping> {
        self.inner.read().maps.get(&TypeId::of::<T>()).cloned()
    }

    /// One of the known root mappings (`"Entity"`, `"Event"`).
    pub fn known_mapping(&self, name: &str) -> Option<DocumentMapping> {
        self.inner.read().known.get(name).cloned()
    }

    /// The mapping for the type, registering it on the fly if the type
    /// was never discovered.
    pub fn mapping_for<T: DocumentMapped>(&self) -> DocumentMapping {
        if let Some(mapping) = self.mapping_of::<T>() {
            return mapping;
        }
        let mapping = T::document_mapping();
        self.insert(TypeId::of::<T>(), mapping.clone());
        mapping
    }

    /// The collection name for the type, registering its mapping on the
    /// fly if the type was never discovered.
    pub fn collection_for<T: DocumentMapped>(&self) -> String {
        self.mapping_for::<T>().collection_name().to_string()
    }

    /// The number of registered type mappings.
    pub fn len(&self) -> usize {
        self.inner.read().maps.len()
    }

    /// Whether no type mappings are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().maps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Item;

    impl DocumentMapped for Item {
        fn document_mapping() -> DocumentMapping {
            DocumentMapping::new("Item").id_field("id").field("name")
        }
    }

    struct Order;

    impl DocumentMapped for Order {
        fn document_mapping() -> DocumentMapping {
            DocumentMapping::new("Order").id_field("id")
        }
    }

    #[test]
    fn test_ensure_initialized_is_idempotent() {
        let catalog = EntityCatalog::new();
        catalog.register::<Item>();

        let registry = MappingRegistry::new();
        registry.ensure_initialized(&catalog);
        assert!(registry.is_initialized());
        assert_eq!(registry.len(), 1);

        // A second call must not rebuild anything.
        registry.ensure_initialized(&catalog);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_known_maps_registered() {
        let registry = MappingRegistry::new();
        registry.ensure_initialized(&EntityCatalog::new());

        let entity = registry.known_mapping("Entity").unwrap();
        assert_eq!(entity.elements(), vec!["_id"]);
        assert!(registry.known_mapping("Missing").is_none());
    }

    #[test]
    fn test_register_skips_existing() {
        let registry = MappingRegistry::new();
        assert!(registry.register::<Item>());
        assert!(!registry.register::<Item>());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_sync_picks_up_new_types() {
        let catalog = EntityCatalog::new();
        catalog.register::<Item>();

        let registry = MappingRegistry::new();
        registry.ensure_initialized(&catalog);

        catalog.register::<Order>();
        assert_eq!(registry.sync(&catalog), 1);
        assert!(registry.contains::<Order>());

        // Nothing new on a repeat sync.
        assert_eq!(registry.sync(&catalog), 0);
    }

    #[test]
    fn test_reader_mapping_ignores_extra() {
        let registry = MappingRegistry::new();
        registry.register_reader::<Item>();
        assert!(registry.mapping_of::<Item>().unwrap().ignores_extra());

        // Does not clobber an existing write-side mapping.
        let registry = MappingRegistry::new();
        registry.register::<Item>();
        assert!(!registry.register_reader::<Item>());
        assert!(!registry.mapping_of::<Item>().unwrap().ignores_extra());
    }

    #[test]
    fn test_collection_for_registers_on_the_fly() {
        let registry = MappingRegistry::new();
        assert_eq!(registry.collection_for::<Item>(), "items");
        assert!(registry.contains::<Item>());
    }

    #[test]
    fn test_mapping_for_prefers_registered_mapping() {
        let registry = MappingRegistry::new();
        registry.register_reader::<Item>();

        // An existing mapping wins over a freshly built one.
        assert!(registry.mapping_for::<Item>().ignores_extra());
    }
}
