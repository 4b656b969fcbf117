//! Offline composition tests: module registration, mapping
//! initialization, catalog sync, and reader wiring. Nothing here
//! touches a live server; the database handle stays unresolved.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use stratum::prelude::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Product {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    price_cents: i64,
}

impl DocumentMapped for Product {
    fn document_mapping() -> DocumentMapping {
        DocumentMapping::new("Product")
            .id_field("id")
            .field("name")
            .field("price_cents")
    }
}

impl AggregateRoot for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Category {
    #[serde(rename = "_id")]
    id: String,
    title: String,
}

impl DocumentMapped for Category {
    fn document_mapping() -> DocumentMapping {
        DocumentMapping::new("Category")
            .collection("categories")
            .id_field("id")
            .field("title")
    }
}

impl AggregateRoot for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize)]
struct ProductSummary {
    #[serde(rename = "_id")]
    #[allow(dead_code)]
    id: String,
    #[allow(dead_code)]
    name: String,
}

impl DocumentMapped for ProductSummary {
    fn document_mapping() -> DocumentMapping {
        DocumentMapping::new("Product").id_field("id").field("name")
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ProductAdded {
    #[serde(rename = "_id")]
    id: String,
    event_name: String,
    timestamp: DateTime<Utc>,
    product_id: String,
}

impl DocumentMapped for ProductAdded {
    fn document_mapping() -> DocumentMapping {
        DocumentMapping::new("ProductAdded")
            .collection("product_events")
            .id_field("id")
            .field("event_name")
            .field("timestamp")
            .field("product_id")
    }
}

impl Event for ProductAdded {
    fn event_name(&self) -> &str {
        &self.event_name
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

fn registered_module() -> (Arc<EntityCatalog>, MongoDbModule) {
    let catalog = Arc::new(EntityCatalog::new());
    catalog.register::<Product>();

    let module = MongoDbModule::builder()
        .configure(|options| {
            options
                .with_connection("mongodb://localhost:27017")
                .with_database("catalog_test")
        })
        .catalog(Arc::clone(&catalog))
        .register();

    (catalog, module)
}

#[test]
fn module_registration_initializes_mappings_eagerly() {
    let (_catalog, module) = registered_module();

    let mappings = module.mappings();
    assert!(mappings.is_initialized());
    assert!(mappings.contains::<Product>());
    assert_eq!(mappings.collection_for::<Product>(), "products");
}

#[test]
fn module_refresh_syncs_late_registrations() {
    let (catalog, module) = registered_module();

    catalog.register::<Category>();
    assert_eq!(module.refresh(), 1);
    assert_eq!(module.mappings().collection_for::<Category>(), "categories");

    // Idempotent once synced.
    assert_eq!(module.refresh(), 0);
}

#[test]
fn context_and_reader_agree_on_collection_names() {
    let (_catalog, module) = registered_module();

    let context_collection = module.mappings().collection_for::<Product>();
    let reader = module.reader::<ProductSummary>();

    assert_eq!(context_collection, "products");
    assert_eq!(reader.collection_name(), "products");
}

#[test]
fn reader_honors_named_collection() {
    let (_catalog, module) = registered_module();

    let reader = module.reader_named::<ProductSummary>("product_search");
    assert_eq!(reader.collection_name(), "product_search");
}

#[tokio::test]
async fn empty_writes_never_resolve_the_database() {
    let (_catalog, module) = registered_module();
    let context = module.context();

    let none: [Product; 0] = [];
    context.add(&none).await.unwrap();
    context.update(&none).await.unwrap();
    context.remove(&none).await.unwrap();

    assert!(!module.client().is_resolved());
}

#[test]
fn event_types_map_like_entities() {
    let (catalog, module) = registered_module();

    catalog.register::<ProductAdded>();
    assert_eq!(module.refresh(), 1);

    let mappings = module.mappings();
    assert_eq!(mappings.collection_for::<ProductAdded>(), "product_events");

    let event = ProductAdded {
        id: new_id(),
        event_name: "ProductAdded".to_string(),
        timestamp: Utc::now(),
        product_id: "prod-1".to_string(),
    };
    assert_eq!(event.event_name(), "ProductAdded");

    // The event root mapping is seeded alongside the entity root.
    let root = mappings.known_mapping("Event").unwrap();
    assert_eq!(root.elements(), vec!["event_name", "timestamp"]);
}

#[test]
fn criteria_round_trips_through_filter_builder() {
    use stratum::mongodb::FilterBuilder;

    let criteria = FilterBuilder::new()
        .eq("name", "widget")
        .gte("price_cents", 100)
        .criteria()
        .unwrap();

    assert!(!criteria.is_empty());
    assert_eq!(criteria.value()["name"], "widget");
}
