//! # Stratum
//!
//! Document-database persistence for aggregate-root entities.
//!
//! Stratum binds a generic domain persistence abstraction — an entity
//! context for writes and an entity reader for search — to a document
//! database backend. The `stratum-domain` crate carries the contracts
//! and mapping metadata; `stratum-mongodb` implements them against
//! MongoDB.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stratum::prelude::*;
//!
//! #[derive(Debug, serde::Serialize, serde::Deserialize)]
//! struct Item {
//!     #[serde(rename = "_id")]
//!     id: String,
//!     name: String,
//! }
//!
//! impl DocumentMapped for Item {
//!     fn document_mapping() -> DocumentMapping {
//!         DocumentMapping::new("Item").id_field("id").field("name")
//!     }
//! }
//!
//! impl AggregateRoot for Item {
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Arc::new(EntityCatalog::new());
//!     catalog.register::<Item>();
//!
//!     let module = MongoDbModule::builder()
//!         .configure(|options| options.with_database("inventory"))
//!         .catalog(catalog)
//!         .register();
//!
//!     let context = module.context();
//!     context
//!         .add(&[Item { id: new_id(), name: "widget".into() }])
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Domain contracts and mapping metadata.
pub mod domain {
    pub use stratum_domain::*;
}

/// The MongoDB backend.
pub mod mongodb {
    pub use stratum_mongodb::*;
}

pub use stratum_domain::{
    AggregateRoot, Criteria, DocumentMapped, DocumentMapping, DomainError, DomainResult,
    EntityCatalog, EntityContext, EntityReader, Event, new_id,
};
pub use stratum_mongodb::{
    MongoDbModule, MongoDbOptions, MongoEntityContext, MongoError, MongoReader, MongoResult,
};

/// Prelude module for convenient imports.
pub mod prelude {
    // The backend prelude re-exports the domain prelude.
    pub use stratum_mongodb::prelude::*;
}
