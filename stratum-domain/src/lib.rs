//! # stratum-domain
//!
//! The persistence abstraction for Stratum: aggregate-root contracts,
//! the entity context and reader traits, and the metadata a backend
//! needs to map domain types onto documents.
//!
//! This crate is backend-agnostic. A backend (such as `stratum-mongodb`)
//! implements [`EntityContext`] and [`EntityReader`] against its own
//! client and consumes [`DocumentMapping`] metadata from the
//! [`EntityCatalog`] to know how each type is laid out.
//!
//! ## Example
//!
//! ```rust
//! use stratum_domain::prelude::*;
//!
//! #[derive(Debug, serde::Serialize, serde::Deserialize)]
//! struct Item {
//!     id: String,
//!     name: String,
//! }
//!
//! impl DocumentMapped for Item {
//!     fn document_mapping() -> DocumentMapping {
//!         DocumentMapping::new("Item")
//!             .id_field("id")
//!             .field("name")
//!     }
//! }
//!
//! impl AggregateRoot for Item {
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//! }
//!
//! let catalog = EntityCatalog::new();
//! catalog.register::<Item>();
//! assert_eq!(catalog.len(), 1);
//! ```

pub mod catalog;
pub mod context;
pub mod criteria;
pub mod entity;
pub mod error;
pub mod mapping;
pub mod naming;
pub mod reader;

pub use catalog::{CatalogEntry, EntityCatalog};
pub use context::EntityContext;
pub use criteria::Criteria;
pub use entity::{AggregateRoot, Event, new_id};
pub use error::{DomainError, DomainResult};
pub use mapping::{DocumentMapped, DocumentMapping, FieldMap};
pub use reader::{EntityReader, Projection};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{CatalogEntry, EntityCatalog};
    pub use crate::context::EntityContext;
    pub use crate::criteria::Criteria;
    pub use crate::entity::{AggregateRoot, Event, new_id};
    pub use crate::error::{DomainError, DomainResult};
    pub use crate::mapping::{DocumentMapped, DocumentMapping, FieldMap};
    pub use crate::reader::{EntityReader, Projection};
}
