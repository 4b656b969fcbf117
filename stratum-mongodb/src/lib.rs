//! # stratum-mongodb
//!
//! MongoDB backend for the Stratum entity context and reader.
//!
//! This crate provides:
//! - A lazily connected database handle over the official MongoDB driver
//! - An [`EntityContext`](stratum_domain::EntityContext) implementation
//!   (add, update-upsert, remove, find, clear, existence checks,
//!   streaming projection)
//! - A read-only [`MongoReader`] over a named collection
//! - A mapping registry that builds per-type document maps once and
//!   caches them
//! - A registration module composing the above for a hosting application
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stratum_domain::prelude::*;
//! use stratum_mongodb::MongoDbModule;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Arc::new(EntityCatalog::new());
//!     catalog.register::<Item>();
//!
//!     let module = MongoDbModule::builder()
//!         .configure(|options| {
//!             options
//!                 .with_connection("mongodb://localhost:27017")
//!                 .with_database("inventory")
//!         })
//!         .catalog(catalog)
//!         .register();
//!
//!     let context = module.context();
//!     context.add(&[Item::new("widget")]).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod context;
pub mod document;
pub mod error;
pub mod filter;
pub mod mappings;
pub mod module;
pub mod options;
pub mod reader;

pub use bson::{Bson, Document, doc};
pub use client::MongoDbClient;
pub use context::MongoEntityContext;
pub use error::{MongoError, MongoResult};
pub use filter::FilterBuilder;
pub use mappings::MappingRegistry;
pub use module::{MongoDbModule, MongoDbModuleBuilder, use_mongodb_repositories};
pub use options::{MongoDbOptions, MongoDbOptionsBuilder};
pub use reader::MongoReader;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::client::MongoDbClient;
    pub use crate::context::MongoEntityContext;
    pub use crate::document::DocumentExt;
    pub use crate::error::{MongoError, MongoResult};
    pub use crate::filter::FilterBuilder;
    pub use crate::mappings::MappingRegistry;
    pub use crate::module::{MongoDbModule, MongoDbModuleBuilder, use_mongodb_repositories};
    pub use crate::options::{MongoDbOptions, MongoDbOptionsBuilder};
    pub use crate::reader::MongoReader;
    pub use bson::{Bson, Document, doc};
    pub use stratum_domain::prelude::*;
}
