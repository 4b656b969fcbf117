//! Registration module for the MongoDB backend.
//!
//! Composes options, the mapping registry, and the context into the
//! singletons a hosting application injects. The mapping registry is
//! auto-activated: registration eagerly initializes it from the entity
//! catalog, and [`MongoDbModule::refresh`] re-syncs when the catalog
//! has grown since.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info};

use stratum_domain::{EntityCatalog, Projection};

use crate::client::MongoDbClient;
use crate::context::MongoEntityContext;
use crate::mappings::MappingRegistry;
use crate::options::{MongoDbOptions, MongoDbOptionsBuilder};
use crate::reader::MongoReader;

/// The MongoDB repositories module.
///
/// Hands out shared context and reader instances bound to one database.
pub struct MongoDbModule {
    options: Arc<MongoDbOptions>,
    client: Arc<MongoDbClient>,
    mappings: Arc<MappingRegistry>,
    catalog: Arc<EntityCatalog>,
    context: Arc<MongoEntityContext>,
    synced_generation: AtomicU64,
}

impl MongoDbModule {
    /// Create a builder for the module.
    pub fn builder() -> MongoDbModuleBuilder {
        MongoDbModuleBuilder::new()
    }

    /// The shared entity context.
    pub fn context(&self) -> Arc<MongoEntityContext> {
        Arc::clone(&self.context)
    }

    /// A reader over the mapped collection for `T`.
    pub fn reader<T: Projection>(&self) -> MongoReader<T> {
        MongoReader::new(Arc::clone(&self.client), Arc::clone(&self.mappings))
    }

    /// A reader over an explicitly named collection.
    pub fn reader_named<T: Projection>(&self, collection: impl Into<String>) -> MongoReader<T> {
        MongoReader::with_collection(
            Arc::clone(&self.client),
            Arc::clone(&self.mappings),
            collection,
        )
    }

    /// The module's options.
    pub fn options(&self) -> &MongoDbOptions {
        &self.options
    }

    /// The shared client.
    pub fn client(&self) -> Arc<MongoDbClient> {
        Arc::clone(&self.client)
    }

    /// The mapping registry.
    pub fn mappings(&self) -> Arc<MappingRegistry> {
        Arc::clone(&self.mappings)
    }

    /// The entity catalog the module watches.
    pub fn catalog(&self) -> Arc<EntityCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Re-register mappings if the catalog has grown since the last
    /// sync. Returns the number of new mappings built.
    pub fn refresh(&self) -> usize {
        let generation = self.catalog.generation();
        if generation == self.synced_generation.load(Ordering::Acquire) {
            return 0;
        }

        let added = self.mappings.sync(&self.catalog);
        self.synced_generation.store(generation, Ordering::Release);
        if added > 0 {
            debug!(added, "mapping registry re-synced with catalog");
        }
        added
    }
}

/// Builder for [`MongoDbModule`].
#[derive(Default)]
pub struct MongoDbModuleBuilder {
    options: Option<MongoDbOptions>,
    catalog: Option<Arc<EntityCatalog>>,
}

impl MongoDbModuleBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure options through the fluent options builder.
    pub fn configure<F>(mut self, configuration: F) -> Self
    where
        F: FnOnce(MongoDbOptionsBuilder) -> MongoDbOptionsBuilder,
    {
        self.options = Some(configuration(MongoDbOptions::builder()).build());
        self
    }

    /// Use pre-built options.
    pub fn options(mut self, options: MongoDbOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Use the given entity catalog.
    pub fn catalog(mut self, catalog: Arc<EntityCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Compose and register the module, eagerly initializing mappings.
    pub fn register(self) -> MongoDbModule {
        let options = Arc::new(self.options.unwrap_or_default());
        let catalog = self.catalog.unwrap_or_default();
        let client = Arc::new(MongoDbClient::new(Arc::clone(&options)));
        let mappings = Arc::new(MappingRegistry::new());

        mappings.ensure_initialized(&catalog);

        let context = Arc::new(MongoEntityContext::new(
            Arc::clone(&client),
            Arc::clone(&mappings),
        ));

        info!(
            database = %options.database(),
            mapped_types = mappings.len(),
            "mongodb repositories module registered"
        );

        MongoDbModule {
            options,
            client,
            mappings,
            synced_generation: AtomicU64::new(catalog.generation()),
            catalog,
            context,
        }
    }
}

/// Opt in to MongoDB-backed repositories with the given configuration.
pub fn use_mongodb_repositories<F>(catalog: Arc<EntityCatalog>, configuration: F) -> MongoDbModule
where
    F: FnOnce(MongoDbOptionsBuilder) -> MongoDbOptionsBuilder,
{
    MongoDbModule::builder()
        .configure(configuration)
        .catalog(catalog)
        .register()
}
