//! Lazily resolved MongoDB database handle.

use std::sync::Arc;

use bson::{Document, doc};
use mongodb::{Client, Collection, Database};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::error::{MongoError, MongoResult};
use crate::options::MongoDbOptions;

/// A database handle resolved on first use.
///
/// The driver pools connections internally; this wrapper defers client
/// construction until an operation actually needs the database, so a
/// module can be registered before the server is reachable.
pub struct MongoDbClient {
    options: Arc<MongoDbOptions>,
    database: OnceCell<Database>,
}

impl MongoDbClient {
    /// Create a client over the given options. No connection is made yet.
    pub fn new(options: Arc<MongoDbOptions>) -> Self {
        Self {
            options,
            database: OnceCell::new(),
        }
    }

    /// Resolve the database handle, creating the driver client on first use.
    pub async fn database(&self) -> MongoResult<&Database> {
        self.database
            .get_or_try_init(|| async {
                let client_options = self.options.to_client_options().await?;
                let client = Client::with_options(client_options)
                    .map_err(|e| MongoError::connection(format!("failed to create client: {}", e)))?;

                info!(
                    database = %self.options.database(),
                    "mongodb client created"
                );

                Ok(client.database(self.options.database()))
            })
            .await
    }

    /// Get a collection of raw BSON documents.
    pub async fn collection(&self, name: &str) -> MongoResult<Collection<Document>> {
        Ok(self.database().await?.collection(name))
    }

    /// The options the client was built from.
    pub fn options(&self) -> &MongoDbOptions {
        &self.options
    }

    /// Whether the database handle has been resolved yet.
    pub fn is_resolved(&self) -> bool {
        self.database.initialized()
    }

    /// Check if the server is reachable by pinging it.
    pub async fn is_healthy(&self) -> bool {
        match self.database().await {
            Ok(database) => database.run_command(doc! { "ping": 1 }, None).await.is_ok(),
            Err(_) => false,
        }
    }

    /// Drop a collection.
    pub async fn drop_collection(&self, name: &str) -> MongoResult<()> {
        debug!(collection = %name, "dropping collection");
        self.database()
            .await?
            .collection::<Document>(name)
            .drop(None)
            .await
            .map_err(MongoError::from)?;
        Ok(())
    }
}
