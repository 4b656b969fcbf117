//! MongoDB connection options.

use std::time::Duration;

use mongodb::options::ClientOptions;

use crate::error::{MongoError, MongoResult};

/// The default database when none is configured, matching the driver's
/// convention for unnamed local work.
pub const DEFAULT_DATABASE: &str = "local";

/// The default connection string.
pub const DEFAULT_CONNECTION: &str = "mongodb://localhost:27017";

/// Options for the MongoDB module: connection string, database name,
/// and pool/timeout knobs. Immutable once built.
#[derive(Debug, Clone)]
pub struct MongoDbOptions {
    connection: String,
    database: String,
    app_name: Option<String>,
    min_pool_size: Option<u32>,
    max_pool_size: Option<u32>,
    max_idle_time: Option<Duration>,
    connect_timeout: Option<Duration>,
    server_selection_timeout: Option<Duration>,
    direct_connection: Option<bool>,
}

impl Default for MongoDbOptions {
    fn default() -> Self {
        Self {
            connection: DEFAULT_CONNECTION.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            app_name: Some("stratum".to_string()),
            min_pool_size: None,
            max_pool_size: Some(10),
            max_idle_time: Some(Duration::from_secs(300)),
            connect_timeout: Some(Duration::from_secs(10)),
            server_selection_timeout: Some(Duration::from_secs(30)),
            direct_connection: None,
        }
    }
}

impl MongoDbOptions {
    /// Create a builder for options.
    pub fn builder() -> MongoDbOptionsBuilder {
        MongoDbOptionsBuilder::new()
    }

    /// The connection string.
    pub fn connection(&self) -> &str {
        &self.connection
    }

    /// The database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// The application name shown in server logs.
    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    /// The maximum connection pool size.
    pub fn max_pool_size(&self) -> Option<u32> {
        self.max_pool_size
    }

    /// Convert to driver [`ClientOptions`].
    pub async fn to_client_options(&self) -> MongoResult<ClientOptions> {
        let mut options = ClientOptions::parse(&self.connection)
            .await
            .map_err(|e| MongoError::config(format!("failed to parse connection string: {}", e)))?;

        if let Some(ref app_name) = self.app_name {
            options.app_name = Some(app_name.clone());
        }
        if let Some(min_pool) = self.min_pool_size {
            options.min_pool_size = Some(min_pool);
        }
        if let Some(max_pool) = self.max_pool_size {
            options.max_pool_size = Some(max_pool);
        }
        if let Some(max_idle) = self.max_idle_time {
            options.max_idle_time = Some(max_idle);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            options.connect_timeout = Some(connect_timeout);
        }
        if let Some(selection_timeout) = self.server_selection_timeout {
            options.server_selection_timeout = Some(selection_timeout);
        }
        if let Some(direct) = self.direct_connection {
            options.direct_connection = Some(direct);
        }

        Ok(options)
    }
}

/// Fluent builder for [`MongoDbOptions`].
#[derive(Debug, Default)]
pub struct MongoDbOptionsBuilder {
    connection: Option<String>,
    database: Option<String>,
    app_name: Option<String>,
    min_pool_size: Option<u32>,
    max_pool_size: Option<u32>,
    max_idle_time: Option<Duration>,
    connect_timeout: Option<Duration>,
    server_selection_timeout: Option<Duration>,
    direct_connection: Option<bool>,
}

impl MongoDbOptionsBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connection string to use.
    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    /// Set the database to use.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the application name.
    pub fn with_app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Set the minimum pool size.
    pub fn with_min_pool_size(mut self, size: u32) -> Self {
        self.min_pool_size = Some(size);
        self
    }

    /// Set the maximum pool size.
    pub fn with_max_pool_size(mut self, size: u32) -> Self {
        self.max_pool_size = Some(size);
        self
    }

    /// Set the maximum idle time for pooled connections.
    pub fn with_max_idle_time(mut self, duration: Duration) -> Self {
        self.max_idle_time = Some(duration);
        self
    }

    /// Set the connection timeout.
    pub fn with_connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Set the server selection timeout.
    pub fn with_server_selection_timeout(mut self, duration: Duration) -> Self {
        self.server_selection_timeout = Some(duration);
        self
    }

    /// Enable direct connection (bypass replica set discovery).
    pub fn with_direct_connection(mut self, enabled: bool) -> Self {
        self.direct_connection = Some(enabled);
        self
    }

    /// Build the options. An unset database falls back to `local`.
    pub fn build(self) -> MongoDbOptions {
        let defaults = MongoDbOptions::default();

        MongoDbOptions {
            connection: self.connection.unwrap_or(defaults.connection),
            database: self.database.unwrap_or(defaults.database),
            app_name: self.app_name.or(defaults.app_name),
            min_pool_size: self.min_pool_size,
            max_pool_size: self.max_pool_size.or(defaults.max_pool_size),
            max_idle_time: self.max_idle_time.or(defaults.max_idle_time),
            connect_timeout: self.connect_timeout.or(defaults.connect_timeout),
            server_selection_timeout: self
                .server_selection_timeout
                .or(defaults.server_selection_timeout),
            direct_connection: self.direct_connection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = MongoDbOptions::default();
        assert_eq!(options.connection(), DEFAULT_CONNECTION);
        assert_eq!(options.database(), DEFAULT_DATABASE);
    }

    #[test]
    fn test_builder() {
        let options = MongoDbOptions::builder()
            .with_connection("mongodb://db:27017")
            .with_database("inventory")
            .with_app_name("console-client")
            .with_max_pool_size(20)
            .build();

        assert_eq!(options.connection(), "mongodb://db:27017");
        assert_eq!(options.database(), "inventory");
        assert_eq!(options.app_name(), Some("console-client"));
        assert_eq!(options.max_pool_size(), Some(20));
    }

    #[test]
    fn test_missing_database_falls_back_to_local() {
        let options = MongoDbOptions::builder()
            .with_connection("mongodb://db:27017")
            .build();

        assert_eq!(options.database(), DEFAULT_DATABASE);
    }
}
