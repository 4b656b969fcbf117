//! Error types for MongoDB operations.

use stratum_domain::DomainError;
use thiserror::Error;

/// Result type for MongoDB operations.
pub type MongoResult<T> = Result<T, MongoError>;

/// Errors that can occur during MongoDB operations.
#[derive(Error, Debug)]
pub enum MongoError {
    /// MongoDB driver error.
    #[error("mongodb error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// BSON serialization error.
    #[error("bson error: {0}")]
    Bson(#[from] bson::ser::Error),

    /// BSON deserialization error.
    #[error("bson deserialization error: {0}")]
    BsonDe(#[from] bson::de::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Query execution error.
    #[error("query error: {0}")]
    Query(String),

    /// Document not found.
    #[error("document not found: {0}")]
    NotFound(String),

    /// Document serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid entity identity.
    #[error("invalid entity id: {0}")]
    InvalidId(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MongoError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an invalid id error.
    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId(message.into())
    }

    /// Check if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Check if this is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<MongoError> for DomainError {
    fn from(err: MongoError) -> Self {
        match err {
            MongoError::Driver(e) => {
                let msg = e.to_string();

                // Surface connectivity problems as configuration issues
                // so the host can tell them apart from data errors.
                if msg.contains("connection") || msg.contains("timed out") {
                    return DomainError::configuration(msg);
                }

                DomainError::persistence(msg)
            }
            MongoError::Bson(e) => DomainError::serialization(e.to_string()),
            MongoError::BsonDe(e) => DomainError::serialization(e.to_string()),
            MongoError::Config(msg) => DomainError::configuration(msg),
            MongoError::Connection(msg) => DomainError::configuration(msg),
            MongoError::Query(msg) => DomainError::persistence(msg),
            MongoError::NotFound(msg) => DomainError::not_found(msg),
            MongoError::Serialization(msg) => DomainError::serialization(msg),
            MongoError::InvalidId(msg) => DomainError::invalid_criteria(msg),
            MongoError::Internal(msg) => DomainError::internal(msg),
        }
    }
}
