//! Error types for domain persistence operations.

use thiserror::Error;

/// Result type for domain persistence operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors surfaced by an entity context or reader.
#[derive(Error, Debug)]
pub enum DomainError {
    /// The backing store failed to execute an operation.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// An entity could not be converted to or from its document form.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The requested entity does not exist.
    #[error("entity not found: {0}")]
    NotFound(String),

    /// The backend was misconfigured.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An invalid filter was supplied.
    #[error("invalid criteria: {0}")]
    InvalidCriteria(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a persistence error.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an invalid criteria error.
    pub fn invalid_criteria(message: impl Into<String>) -> Self {
        Self::InvalidCriteria(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a not found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
