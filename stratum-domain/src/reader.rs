//! The read-only entity reader contract.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::de::DeserializeOwned;

use crate::criteria::Criteria;
use crate::error::DomainResult;
use crate::mapping::DocumentMapped;

/// A type that can be read out of a collection.
///
/// Any mapped, deserializable type qualifies; projections do not need
/// the full aggregate-root contract.
pub trait Projection: DocumentMapped + DeserializeOwned + Unpin + Send + Sync + 'static {}

impl<T> Projection for T where T: DocumentMapped + DeserializeOwned + Unpin + Send + Sync + 'static {}

/// A read-only queryable view over a persisted collection, independent
/// of the write-side context.
#[async_trait]
pub trait EntityReader<T: Projection>: Send + Sync {
    /// Stream every item in the collection.
    async fn read(&self) -> DomainResult<BoxStream<'static, DomainResult<T>>>;

    /// The items matching the criteria.
    async fn query(&self, criteria: Criteria) -> DomainResult<Vec<T>>;

    /// The number of items matching the criteria.
    async fn count(&self, criteria: Criteria) -> DomainResult<u64>;
}
