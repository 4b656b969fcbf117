//! The entity context contract.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::criteria::Criteria;
use crate::entity::AggregateRoot;
use crate::error::DomainResult;

/// The persistence-facing interface exposing CRUD operations over
/// aggregate roots.
///
/// Every operation is generic over the aggregate type, so the trait is
/// used as a generic bound rather than a trait object.
#[async_trait]
pub trait EntityContext: Send + Sync {
    /// Add the specified instances.
    async fn add<T: AggregateRoot>(&self, instances: &[T]) -> DomainResult<()>;

    /// Update the specified instances, inserting any that do not exist.
    async fn update<T: AggregateRoot>(&self, instances: &[T]) -> DomainResult<()>;

    /// Remove the specified instances.
    async fn remove<T: AggregateRoot>(&self, instances: &[T]) -> DomainResult<()>;

    /// Find an instance by identity.
    async fn find<T: AggregateRoot>(&self, id: &str) -> DomainResult<Option<T>>;

    /// Find the instances matching the criteria.
    async fn find_where<T: AggregateRoot>(&self, criteria: Criteria) -> DomainResult<Vec<T>>;

    /// Find all instances of the type.
    async fn find_all<T: AggregateRoot>(&self) -> DomainResult<Vec<T>>;

    /// Remove all instances of the type.
    async fn clear<T: AggregateRoot>(&self) -> DomainResult<()>;

    /// Check whether an instance with the identity exists.
    async fn exists<T: AggregateRoot>(&self, id: &str) -> DomainResult<bool>;

    /// Check whether any instance matches the criteria.
    async fn exists_where<T: AggregateRoot>(&self, criteria: Criteria) -> DomainResult<bool>;

    /// Open a streaming projection over all instances of the type.
    async fn open_query<T: AggregateRoot>(
        &self,
    ) -> DomainResult<BoxStream<'static, DomainResult<T>>>;
}
