//! MongoDB entity context implementation.

use std::sync::Arc;

use async_trait::async_trait;
use bson::{Document, doc};
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use mongodb::Collection;
use mongodb::options::{CountOptions, ReplaceOptions};
use tracing::debug;

use stratum_domain::{
    AggregateRoot, Criteria, DocumentMapping, DomainError, DomainResult, EntityContext,
};

use crate::client::MongoDbClient;
use crate::document::{criteria_document, from_mapped_document, to_persisted_document};
use crate::error::{MongoError, MongoResult};
use crate::mappings::MappingRegistry;

/// A MongoDB [`EntityContext`] implementation.
///
/// Every operation goes through the mapping the registry resolves for
/// the entity type: outgoing documents have secured elements stripped,
/// incoming documents are checked against the mapped elements. The
/// database handle is resolved lazily on first use.
pub struct MongoEntityContext {
    client: Arc<MongoDbClient>,
    mappings: Arc<MappingRegistry>,
}

impl MongoEntityContext {
    /// Create a context over the given client and registry.
    pub fn new(client: Arc<MongoDbClient>, mappings: Arc<MappingRegistry>) -> Self {
        Self { client, mappings }
    }

    /// The mapping registry backing this context.
    pub fn mappings(&self) -> &MappingRegistry {
        &self.mappings
    }

    /// The client backing this context.
    pub fn client(&self) -> &MongoDbClient {
        &self.client
    }

    async fn mapped_collection<T: AggregateRoot>(
        &self,
    ) -> MongoResult<(DocumentMapping, Collection<Document>)> {
        let mapping = self.mappings.mapping_for::<T>();
        let collection = self.client.collection(mapping.collection_name()).await?;
        Ok((mapping, collection))
    }

    /// The instances matching a BSON filter document.
    pub async fn query<T: AggregateRoot>(&self, filter: Document) -> MongoResult<Vec<T>> {
        let (mapping, collection) = self.mapped_collection::<T>().await?;
        debug!(collection = %collection.name(), "finding instances");

        let documents: Vec<Document> = collection.find(filter, None).await?.try_collect().await?;
        documents
            .into_iter()
            .map(|doc| from_mapped_document(doc, &mapping))
            .collect()
    }

    /// Whether any instance matches a BSON filter document.
    pub async fn any<T: AggregateRoot>(&self, filter: Document) -> MongoResult<bool> {
        let (_, collection) = self.mapped_collection::<T>().await?;
        let options = CountOptions::builder().limit(1).build();
        let count = collection.count_documents(filter, options).await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl EntityContext for MongoEntityContext {
    async fn add<T: AggregateRoot>(&self, instances: &[T]) -> DomainResult<()> {
        if instances.is_empty() {
            return Ok(());
        }

        let (mapping, collection) = self.mapped_collection::<T>().await?;
        debug!(
            collection = %collection.name(),
            count = instances.len(),
            "adding instances"
        );

        let documents = instances
            .iter()
            .map(|instance| to_persisted_document(instance, &mapping))
            .collect::<MongoResult<Vec<_>>>()?;
        collection
            .insert_many(documents, None)
            .await
            .map_err(MongoError::from)?;
        Ok(())
    }

    async fn update<T: AggregateRoot>(&self, instances: &[T]) -> DomainResult<()> {
        if instances.is_empty() {
            return Ok(());
        }

        let (mapping, collection) = self.mapped_collection::<T>().await?;
        debug!(
            collection = %collection.name(),
            count = instances.len(),
            "replacing instances"
        );

        let options = ReplaceOptions::builder().upsert(true).build();
        for instance in instances {
            let document = to_persisted_document(instance, &mapping)?;
            collection
                .replace_one(doc! { "_id": instance.id() }, document, options.clone())
                .await
                .map_err(MongoError::from)?;
        }
        Ok(())
    }

    async fn remove<T: AggregateRoot>(&self, instances: &[T]) -> DomainResult<()> {
        if instances.is_empty() {
            return Ok(());
        }

        let (_, collection) = self.mapped_collection::<T>().await?;
        debug!(
            collection = %collection.name(),
            count = instances.len(),
            "removing instances"
        );

        let filter = crate::filter::by_ids(instances.iter().map(|e| e.id()));
        collection
            .delete_many(filter, None)
            .await
            .map_err(MongoError::from)?;
        Ok(())
    }

    async fn find<T: AggregateRoot>(&self, id: &str) -> DomainResult<Option<T>> {
        let (mapping, collection) = self.mapped_collection::<T>().await?;
        let result = collection
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(MongoError::from)?;
        result
            .map(|doc| from_mapped_document(doc, &mapping))
            .transpose()
            .map_err(DomainError::from)
    }

    async fn find_where<T: AggregateRoot>(&self, criteria: Criteria) -> DomainResult<Vec<T>> {
        let filter = criteria_document(criteria.value())?;
        Ok(self.query::<T>(filter).await?)
    }

    async fn find_all<T: AggregateRoot>(&self) -> DomainResult<Vec<T>> {
        Ok(self.query::<T>(Document::new()).await?)
    }

    async fn clear<T: AggregateRoot>(&self) -> DomainResult<()> {
        let (_, collection) = self.mapped_collection::<T>().await?;
        debug!(collection = %collection.name(), "clearing collection");

        collection
            .delete_many(Document::new(), None)
            .await
            .map_err(MongoError::from)?;
        Ok(())
    }

    async fn exists<T: AggregateRoot>(&self, id: &str) -> DomainResult<bool> {
        Ok(self.any::<T>(doc! { "_id": id }).await?)
    }

    async fn exists_where<T: AggregateRoot>(&self, criteria: Criteria) -> DomainResult<bool> {
        let filter = criteria_document(criteria.value())?;
        Ok(self.any::<T>(filter).await?)
    }

    async fn open_query<T: AggregateRoot>(
        &self,
    ) -> DomainResult<BoxStream<'static, DomainResult<T>>> {
        let (mapping, collection) = self.mapped_collection::<T>().await?;
        debug!(collection = %collection.name(), "opening query");

        let cursor = collection
            .find(Document::new(), None)
            .await
            .map_err(MongoError::from)?;

        Ok(cursor
            .map(move |item| {
                item.map_err(|e| DomainError::from(MongoError::from(e)))
                    .and_then(|doc| {
                        from_mapped_document(doc, &mapping).map_err(DomainError::from)
                    })
            })
            .boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use stratum_domain::{DocumentMapped, DocumentMapping};

    use crate::options::MongoDbOptions;

    #[derive(Debug, Serialize, Deserialize)]
    struct Item {
        #[serde(rename = "_id")]
        id: String,
        name: String,
    }

    impl DocumentMapped for Item {
        fn document_mapping() -> DocumentMapping {
            DocumentMapping::new("Item").id_field("id").field("name")
        }
    }

    impl AggregateRoot for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn context() -> MongoEntityContext {
        let options = Arc::new(MongoDbOptions::default());
        let client = Arc::new(MongoDbClient::new(options));
        MongoEntityContext::new(client, Arc::new(MappingRegistry::new()))
    }

    #[tokio::test]
    async fn test_empty_slices_are_no_ops() {
        // No instances, no driver call, no connection attempt.
        let context = context();
        let none: [Item; 0] = [];

        context.add(&none).await.unwrap();
        context.update(&none).await.unwrap();
        context.remove(&none).await.unwrap();

        assert!(!context.client().is_resolved());
    }

    #[test]
    fn test_collection_resolution_registers_mapping() {
        let context = context();
        assert!(!context.mappings().contains::<Item>());
        let name = context.mappings().collection_for::<Item>();
        assert_eq!(name, "items");
        assert!(context.mappings().contains::<Item>());
    }
}
