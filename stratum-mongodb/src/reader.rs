//! Read-only queryable projection over a named collection.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use bson::Document;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use mongodb::Collection;
use tracing::debug;

use stratum_domain::{Criteria, DocumentMapping, DomainError, DomainResult, EntityReader, Projection};

use crate::client::MongoDbClient;
use crate::document::{criteria_document, from_mapped_document};
use crate::error::{MongoError, MongoResult};
use crate::mappings::MappingRegistry;

/// A MongoDB [`EntityReader`] implementation for search and reporting.
///
/// Construction registers a read-side mapping for the item type if it
/// has none, tolerating document elements with no matching field. A
/// mapping already in the registry wins, strictness included. The
/// collection name comes from the mapping unless overridden.
pub struct MongoReader<T: Projection> {
    client: Arc<MongoDbClient>,
    mapping: DocumentMapping,
    collection: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Projection> MongoReader<T> {
    /// Create a reader over the mapped collection for `T`.
    pub fn new(client: Arc<MongoDbClient>, mappings: Arc<MappingRegistry>) -> Self {
        mappings.register_reader::<T>();
        let mapping = mappings.mapping_for::<T>();
        let collection = mapping.collection_name().to_string();
        Self {
            client,
            mapping,
            collection,
            _marker: PhantomData,
        }
    }

    /// Create a reader over an explicitly named collection.
    pub fn with_collection(
        client: Arc<MongoDbClient>,
        mappings: Arc<MappingRegistry>,
        collection: impl Into<String>,
    ) -> Self {
        mappings.register_reader::<T>();
        let mapping = mappings.mapping_for::<T>();
        Self {
            client,
            mapping,
            collection: collection.into(),
            _marker: PhantomData,
        }
    }

    /// The collection this reader targets.
    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    async fn collection(&self) -> MongoResult<Collection<Document>> {
        self.client.collection(&self.collection).await
    }

    /// The items matching a BSON filter document.
    pub async fn query_filtered(&self, filter: Document) -> MongoResult<Vec<T>> {
        let collection = self.collection().await?;
        debug!(collection = %self.collection, "reading items");

        let documents: Vec<Document> = collection.find(filter, None).await?.try_collect().await?;
        documents
            .into_iter()
            .map(|doc| from_mapped_document(doc, &self.mapping))
            .collect()
    }
}

#[async_trait]
impl<T: Projection> EntityReader<T> for MongoReader<T> {
    async fn read(&self) -> DomainResult<BoxStream<'static, DomainResult<T>>> {
        let collection = self.collection().await?;
        debug!(collection = %self.collection, "opening read stream");

        let cursor = collection
            .find(Document::new(), None)
            .await
            .map_err(MongoError::from)?;

        let mapping = self.mapping.clone();
        Ok(cursor
            .map(move |item| {
                item.map_err(|e| DomainError::from(MongoError::from(e)))
                    .and_then(|doc| {
                        from_mapped_document(doc, &mapping).map_err(DomainError::from)
                    })
            })
            .boxed())
    }

    async fn query(&self, criteria: Criteria) -> DomainResult<Vec<T>> {
        let filter = criteria_document(criteria.value())?;
        Ok(self.query_filtered(filter).await?)
    }

    async fn count(&self, criteria: Criteria) -> DomainResult<u64> {
        let filter = criteria_document(criteria.value())?;
        let collection = self.collection().await?;
        let count = collection
            .count_documents(filter, None)
            .await
            .map_err(MongoError::from)?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use stratum_domain::{DocumentMapped, DocumentMapping};

    use crate::options::MongoDbOptions;

    #[derive(Debug, Deserialize)]
    struct ItemSummary {
        #[serde(rename = "_id")]
        #[allow(dead_code)]
        id: String,
    }

    impl DocumentMapped for ItemSummary {
        fn document_mapping() -> DocumentMapping {
            DocumentMapping::new("Item").id_field("id")
        }
    }

    fn deps() -> (Arc<MongoDbClient>, Arc<MappingRegistry>) {
        let options = Arc::new(MongoDbOptions::default());
        (
            Arc::new(MongoDbClient::new(options)),
            Arc::new(MappingRegistry::new()),
        )
    }

    #[test]
    fn test_reader_uses_mapped_collection() {
        let (client, mappings) = deps();
        let reader = MongoReader::<ItemSummary>::new(client, mappings.clone());
        assert_eq!(reader.collection_name(), "items");

        // Construction registered a tolerant read-side mapping.
        assert!(mappings.mapping_of::<ItemSummary>().unwrap().ignores_extra());
        assert!(reader.mapping.ignores_extra());
    }

    #[test]
    fn test_reader_honors_preregistered_strict_mapping() {
        let (client, mappings) = deps();
        mappings.register::<ItemSummary>();

        let reader = MongoReader::<ItemSummary>::new(client, mappings);
        assert!(!reader.mapping.ignores_extra());
    }

    #[test]
    fn test_reader_collection_override() {
        let (client, mappings) = deps();
        let reader =
            MongoReader::<ItemSummary>::with_collection(client, mappings, "item_search");
        assert_eq!(reader.collection_name(), "item_search");
    }
}
