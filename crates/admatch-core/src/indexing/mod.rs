//! Ad ingestion and collection management.

use futures_util::future::join_all;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::ads::{Ad, MissingPayloadField};
use crate::embedding::{Embedder, EmbeddingError};
use crate::vectordb::{CollectionInfo, CollectionStatus, VectorStore, VectorStoreError};

#[derive(Debug, Error)]
/// Errors returned by ingestion and collection management.
pub enum IndexError {
    /// Embedding one ingestion batch failed.
    #[error("failed to embed batch {batch_index}: {source} ({upserted} ads upserted before failure)")]
    EmbedBatch {
        /// Zero-based index of the failed batch.
        batch_index: usize,
        /// Ads written before the failure.
        upserted: usize,
        /// Underlying embedding error.
        source: EmbeddingError,
    },

    /// Writing one ingestion batch failed.
    #[error("failed to upsert batch {batch_index}: {source} ({upserted} ads upserted before failure)")]
    UpsertBatch {
        /// Zero-based index of the failed batch.
        batch_index: usize,
        /// Ads written before the failure.
        upserted: usize,
        /// Underlying store error.
        source: VectorStoreError,
    },

    /// Vector store error outside batch writes.
    #[error("vector store error: {0}")]
    Store(#[from] VectorStoreError),

    /// A stored payload lacks fields the domain requires.
    #[error("stored ad payload is corrupt: {0}")]
    CorruptPayload(#[from] MissingPayloadField),
}

/// Convenience result type for indexing operations.
pub type IndexResult<T> = Result<T, IndexError>;

/// Writes ads into the vector store in embedding batches.
pub struct Indexer<E: Embedder, V: VectorStore> {
    embedder: E,
    store: V,
    batch_size: usize,
    dimension: u64,
}

impl<E: Embedder, V: VectorStore> std::fmt::Debug for Indexer<E, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indexer")
            .field("batch_size", &self.batch_size)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

impl<E: Embedder, V: VectorStore> Indexer<E, V> {
    pub fn new(embedder: E, store: V, batch_size: usize, dimension: u64) -> Self {
        Self {
            embedder,
            store,
            batch_size,
            dimension,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn store(&self) -> &V {
        &self.store
    }

    /// Embeds and upserts `ads`, at most `batch_size` per store write.
    ///
    /// Texts within a batch embed concurrently. Ingestion stops at the
    /// first failed batch; the error reports how far it got. Re-running
    /// the same ads is safe because point ids derive from ad ids.
    #[instrument(skip(self, ads), fields(ad_count = ads.len()))]
    pub async fn upsert_ads(&self, ads: &[Ad]) -> IndexResult<usize> {
        if ads.is_empty() {
            return Ok(0);
        }

        let mut upserted = 0;

        for (batch_index, batch) in ads.chunks(self.batch_size).enumerate() {
            let embed_futures: Vec<_> = batch
                .iter()
                .map(|ad| {
                    let text = ad.embedding_text();
                    async move { self.embedder.embed(&text).await }
                })
                .collect();

            let vectors = join_all(embed_futures).await;

            let mut embedded = Vec::with_capacity(batch.len());
            for (ad, vector) in batch.iter().zip(vectors) {
                let vector = vector.map_err(|e| IndexError::EmbedBatch {
                    batch_index,
                    upserted,
                    source: e,
                })?;
                embedded.push((ad.clone(), vector));
            }

            let written =
                self.store
                    .upsert_batch(embedded)
                    .await
                    .map_err(|e| IndexError::UpsertBatch {
                        batch_index,
                        upserted,
                        source: e,
                    })?;

            upserted += written;
            debug!(batch_index, batch_len = batch.len(), "Batch upserted");
        }

        info!(
            upserted,
            batches = ads.len().div_ceil(self.batch_size),
            "Ad ingestion complete"
        );

        Ok(upserted)
    }

    /// Creates the collection if missing. `dimension` falls back to the
    /// configured embedding dimension.
    pub async fn ensure_collection(
        &self,
        dimension: Option<u64>,
    ) -> IndexResult<CollectionStatus> {
        let size = dimension.unwrap_or(self.dimension);
        Ok(self.store.ensure_collection(size).await?)
    }

    /// Drops the collection and everything in it.
    pub async fn delete_collection(&self) -> IndexResult<()> {
        Ok(self.store.delete_collection().await?)
    }

    /// Reports collection counters.
    pub async fn collection_info(&self) -> IndexResult<CollectionInfo> {
        Ok(self.store.collection_info().await?)
    }

    /// Deletes one ad by id.
    pub async fn delete_ad(&self, ad_id: &str) -> IndexResult<()> {
        Ok(self.store.delete(ad_id).await?)
    }

    /// Fetches one ad by id.
    ///
    /// A stored payload that no longer carries its display fields is
    /// reported as corrupt rather than silently skipped.
    pub async fn get_ad(&self, ad_id: &str) -> IndexResult<Option<Ad>> {
        match self.store.get(ad_id).await? {
            Some(payload) => Ok(Some(Ad::try_from(payload)?)),
            None => Ok(None),
        }
    }
}
