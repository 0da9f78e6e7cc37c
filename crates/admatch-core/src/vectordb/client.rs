use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, Distance, Filter, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder,
};
use uuid::Uuid;

use super::error::VectorStoreError;
use super::filter::VectorFilter;
use super::model::{CollectionInfo, CollectionStatus, VectorHit, payload_from_qdrant, payload_to_qdrant};
use crate::ads::{Ad, AdPayload};
use crate::ident::ad_point_id;

#[derive(Clone)]
/// Qdrant-backed ad store bound to a single collection.
pub struct QdrantStore {
    client: Qdrant,
    url: String,
    collection: String,
    namespace: Uuid,
}

impl QdrantStore {
    /// Creates a store for `url`, bound to `collection`. Point ids are
    /// derived from ad ids under `namespace`.
    pub async fn new(
        url: &str,
        collection: &str,
        namespace: Uuid,
    ) -> Result<Self, VectorStoreError> {
        let client =
            Qdrant::from_url(url)
                .build()
                .map_err(|e| VectorStoreError::ConnectionFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self {
            client,
            url: url.to_string(),
            collection: collection.to_string(),
            namespace,
        })
    }

    /// Returns the underlying Qdrant client.
    pub fn client(&self) -> &Qdrant {
        &self.client
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the bound collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), VectorStoreError> {
        self.client
            .health_check()
            .await
            .map_err(|e| VectorStoreError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Creates the bound collection with cosine distance.
    pub async fn create_collection(&self, vector_size: u64) -> Result<(), VectorStoreError> {
        let vectors_config = VectorParamsBuilder::new(vector_size, Distance::Cosine);

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(vectors_config)
                    .on_disk_payload(true),
            )
            .await
            .map_err(|e| VectorStoreError::CreateCollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    /// Ensures the bound collection exists (creates it if missing).
    pub async fn ensure_collection(
        &self,
        vector_size: u64,
    ) -> Result<CollectionStatus, VectorStoreError> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| VectorStoreError::CreateCollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        if !exists {
            self.create_collection(vector_size).await?;
        }

        Ok(CollectionStatus {
            name: self.collection.clone(),
            created: !exists,
        })
    }

    /// Drops the bound collection and every point in it.
    pub async fn delete_collection(&self) -> Result<(), VectorStoreError> {
        self.client
            .delete_collection(&self.collection)
            .await
            .map_err(|e| VectorStoreError::DeleteCollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    /// Reports point counters and status for the bound collection.
    pub async fn collection_info(&self) -> Result<CollectionInfo, VectorStoreError> {
        let response = self
            .client
            .collection_info(&self.collection)
            .await
            .map_err(|e| VectorStoreError::CollectionInfoFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        let info = response
            .result
            .ok_or_else(|| VectorStoreError::CollectionNotFound {
                collection: self.collection.clone(),
            })?;

        let status = format!("{:?}", info.status()).to_lowercase();

        Ok(CollectionInfo {
            name: self.collection.clone(),
            indexed_count: info.indexed_vectors_count.unwrap_or(0),
            total_count: info.points_count.unwrap_or(0),
            status,
        })
    }

    /// Upserts one batch of embedded ads. Re-upserting an ad id overwrites
    /// its point in place. Returns the number of ads written.
    pub async fn upsert_batch(
        &self,
        ads: Vec<(Ad, Vec<f32>)>,
    ) -> Result<usize, VectorStoreError> {
        if ads.is_empty() {
            return Ok(0);
        }

        let count = ads.len();
        let points: Vec<PointStruct> = ads
            .into_iter()
            .map(|(ad, vector)| {
                let point_id = ad_point_id(&self.namespace, &ad.ad_id);
                let payload = payload_to_qdrant(&ad.to_payload());
                PointStruct::new(point_id.to_string(), vector, payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| VectorStoreError::UpsertFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(count)
    }

    /// Searches the bound collection by vector similarity.
    pub async fn query(
        &self,
        vector: Vec<f32>,
        filter: &VectorFilter,
        limit: u64,
    ) -> Result<Vec<VectorHit>, VectorStoreError> {
        let mut search_builder =
            SearchPointsBuilder::new(&self.collection, vector, limit).with_payload(true);

        if !filter.is_noop() {
            search_builder = search_builder.filter(to_qdrant_filter(filter));
        }

        let search_result = self
            .client
            .search_points(search_builder)
            .await
            .map_err(|e| VectorStoreError::SearchFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        let hits = search_result
            .result
            .into_iter()
            .filter_map(VectorHit::from_scored_point)
            .collect();

        Ok(hits)
    }

    /// Fetches the stored payload for one ad id, if present.
    pub async fn get(&self, ad_id: &str) -> Result<Option<AdPayload>, VectorStoreError> {
        use qdrant_client::qdrant::GetPointsBuilder;

        let point_id = ad_point_id(&self.namespace, ad_id);

        let response = self
            .client
            .get_points(
                GetPointsBuilder::new(&self.collection, vec![point_id.to_string().into()])
                    .with_payload(true),
            )
            .await
            .map_err(|e| VectorStoreError::RetrieveFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(response
            .result
            .first()
            .map(|point| payload_from_qdrant(&point.payload)))
    }

    /// Deletes one ad by id. Deleting an absent ad succeeds.
    pub async fn delete(&self, ad_id: &str) -> Result<(), VectorStoreError> {
        use qdrant_client::qdrant::{DeletePointsBuilder, PointsIdsList};

        let point_id = ad_point_id(&self.namespace, ad_id);
        let points_selector = PointsIdsList {
            ids: vec![point_id.to_string().into()],
        };

        self.client
            .delete_points(
                DeletePointsBuilder::new(&self.collection)
                    .points(points_selector)
                    .wait(true),
            )
            .await
            .map_err(|e| VectorStoreError::DeleteFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    /// Returns `true` when the store answers health checks.
    pub async fn is_ready(&self) -> bool {
        self.client.health_check().await.is_ok()
    }
}

/// Translate a domain filter into a Qdrant filter. Both polarities use
/// keyword-set matches; placement in `must_not` expresses exclusion.
pub fn to_qdrant_filter(filter: &VectorFilter) -> Filter {
    Filter {
        must: filter
            .must
            .iter()
            .map(|f| Condition::matches(f.field.clone(), f.values.clone()))
            .collect(),
        must_not: filter
            .must_not
            .iter()
            .map(|f| Condition::matches(f.field.clone(), f.values.clone()))
            .collect(),
        ..Default::default()
    }
}

/// Minimal async interface used by higher-level code.
pub trait VectorStore: Send + Sync {
    /// Ensures the collection exists.
    fn ensure_collection(
        &self,
        vector_size: u64,
    ) -> impl std::future::Future<Output = Result<CollectionStatus, VectorStoreError>> + Send;

    /// Drops the collection.
    fn delete_collection(
        &self,
    ) -> impl std::future::Future<Output = Result<(), VectorStoreError>> + Send;

    /// Reports collection counters.
    fn collection_info(
        &self,
    ) -> impl std::future::Future<Output = Result<CollectionInfo, VectorStoreError>> + Send;

    /// Upserts one batch of embedded ads.
    fn upsert_batch(
        &self,
        ads: Vec<(Ad, Vec<f32>)>,
    ) -> impl std::future::Future<Output = Result<usize, VectorStoreError>> + Send;

    /// Searches for similar ads.
    fn query(
        &self,
        vector: Vec<f32>,
        filter: &VectorFilter,
        limit: u64,
    ) -> impl std::future::Future<Output = Result<Vec<VectorHit>, VectorStoreError>> + Send;

    /// Fetches one stored payload.
    fn get(
        &self,
        ad_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<AdPayload>, VectorStoreError>> + Send;

    /// Deletes one ad.
    fn delete(
        &self,
        ad_id: &str,
    ) -> impl std::future::Future<Output = Result<(), VectorStoreError>> + Send;

    /// Reports store reachability.
    fn is_ready(&self) -> impl std::future::Future<Output = bool> + Send;
}

impl VectorStore for QdrantStore {
    async fn ensure_collection(
        &self,
        vector_size: u64,
    ) -> Result<CollectionStatus, VectorStoreError> {
        self.ensure_collection(vector_size).await
    }

    async fn delete_collection(&self) -> Result<(), VectorStoreError> {
        self.delete_collection().await
    }

    async fn collection_info(&self) -> Result<CollectionInfo, VectorStoreError> {
        self.collection_info().await
    }

    async fn upsert_batch(&self, ads: Vec<(Ad, Vec<f32>)>) -> Result<usize, VectorStoreError> {
        self.upsert_batch(ads).await
    }

    async fn query(
        &self,
        vector: Vec<f32>,
        filter: &VectorFilter,
        limit: u64,
    ) -> Result<Vec<VectorHit>, VectorStoreError> {
        self.query(vector, filter, limit).await
    }

    async fn get(&self, ad_id: &str) -> Result<Option<AdPayload>, VectorStoreError> {
        self.get(ad_id).await
    }

    async fn delete(&self, ad_id: &str) -> Result<(), VectorStoreError> {
        self.delete(ad_id).await
    }

    async fn is_ready(&self) -> bool {
        self.is_ready().await
    }
}
