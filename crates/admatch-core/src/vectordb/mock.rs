use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use uuid::Uuid;

use crate::ads::{Ad, AdPayload};
use crate::ident::{DEFAULT_AD_ID_NAMESPACE, ad_point_id};
use crate::vectordb::{
    CollectionInfo, CollectionStatus, DEFAULT_COLLECTION_NAME, FieldFilter, VectorFilter,
    VectorHit, VectorStore, VectorStoreError,
};

/// In-memory stand-in for `QdrantStore` with the same filter semantics.
///
/// Clones share the same underlying state, matching the real client.
#[derive(Clone)]
pub struct MockVectorStore {
    inner: Arc<MockStoreInner>,
}

struct MockStoreInner {
    collection: std::sync::RwLock<Option<MockCollection>>,
    upsert_calls: AtomicUsize,
    name: String,
    namespace: Uuid,
}

#[derive(Default, Clone)]
struct MockCollection {
    vector_size: u64,
    points: HashMap<Uuid, MockStoredPoint>,
}

#[derive(Clone)]
struct MockStoredPoint {
    vector: Vec<f32>,
    payload: AdPayload,
}

impl Default for MockVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockVectorStore {
    pub fn new() -> Self {
        Self::with_collection(DEFAULT_COLLECTION_NAME)
    }

    pub fn with_collection(name: &str) -> Self {
        Self {
            inner: Arc::new(MockStoreInner {
                collection: std::sync::RwLock::new(None),
                upsert_calls: AtomicUsize::new(0),
                name: name.to_string(),
                namespace: DEFAULT_AD_ID_NAMESPACE,
            }),
        }
    }

    /// Number of points currently stored, `None` before `ensure_collection`.
    pub fn point_count(&self) -> Option<usize> {
        self.inner.collection
            .read()
            .ok()?
            .as_ref()
            .map(|c| c.points.len())
    }

    /// Number of `upsert_batch` invocations observed so far.
    pub fn upsert_call_count(&self) -> usize {
        self.inner.upsert_calls.load(Ordering::SeqCst)
    }

    /// Poisons the internal RwLock for testing error handling paths.
    /// This method is only available in test builds.
    #[cfg(test)]
    pub fn poison_lock(&self) {
        use std::thread;

        let collection_ptr = &self.inner.collection as *const _ as usize;
        let handle = thread::spawn(move || {
            // SAFETY: We're in test code, the pointer is valid for the duration
            let collection: &std::sync::RwLock<Option<MockCollection>> =
                unsafe { &*(collection_ptr as *const _) };
            let _guard = collection.write().unwrap();
            panic!("Intentional panic to poison lock for testing");
        });
        // Wait for the thread to panic, which poisons the lock
        let _ = handle.join();
    }
}

impl VectorStore for MockVectorStore {
    async fn ensure_collection(
        &self,
        vector_size: u64,
    ) -> Result<CollectionStatus, VectorStoreError> {
        let mut collection =
            self.inner.collection
                .write()
                .map_err(|_| VectorStoreError::CreateCollectionFailed {
                    collection: self.inner.name.clone(),
                    message: "lock poisoned".to_string(),
                })?;

        let created = collection.is_none();
        if created {
            *collection = Some(MockCollection {
                vector_size,
                points: HashMap::new(),
            });
        }

        Ok(CollectionStatus {
            name: self.inner.name.clone(),
            created,
        })
    }

    async fn delete_collection(&self) -> Result<(), VectorStoreError> {
        let mut collection =
            self.inner.collection
                .write()
                .map_err(|_| VectorStoreError::DeleteCollectionFailed {
                    collection: self.inner.name.clone(),
                    message: "lock poisoned".to_string(),
                })?;

        *collection = None;
        Ok(())
    }

    async fn collection_info(&self) -> Result<CollectionInfo, VectorStoreError> {
        let collection =
            self.inner.collection
                .read()
                .map_err(|_| VectorStoreError::CollectionInfoFailed {
                    collection: self.inner.name.clone(),
                    message: "lock poisoned".to_string(),
                })?;

        let coll = collection
            .as_ref()
            .ok_or_else(|| VectorStoreError::CollectionNotFound {
                collection: self.inner.name.clone(),
            })?;

        Ok(CollectionInfo {
            name: self.inner.name.clone(),
            indexed_count: coll.points.len() as u64,
            total_count: coll.points.len() as u64,
            status: "green".to_string(),
        })
    }

    async fn upsert_batch(&self, ads: Vec<(Ad, Vec<f32>)>) -> Result<usize, VectorStoreError> {
        self.inner.upsert_calls.fetch_add(1, Ordering::SeqCst);

        let mut collection =
            self.inner.collection
                .write()
                .map_err(|_| VectorStoreError::UpsertFailed {
                    collection: self.inner.name.clone(),
                    message: "lock poisoned".to_string(),
                })?;

        let coll = collection
            .as_mut()
            .ok_or_else(|| VectorStoreError::CollectionNotFound {
                collection: self.inner.name.clone(),
            })?;

        let count = ads.len();
        for (ad, vector) in ads {
            if vector.len() as u64 != coll.vector_size {
                return Err(VectorStoreError::InvalidDimension {
                    expected: coll.vector_size as usize,
                    actual: vector.len(),
                });
            }

            let point_id = ad_point_id(&self.inner.namespace, &ad.ad_id);
            coll.points.insert(
                point_id,
                MockStoredPoint {
                    vector,
                    payload: ad.to_payload(),
                },
            );
        }

        Ok(count)
    }

    async fn query(
        &self,
        vector: Vec<f32>,
        filter: &VectorFilter,
        limit: u64,
    ) -> Result<Vec<VectorHit>, VectorStoreError> {
        let collection = self
            .inner
            .collection
            .read()
            .map_err(|_| VectorStoreError::SearchFailed {
                collection: self.inner.name.clone(),
                message: "lock poisoned".to_string(),
            })?;

        let coll = collection
            .as_ref()
            .ok_or_else(|| VectorStoreError::CollectionNotFound {
                collection: self.inner.name.clone(),
            })?;

        let mut hits: Vec<VectorHit> = coll
            .points
            .iter()
            .filter(|(_, p)| matches_filter(&p.payload, filter))
            .map(|(id, p)| VectorHit {
                point_id: id.to_string(),
                score: cosine_similarity(&vector, &p.vector),
                payload: p.payload.clone(),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        hits.truncate(limit as usize);
        Ok(hits)
    }

    async fn get(&self, ad_id: &str) -> Result<Option<AdPayload>, VectorStoreError> {
        let collection = self
            .inner
            .collection
            .read()
            .map_err(|_| VectorStoreError::RetrieveFailed {
                collection: self.inner.name.clone(),
                message: "lock poisoned".to_string(),
            })?;

        let coll = collection
            .as_ref()
            .ok_or_else(|| VectorStoreError::CollectionNotFound {
                collection: self.inner.name.clone(),
            })?;

        let point_id = ad_point_id(&self.inner.namespace, ad_id);
        Ok(coll.points.get(&point_id).map(|p| p.payload.clone()))
    }

    async fn delete(&self, ad_id: &str) -> Result<(), VectorStoreError> {
        let mut collection =
            self.inner.collection
                .write()
                .map_err(|_| VectorStoreError::DeleteFailed {
                    collection: self.inner.name.clone(),
                    message: "lock poisoned".to_string(),
                })?;

        let coll = collection
            .as_mut()
            .ok_or_else(|| VectorStoreError::CollectionNotFound {
                collection: self.inner.name.clone(),
            })?;

        let point_id = ad_point_id(&self.inner.namespace, ad_id);
        coll.points.remove(&point_id);
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        self.inner.collection.read().is_ok()
    }
}

/// Evaluate a domain filter the way the real store would: every `must`
/// condition needs at least one value overlap, every `must_not` condition
/// needs none.
fn matches_filter(payload: &AdPayload, filter: &VectorFilter) -> bool {
    filter.must.iter().all(|f| field_overlaps(payload, f))
        && filter.must_not.iter().all(|f| !field_overlaps(payload, f))
}

fn field_overlaps(payload: &AdPayload, filter: &FieldFilter) -> bool {
    let values = field_values(payload, &filter.field);
    filter
        .values
        .iter()
        .any(|wanted| values.iter().any(|have| have == wanted))
}

fn field_values(payload: &AdPayload, field: &str) -> Vec<String> {
    match field {
        "ad_id" => payload.ad_id.clone().into_iter().collect(),
        "advertiser_id" => payload.advertiser_id.clone().into_iter().collect(),
        "topics" => payload.topics.clone(),
        "locale" => payload.locale.clone(),
        "verticals" => payload.verticals.clone(),
        _ => Vec::new(),
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
