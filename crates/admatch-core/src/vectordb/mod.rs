//! Qdrant-backed ad storage and search.
//!
//! - [`QdrantStore`] is the direct client, bound to one collection.
//! - [`filter`] carries the store-agnostic search filter model.

/// Direct Qdrant store and port trait.
pub mod client;
/// Vector store error types.
pub mod error;
/// Store-agnostic search filter model.
pub mod filter;
#[cfg(any(test, feature = "mock"))]
/// In-memory vector store mock (enabled with `mock` feature).
pub mod mock;
/// Shared vector store model types.
pub mod model;


pub use client::{QdrantStore, VectorStore};
pub use error::VectorStoreError;
pub use filter::{FieldFilter, FilterOp, VectorFilter};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockVectorStore, cosine_similarity};
pub use model::{
    CollectionInfo, CollectionStatus, VectorHit, payload_from_qdrant, payload_to_qdrant,
};

/// Default ad collection name.
pub const DEFAULT_COLLECTION_NAME: &str = "ads";

/// Default embedding dimension for ad vectors.
pub const DEFAULT_VECTOR_SIZE: u64 = 384;
