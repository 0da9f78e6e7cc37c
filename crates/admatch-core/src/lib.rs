//! Admatch library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Domain Model
//! - [`Ad`], [`AdTargeting`], [`AdPolicy`] - Advertiser inventory
//! - [`AdPayload`] - Storage format for stored ads
//! - [`MatchRequest`], [`MatchConstraints`], [`PlacementContext`] - Match input
//! - [`MatchResponse`], [`AdCandidate`] - Match output
//!
//! ## Orchestrators
//! - [`MatchPipeline`] - Context in, policy-filtered candidates out
//! - [`Indexer`] - Batched ad ingestion and collection management
//!
//! ## Ports & Adapters
//! - [`Embedder`] with [`HttpEmbedder`] and [`StubEmbedder`]
//! - [`VectorStore`] with [`QdrantStore`]
//!
//! ## Enforcement
//! - [`PolicyEngine`] - Post-retrieval suitability filtering
//! - [`TargetingEngine`] - Pre-retrieval filter construction
//!
//! ## Configuration
//! - [`Config`], [`ConfigError`] - `ADMATCH_*` environment settings
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod ads;
pub mod config;
pub mod embedding;
pub mod ident;
pub mod indexing;
pub mod matching;
pub mod policy;
pub mod targeting;
pub mod vectordb;

pub use ads::{Ad, AdPayload, AdPolicy, AdTargeting, MissingPayloadField};
pub use config::{Config, ConfigError, DEFAULT_MAX_BATCH_SIZE, DEFAULT_QDRANT_URL};
pub use embedding::{Embedder, EmbeddingError, HttpEmbedder, StubEmbedder};
pub use ident::{DEFAULT_AD_ID_NAMESPACE, ad_point_id, match_id};
pub use indexing::{IndexError, IndexResult, Indexer};
pub use matching::{
    AdCandidate, DEFAULT_PLACEMENT, DEFAULT_SURFACE, DEFAULT_TOP_K, MatchConstraints, MatchError,
    MatchPipeline, MatchRequest, MatchResponse, MatchResult, PlacementContext,
    normalize_whitespace,
};
pub use policy::{PolicyEngine, PolicyRule};
pub use targeting::TargetingEngine;
#[cfg(any(test, feature = "mock"))]
pub use vectordb::{MockVectorStore, cosine_similarity};
pub use vectordb::{
    CollectionInfo, CollectionStatus, DEFAULT_COLLECTION_NAME, DEFAULT_VECTOR_SIZE, FieldFilter,
    FilterOp, QdrantStore, VectorFilter, VectorHit, VectorStore, VectorStoreError,
    payload_from_qdrant, payload_to_qdrant,
};
