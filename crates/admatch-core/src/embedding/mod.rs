//! Embedding generation for context texts and ad copy.
//!
//! [`HttpEmbedder`] calls an external embedding service; [`StubEmbedder`]
//! fabricates deterministic vectors for tests and offline runs.

/// Embedding error types.
pub mod error;
/// HTTP-backed embedder client.
pub mod http;
/// Deterministic stub embedder.
pub mod stub;

pub use error::EmbeddingError;
pub use http::HttpEmbedder;
pub use stub::StubEmbedder;

/// Embedding backend required by the match and indexing pipelines.
pub trait Embedder: Send + Sync {
    /// Embeds one text.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;

    /// Returns the output dimension.
    fn dimension(&self) -> usize;

    /// Returns `true` if this embedder fabricates vectors for testing.
    fn is_stub(&self) -> bool {
        false
    }
}

impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed(text).await
    }

    fn dimension(&self) -> usize {
        self.dimension()
    }
}

impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.embed(text).await
    }

    fn dimension(&self) -> usize {
        self.dimension()
    }

    fn is_stub(&self) -> bool {
        true
    }
}
