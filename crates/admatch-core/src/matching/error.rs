use thiserror::Error;

use crate::ads::MissingPayloadField;
use crate::embedding::EmbeddingError;
use crate::vectordb::VectorStoreError;

#[derive(Debug, Error)]
/// Errors returned by the match pipeline.
pub enum MatchError {
    /// Embedding the context text failed.
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    /// Vector store error (search/retrieve).
    #[error("vector store error: {0}")]
    Store(#[from] VectorStoreError),

    /// A stored payload lacks a display field, so no candidate can be
    /// shaped from it.
    #[error("ad payload missing required field '{field}'")]
    MissingPayloadField {
        /// Field name.
        field: &'static str,
    },
}

impl From<MissingPayloadField> for MatchError {
    fn from(err: MissingPayloadField) -> Self {
        MatchError::MissingPayloadField { field: err.field }
    }
}

/// Convenience result type for match operations.
pub type MatchResult<T> = Result<T, MatchError>;
