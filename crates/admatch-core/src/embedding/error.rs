use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned while generating embeddings.
pub enum EmbeddingError {
    /// The embedding service could not be reached.
    #[error("failed to reach embedding service at '{endpoint}': {message}")]
    RequestFailed {
        /// Service endpoint.
        endpoint: String,
        /// Error message.
        message: String,
    },

    /// The embedding service answered with a non-success status.
    #[error("embedding service at '{endpoint}' returned status {status}")]
    BadStatus {
        /// Service endpoint.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },

    /// The embedding service response could not be decoded.
    #[error("embedding service returned a malformed response: {reason}")]
    MalformedResponse {
        /// Decode failure description.
        reason: String,
    },

    /// The produced vector has the wrong dimension.
    #[error("invalid embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },
}
