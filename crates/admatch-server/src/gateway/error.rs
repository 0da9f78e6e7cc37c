use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::gateway::ADMATCH_STATUS_HEADER;
use admatch::{IndexError, MatchError, VectorStoreError};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("vector store error: {0}")]
    StoreFailed(String),

    #[error("corrupt stored payload: {0}")]
    CorruptPayload(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<MatchError> for GatewayError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::Embedding(e) => GatewayError::EmbeddingFailed(e.to_string()),
            MatchError::Store(e) => GatewayError::StoreFailed(e.to_string()),
            MatchError::MissingPayloadField { field } => {
                GatewayError::CorruptPayload(format!("missing required field '{field}'"))
            }
        }
    }
}

impl From<IndexError> for GatewayError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::EmbedBatch { .. } => GatewayError::EmbeddingFailed(err.to_string()),
            IndexError::UpsertBatch { .. } => GatewayError::StoreFailed(err.to_string()),
            IndexError::Store(VectorStoreError::CollectionNotFound { collection }) => {
                GatewayError::NotFound(format!("collection '{collection}' does not exist"))
            }
            IndexError::Store(e) => GatewayError::StoreFailed(e.to_string()),
            IndexError::CorruptPayload(e) => GatewayError::CorruptPayload(e.to_string()),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_message, admatch_status) = match &self {
            GatewayError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string(), "invalid_request")
            }
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string(), "not_found"),
            GatewayError::EmbeddingFailed(_) => (
                StatusCode::BAD_GATEWAY,
                self.to_string(),
                "embedding_error",
            ),
            GatewayError::StoreFailed(_) => {
                (StatusCode::BAD_GATEWAY, self.to_string(), "store_error")
            }
            GatewayError::CorruptPayload(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                self.to_string(),
                "corrupt_payload",
            ),
            GatewayError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                self.to_string(),
                "internal_error",
            ),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            ADMATCH_STATUS_HEADER,
            HeaderValue::from_str(admatch_status).unwrap_or(HeaderValue::from_static("error")),
        );

        let body = Json(ErrorResponse {
            error: error_message,
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
