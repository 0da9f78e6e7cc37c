use serde::Serialize;
use tracing::debug;

use super::error::EmbeddingError;

#[derive(Clone)]
/// Client for an external embedding service.
///
/// Sends `POST {endpoint}/embed` with `{"inputs": [text]}` and expects a
/// JSON array of float vectors, one per input.
pub struct HttpEmbedder {
    client: reqwest::Client,
    endpoint: String,
    dimension: usize,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: Vec<&'a str>,
}

impl HttpEmbedder {
    /// Creates a client for `endpoint`, expecting `dimension`-sized vectors.
    pub fn new(endpoint: &str, dimension: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            dimension,
        }
    }

    /// Returns the configured service endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the expected output dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Embeds one text through the remote service.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!("{}/embed", self.endpoint);

        debug!(text_len = text.len(), "Requesting embedding");

        let response = self
            .client
            .post(&url)
            .json(&EmbedRequest { inputs: vec![text] })
            .send()
            .await
            .map_err(|e| EmbeddingError::RequestFailed {
                endpoint: self.endpoint.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(EmbeddingError::BadStatus {
                endpoint: self.endpoint.clone(),
                status: response.status().as_u16(),
            });
        }

        let mut vectors: Vec<Vec<f32>> =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        let vector = match vectors.pop() {
            Some(v) if vectors.is_empty() => v,
            _ => {
                return Err(EmbeddingError::MalformedResponse {
                    reason: "expected exactly one embedding in response".to_string(),
                });
            }
        };

        if vector.len() != self.dimension {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }

        Ok(vector)
    }
}
