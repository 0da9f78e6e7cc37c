//! HTTP client helpers for tests.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    /// Posts a match request. Returns the parsed body plus the
    /// `X-Admatch-Request-Id` header value.
    pub async fn match_ads(
        &self,
        body: serde_json::Value,
    ) -> Result<(MatchBody, String), TestClientError> {
        let resp = self
            .client
            .post(self.url("/v1/ads/match"))
            .json(&body)
            .send()
            .await?;

        let request_id = resp
            .headers()
            .get("x-admatch-request-id")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        match resp.status().as_u16() {
            200 => Ok((resp.json().await?, request_id)),
            400 | 422 => Err(TestClientError::BadRequest(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    pub async fn upsert_ads(&self, ads: serde_json::Value) -> Result<u64, TestClientError> {
        let resp = self
            .client
            .post(self.url("/admin/ads"))
            .json(&ads)
            .send()
            .await?;

        if resp.status().is_success() {
            let body: serde_json::Value = resp.json().await?;
            Ok(body["upserted"].as_u64().unwrap_or(0))
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn ensure_collection(
        &self,
        dimension: Option<u64>,
    ) -> Result<bool, TestClientError> {
        let body = match dimension {
            Some(d) => serde_json::json!({"dimension": d}),
            None => serde_json::json!({}),
        };

        let resp = self
            .client
            .put(self.url("/admin/collection"))
            .json(&body)
            .send()
            .await?;

        if resp.status().is_success() {
            let body: serde_json::Value = resp.json().await?;
            Ok(body["created"].as_bool().unwrap_or(false))
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn delete_collection(&self) -> Result<(), TestClientError> {
        let resp = self
            .client
            .delete(self.url("/admin/collection"))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn get_ad(&self, ad_id: &str) -> Result<serde_json::Value, TestClientError> {
        let resp = self
            .client
            .get(self.url(&format!("/admin/ads/{}", ad_id)))
            .send()
            .await?;

        match resp.status().as_u16() {
            200 => Ok(resp.json().await?),
            404 => Err(TestClientError::NotFound(resp.text().await?)),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(TestClientError::UnexpectedStatus(status, body))
            }
        }
    }

    pub async fn delete_ad(&self, ad_id: &str) -> Result<(), TestClientError> {
        let resp = self
            .client
            .delete(self.url(&format!("/admin/ads/{}", ad_id)))
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }

    pub async fn ready(&self) -> Result<ReadyResponse, TestClientError> {
        let resp = self.client.get(self.url("/ready")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchBody {
    pub request_id: String,
    pub placement: String,
    pub candidates: Vec<CandidateBody>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CandidateBody {
    pub ad_id: String,
    pub advertiser_id: String,
    pub title: String,
    pub body: String,
    pub cta_text: String,
    pub landing_url: String,
    pub score: f32,
    pub match_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentStatus {
    pub http: String,
    pub vectordb: String,
    pub embedding: String,
    pub embedder_mode: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub components: ComponentStatus,
}

impl ReadyResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_building() {
        let client = TestClient::new("http://localhost:8080");
        assert_eq!(client.url("/healthz"), "http://localhost:8080/healthz");
        assert_eq!(client.url("healthz"), "http://localhost:8080/healthz");
    }

    #[test]
    fn test_client_exposes_endpoints() {
        let client = TestClient::new("http://localhost:8080");
        std::mem::drop(client.health());
        std::mem::drop(client.ready());
        std::mem::drop(client.match_ads(serde_json::json!({"context_text": "hello"})));
        std::mem::drop(client.ensure_collection(None));
        std::mem::drop(client.delete_collection());
        std::mem::drop(client.get_ad("ad-001"));
        std::mem::drop(client.delete_ad("ad-001"));
        std::mem::drop(client.upsert_ads(serde_json::json!([])));
    }

    #[test]
    fn test_ready_response_is_ok_helper() {
        let ready = ReadyResponse {
            status: "ok".to_string(),
            components: ComponentStatus {
                http: "ready".to_string(),
                vectordb: "ready".to_string(),
                embedding: "ready".to_string(),
                embedder_mode: "stub".to_string(),
            },
        };
        assert!(ready.is_ok());
    }
}
