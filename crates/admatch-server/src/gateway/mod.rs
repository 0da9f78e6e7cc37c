//! HTTP gateway (Axum) for ad matching and inventory administration.
//!
//! This module is primarily used by the `admatch` server binary.

#![allow(missing_docs)]

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use handler::match_ads_handler;
pub use state::HandlerState;

use admatch::{Embedder, VectorStore};

/// Header carrying the gateway's outcome label on every response.
pub const ADMATCH_STATUS_HEADER: &str = "X-Admatch-Status";
/// Header echoing the server-minted request id on successful matches.
pub const ADMATCH_REQUEST_ID_HEADER: &str = "X-Admatch-Request-Id";

pub const ADMATCH_STATUS_HEALTHY: &str = "healthy";
pub const ADMATCH_STATUS_READY: &str = "ready";
pub const ADMATCH_STATUS_ERROR: &str = "error";

pub fn create_router_with_state<E, V>(state: HandlerState<E, V>) -> Router
where
    E: Embedder + Clone + Send + Sync + 'static,
    V: VectorStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/ads/match", post(match_ads_handler))
        .route(
            "/admin/collection",
            put(handler::ensure_collection_handler)
                .get(handler::collection_info_handler)
                .delete(handler::delete_collection_handler),
        )
        .route("/admin/ads", post(handler::upsert_ads_handler))
        .route(
            "/admin/ads/{ad_id}",
            get(handler::get_ad_handler).delete(handler::delete_ad_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub vectordb: &'static str,
    pub embedding: &'static str,
    pub embedder_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        ADMATCH_STATUS_HEADER,
        HeaderValue::from_static(ADMATCH_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<E, V>(State(state): State<HandlerState<E, V>>) -> Response
where
    E: Embedder + Clone + Send + Sync + 'static,
    V: VectorStore + Clone + Send + Sync + 'static,
{
    let vectordb_status = if state.pipeline.store().is_ready().await {
        ADMATCH_STATUS_READY
    } else {
        "pending"
    };

    let embedding_status = ADMATCH_STATUS_READY;

    let embedder_mode = if state.pipeline.is_embedder_stub() {
        "stub"
    } else {
        "real"
    };

    let components = ComponentStatus {
        http: ADMATCH_STATUS_READY,
        vectordb: vectordb_status,
        embedding: embedding_status,
        embedder_mode,
    };

    let is_ready = components.vectordb == ADMATCH_STATUS_READY
        && components.embedding == ADMATCH_STATUS_READY;

    let status_code = if is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status_msg = if is_ready { "ok" } else { "pending" };

    let mut headers = HeaderMap::new();
    headers.insert(
        ADMATCH_STATUS_HEADER,
        HeaderValue::from_str(status_msg).unwrap_or(HeaderValue::from_static("error")),
    );

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
