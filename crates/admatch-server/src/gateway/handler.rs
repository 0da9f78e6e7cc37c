use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument};

use crate::gateway::ADMATCH_REQUEST_ID_HEADER;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{EnsureCollectionBody, MatchParams, UpsertAdsResponse};
use crate::gateway::state::HandlerState;
use admatch::matching::MatchRequest;
use admatch::{Ad, Embedder, VectorStore};

/// Largest `top_k` a caller may request in one match call.
pub const MAX_TOP_K: u64 = 100;

#[instrument(skip(state, params), fields(top_k = params.top_k, placement = %params.placement.placement))]
pub async fn match_ads_handler<E, V>(
    State(state): State<HandlerState<E, V>>,
    Json(params): Json<MatchParams>,
) -> Result<Response, GatewayError>
where
    E: Embedder + Clone + Send + Sync + 'static,
    V: VectorStore + Clone + Send + Sync + 'static,
{
    let request = validate_match_params(params)?;

    debug!(context_len = request.context_text.len(), "Processing match request");

    let response = state.pipeline.match_ads(&request).await?;

    info!(
        request_id = %response.request_id,
        candidates = response.candidates.len(),
        "Match request served"
    );

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&response.request_id.to_string()) {
        headers.insert(ADMATCH_REQUEST_ID_HEADER, value);
    }

    Ok((StatusCode::OK, headers, Json(response)).into_response())
}

/// Checks wire-level invariants before anything reaches a port.
pub(crate) fn validate_match_params(params: MatchParams) -> Result<MatchRequest, GatewayError> {
    if params.context_text.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "`context_text` must not be empty".to_string(),
        ));
    }

    if params.top_k == 0 || params.top_k > MAX_TOP_K {
        return Err(GatewayError::InvalidRequest(format!(
            "`top_k` must be between 1 and {MAX_TOP_K}"
        )));
    }

    Ok(MatchRequest {
        context_text: params.context_text,
        top_k: params.top_k,
        constraints: params.constraints,
        placement: params.placement,
    })
}

#[instrument(skip(state, body))]
pub async fn ensure_collection_handler<E, V>(
    State(state): State<HandlerState<E, V>>,
    body: Option<Json<EnsureCollectionBody>>,
) -> Result<Response, GatewayError>
where
    E: Embedder + Clone + Send + Sync + 'static,
    V: VectorStore + Clone + Send + Sync + 'static,
{
    let dimension = body.and_then(|Json(b)| b.dimension);
    let status = state.indexer.ensure_collection(dimension).await?;

    info!(
        collection = %status.name,
        created = status.created,
        "Collection ensured"
    );

    Ok((StatusCode::OK, Json(status)).into_response())
}

#[instrument(skip(state))]
pub async fn delete_collection_handler<E, V>(
    State(state): State<HandlerState<E, V>>,
) -> Result<Response, GatewayError>
where
    E: Embedder + Clone + Send + Sync + 'static,
    V: VectorStore + Clone + Send + Sync + 'static,
{
    state.indexer.delete_collection().await?;

    info!("Collection deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[instrument(skip(state))]
pub async fn collection_info_handler<E, V>(
    State(state): State<HandlerState<E, V>>,
) -> Result<Response, GatewayError>
where
    E: Embedder + Clone + Send + Sync + 'static,
    V: VectorStore + Clone + Send + Sync + 'static,
{
    let info = state.indexer.collection_info().await?;

    Ok((StatusCode::OK, Json(info)).into_response())
}

#[instrument(skip(state, ads), fields(ad_count = ads.len()))]
pub async fn upsert_ads_handler<E, V>(
    State(state): State<HandlerState<E, V>>,
    Json(ads): Json<Vec<Ad>>,
) -> Result<Response, GatewayError>
where
    E: Embedder + Clone + Send + Sync + 'static,
    V: VectorStore + Clone + Send + Sync + 'static,
{
    let upserted = state.indexer.upsert_ads(&ads).await?;

    info!(upserted, "Ads ingested");

    Ok((StatusCode::OK, Json(UpsertAdsResponse { upserted })).into_response())
}

#[instrument(skip(state))]
pub async fn get_ad_handler<E, V>(
    State(state): State<HandlerState<E, V>>,
    Path(ad_id): Path<String>,
) -> Result<Response, GatewayError>
where
    E: Embedder + Clone + Send + Sync + 'static,
    V: VectorStore + Clone + Send + Sync + 'static,
{
    let ad = state
        .indexer
        .get_ad(&ad_id)
        .await?
        .ok_or_else(|| GatewayError::NotFound(format!("ad '{ad_id}' does not exist")))?;

    Ok((StatusCode::OK, Json(ad)).into_response())
}

#[instrument(skip(state))]
pub async fn delete_ad_handler<E, V>(
    State(state): State<HandlerState<E, V>>,
    Path(ad_id): Path<String>,
) -> Result<Response, GatewayError>
where
    E: Embedder + Clone + Send + Sync + 'static,
    V: VectorStore + Clone + Send + Sync + 'static,
{
    state.indexer.delete_ad(&ad_id).await?;

    debug!(ad_id = %ad_id, "Ad deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
