use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::ads::Ad;
use crate::embedding::Embedder;
use crate::ident;
use crate::policy::PolicyEngine;
use crate::targeting::TargetingEngine;
use crate::vectordb::{VectorHit, VectorStore};

use super::error::MatchResult;
use super::types::{AdCandidate, MatchRequest, MatchResponse};

/// Orchestrates one match call end to end.
///
/// The stages run in a fixed order: mint a request id, normalize the
/// context text, embed, build the targeting filter, query the store,
/// enforce policy, shape candidates. Policy enforcement sits between the
/// query and the response on every call.
pub struct MatchPipeline<E: Embedder, V: VectorStore> {
    embedder: E,
    store: V,
}

impl<E: Embedder, V: VectorStore> std::fmt::Debug for MatchPipeline<E, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchPipeline")
            .field("embedder_stub", &self.embedder.is_stub())
            .finish_non_exhaustive()
    }
}

impl<E: Embedder, V: VectorStore> MatchPipeline<E, V> {
    pub fn new(embedder: E, store: V) -> Self {
        Self { embedder, store }
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn store(&self) -> &V {
        &self.store
    }

    pub fn is_embedder_stub(&self) -> bool {
        self.embedder.is_stub()
    }

    #[instrument(skip(self, request), fields(top_k = request.top_k, context_len = request.context_text.len()))]
    pub async fn match_ads(&self, request: &MatchRequest) -> MatchResult<MatchResponse> {
        let request_id = Uuid::new_v4();
        let context_text = normalize_whitespace(&request.context_text);

        debug!(%request_id, "Generating embedding for context text");
        let vector = self.embedder.embed(&context_text).await?;

        let filter = TargetingEngine::build_filter(&request.constraints, &request.placement);
        debug!(
            embedding_dim = vector.len(),
            must = filter.must.len(),
            must_not = filter.must_not.len(),
            "Embedding generated, querying store"
        );

        let hits = self.store.query(vector, &filter, request.top_k).await?;

        let retrieved = hits.len();
        debug!(candidates = retrieved, "Search complete, applying policy");

        let cleared = PolicyEngine::apply(hits, &request.constraints, &request.placement);
        let removed = retrieved - cleared.len();

        let mut candidates = Vec::with_capacity(cleared.len());
        for hit in cleared {
            candidates.push(to_candidate(&request_id, hit)?);
        }

        info!(
            %request_id,
            retrieved,
            removed_by_policy = removed,
            returned = candidates.len(),
            best_score = candidates.first().map(|c| c.score),
            "Match complete"
        );

        Ok(MatchResponse {
            request_id,
            placement: request.placement.placement.clone(),
            candidates,
        })
    }
}

fn to_candidate(request_id: &Uuid, hit: VectorHit) -> MatchResult<AdCandidate> {
    let ad = Ad::try_from(hit.payload)?;
    let match_id = ident::match_id(request_id, &ad.ad_id);

    Ok(AdCandidate {
        ad_id: ad.ad_id,
        advertiser_id: ad.advertiser_id,
        title: ad.title,
        body: ad.body,
        cta_text: ad.cta_text,
        landing_url: ad.landing_url,
        score: hit.score.clamp(0.0, 1.0),
        match_id,
    })
}

/// Collapses runs of whitespace to single spaces and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
