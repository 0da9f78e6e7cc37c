use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DEFAULT_PLACEMENT, DEFAULT_SURFACE, DEFAULT_TOP_K};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A validated request for ad candidates.
pub struct MatchRequest {
    /// Conversation or page text driving semantic retrieval.
    pub context_text: String,
    /// Maximum number of candidates to return.
    pub top_k: u64,
    #[serde(default)]
    pub constraints: MatchConstraints,
    #[serde(default)]
    pub placement: PlacementContext,
}

impl Default for MatchRequest {
    fn default() -> Self {
        Self {
            context_text: String::new(),
            top_k: DEFAULT_TOP_K,
            constraints: MatchConstraints::default(),
            placement: PlacementContext::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Hard constraints narrowing which ads may be considered.
///
/// Empty lists and absent fields mean unconstrained. The opt-in flags
/// default to the safe side: restricted material stays out unless the
/// caller asks for it.
pub struct MatchConstraints {
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub verticals: Vec<String>,
    #[serde(default)]
    pub exclude_advertiser_ids: Vec<String>,
    #[serde(default)]
    pub exclude_ad_ids: Vec<String>,
    #[serde(default)]
    pub age_restricted_ok: bool,
    #[serde(default)]
    pub sensitive_ok: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Where a matched ad will be rendered.
///
/// Metadata only: echoed in the response and logs, never used for
/// filtering or policy.
pub struct PlacementContext {
    #[serde(default = "default_placement")]
    pub placement: String,
    #[serde(default = "default_surface")]
    pub surface: String,
}

fn default_placement() -> String {
    DEFAULT_PLACEMENT.to_string()
}

fn default_surface() -> String {
    DEFAULT_SURFACE.to_string()
}

impl Default for PlacementContext {
    fn default() -> Self {
        Self {
            placement: default_placement(),
            surface: default_surface(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One policy-cleared ad ready for display.
pub struct AdCandidate {
    pub ad_id: String,
    pub advertiser_id: String,
    pub title: String,
    pub body: String,
    pub cta_text: String,
    pub landing_url: String,
    /// Similarity score clamped to [0, 1].
    pub score: f32,
    /// Impression id, stable within the enclosing response and
    /// unlinkable across requests.
    pub match_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Result of one match call.
pub struct MatchResponse {
    /// Fresh v4 id minted for this call.
    pub request_id: Uuid,
    /// Echoed placement label.
    pub placement: String,
    /// Candidates in descending score order.
    pub candidates: Vec<AdCandidate>,
}
