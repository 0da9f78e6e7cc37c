use serde::{Deserialize, Serialize};

use admatch::matching::{DEFAULT_TOP_K, MatchConstraints, PlacementContext};

/// Wire form of a match request. Everything except `context_text` is
/// optional on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchParams {
    pub context_text: String,
    #[serde(default = "default_top_k")]
    pub top_k: u64,
    #[serde(default)]
    pub constraints: MatchConstraints,
    #[serde(default)]
    pub placement: PlacementContext,
}

fn default_top_k() -> u64 {
    DEFAULT_TOP_K
}

/// Optional body for collection creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnsureCollectionBody {
    #[serde(default)]
    pub dimension: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct UpsertAdsResponse {
    pub upserted: usize,
}
