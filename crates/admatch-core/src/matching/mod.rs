//! Context-to-ads match orchestration.
//!
//! [`MatchPipeline`] runs the fixed request flow: normalize, embed, build
//! the targeting filter, query the store, enforce policy, shape
//! candidates. Policy always runs between the query and the response.

/// Match error types.
pub mod error;
/// The match pipeline itself.
pub mod pipeline;
/// Request and response types.
pub mod types;

pub use error::{MatchError, MatchResult};
pub use pipeline::{MatchPipeline, normalize_whitespace};
pub use types::{AdCandidate, MatchConstraints, MatchRequest, MatchResponse, PlacementContext};

/// Default number of candidates returned.
pub const DEFAULT_TOP_K: u64 = 5;

/// Default placement label.
pub const DEFAULT_PLACEMENT: &str = "inline";

/// Default surface label.
pub const DEFAULT_SURFACE: &str = "chat";
