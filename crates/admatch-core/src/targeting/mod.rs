//! Translation of request constraints into store-side search filters.

use crate::matching::{MatchConstraints, PlacementContext};
use crate::vectordb::VectorFilter;

/// Builds the pre-query search filter for a match request.
///
/// Targeting narrows retrieval only. Policy enforcement happens after the
/// query and never relies on this filter.
pub struct TargetingEngine;

impl TargetingEngine {
    /// Translates constraints into a store filter.
    ///
    /// Rules apply in a fixed order: topics, locale, verticals, excluded
    /// advertisers, excluded ads. Empty or absent fields contribute no
    /// conditions; placement is carried for reporting only.
    pub fn build_filter(
        constraints: &MatchConstraints,
        _placement: &PlacementContext,
    ) -> VectorFilter {
        let mut filter = VectorFilter::new();

        filter.must_match("topics", constraints.topics.clone());
        if let Some(locale) = &constraints.locale {
            filter.must_match("locale", vec![locale.clone()]);
        }
        filter.must_match("verticals", constraints.verticals.clone());
        filter.must_not_match("advertiser_id", constraints.exclude_advertiser_ids.clone());
        filter.must_not_match("ad_id", constraints.exclude_ad_ids.clone());

        filter
    }
}
