//! Post-query policy enforcement.
//!
//! Every candidate returned by the vector store passes through
//! [`PolicyEngine::apply`] before it can reach a response. Filtering is
//! local, order-preserving, and only ever removes candidates.

use tracing::debug;

use crate::ads::AdPayload;
use crate::matching::{MatchConstraints, PlacementContext};
use crate::vectordb::VectorHit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Policy rule that can deny a candidate, in evaluation order.
pub enum PolicyRule {
    /// Ad is age-restricted and the request did not opt in.
    AgeRestricted,
    /// Ad covers a sensitive category and the request did not opt in.
    Sensitive,
    /// An advertiser-blocked keyword overlaps the requested topics.
    BlockedKeywords,
}

impl PolicyRule {
    /// Reason label reported for a denial under this rule.
    pub fn reason(self) -> &'static str {
        match self {
            PolicyRule::AgeRestricted => "denied: age_restricted",
            PolicyRule::Sensitive => "denied: sensitive",
            PolicyRule::BlockedKeywords => "denied: blocked_keywords",
        }
    }
}

/// Policy decisions over retrieved candidates.
pub struct PolicyEngine;

impl PolicyEngine {
    /// Returns the first rule a candidate violates, if any.
    ///
    /// Flags missing from a stored payload read as `false`, so partial
    /// payloads are treated permissively rather than rejected.
    pub fn first_violation(
        payload: &AdPayload,
        constraints: &MatchConstraints,
    ) -> Option<PolicyRule> {
        if payload.age_restricted && !constraints.age_restricted_ok {
            return Some(PolicyRule::AgeRestricted);
        }

        if payload.sensitive && !constraints.sensitive_ok {
            return Some(PolicyRule::Sensitive);
        }

        if payload
            .blocked_keywords
            .iter()
            .any(|keyword| constraints.topics.contains(keyword))
        {
            return Some(PolicyRule::BlockedKeywords);
        }

        None
    }

    /// Removes candidates that violate policy, preserving order.
    pub fn apply(
        hits: Vec<VectorHit>,
        constraints: &MatchConstraints,
        _placement: &PlacementContext,
    ) -> Vec<VectorHit> {
        hits.into_iter()
            .filter(|hit| {
                match Self::first_violation(&hit.payload, constraints) {
                    Some(rule) => {
                        debug!(
                            ad_id = hit.payload.ad_id.as_deref().unwrap_or(""),
                            rule = rule.reason(),
                            "Candidate removed by policy"
                        );
                        false
                    }
                    None => true,
                }
            })
            .collect()
    }

    /// Explains the decision for one candidate.
    pub fn reason(
        hit: &VectorHit,
        constraints: &MatchConstraints,
        _placement: &PlacementContext,
    ) -> &'static str {
        match Self::first_violation(&hit.payload, constraints) {
            Some(rule) => rule.reason(),
            None => "allowed",
        }
    }
}
