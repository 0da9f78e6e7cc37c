//! Deterministic identifier derivation.
//!
//! Point ids and match ids are name-based UUIDs (v5), so they are
//! reproducible across processes and languages given the same inputs.

use uuid::Uuid;

/// Default namespace for deriving point ids from ad ids.
///
/// Override per deployment with `ADMATCH_AD_ID_NAMESPACE`.
pub const DEFAULT_AD_ID_NAMESPACE: Uuid =
    match Uuid::try_parse("a1b2c3d4-e5f6-7890-abcd-ef1234567890") {
        Ok(ns) => ns,
        Err(_) => panic!("default ad id namespace literal is malformed"),
    };

/// Derives the vector store point id for an ad.
///
/// The same `(namespace, ad_id)` pair always maps to the same point id,
/// so re-upserting an ad overwrites its existing point instead of
/// creating a duplicate.
#[inline]
pub fn ad_point_id(namespace: &Uuid, ad_id: &str) -> Uuid {
    Uuid::new_v5(namespace, ad_id.as_bytes())
}

/// Derives the match id for an ad within one response.
///
/// The request id is the namespace: the same `(request_id, ad_id)` pair
/// always yields the same match id (audit replay), while different
/// requests yield unrelated ids for the same ad.
#[inline]
pub fn match_id(request_id: &Uuid, ad_id: &str) -> Uuid {
    Uuid::new_v5(request_id, ad_id.as_bytes())
}
