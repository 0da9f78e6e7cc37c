use std::collections::HashMap;

use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{ScoredPoint, Value};
use serde::{Deserialize, Serialize};

use crate::ads::AdPayload;

#[derive(Debug, Clone)]
/// A single hit returned from a vector search.
pub struct VectorHit {
    pub point_id: String,
    pub score: f32,
    pub payload: AdPayload,
}

impl VectorHit {
    pub fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        let point_id = match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Uuid(uuid)) => uuid,
            Some(PointIdOptions::Num(num)) => num.to_string(),
            None => return None,
        };

        Some(VectorHit {
            point_id,
            score: point.score,
            payload: payload_from_qdrant(&point.payload),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Outcome of an `ensure_collection` call.
pub struct CollectionStatus {
    /// Collection name.
    pub name: String,
    /// `true` when this call created the collection, `false` when it
    /// already existed.
    pub created: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Counters and health reported for a collection.
pub struct CollectionInfo {
    /// Collection name.
    pub name: String,
    /// Number of vectors the index has finished indexing.
    pub indexed_count: u64,
    /// Total number of points stored.
    pub total_count: u64,
    /// Store-reported status label, e.g. "green".
    pub status: String,
}

/// Flatten an ad payload into Qdrant payload values.
pub fn payload_to_qdrant(payload: &AdPayload) -> HashMap<String, Value> {
    let mut map: HashMap<String, Value> = HashMap::new();

    for (field, value) in [
        ("ad_id", &payload.ad_id),
        ("advertiser_id", &payload.advertiser_id),
        ("title", &payload.title),
        ("body", &payload.body),
        ("cta_text", &payload.cta_text),
        ("landing_url", &payload.landing_url),
    ] {
        if let Some(value) = value {
            map.insert(field.to_string(), value.clone().into());
        }
    }

    for (field, values) in [
        ("topics", &payload.topics),
        ("locale", &payload.locale),
        ("verticals", &payload.verticals),
        ("blocked_keywords", &payload.blocked_keywords),
    ] {
        map.insert(field.to_string(), string_list_value(values));
    }

    map.insert("sensitive".to_string(), payload.sensitive.into());
    map.insert("age_restricted".to_string(), payload.age_restricted.into());

    map
}

/// Read an ad payload back out of Qdrant payload values. Missing or
/// mistyped fields fall back to their permissive defaults.
pub fn payload_from_qdrant(payload: &HashMap<String, Value>) -> AdPayload {
    AdPayload {
        ad_id: string_field(payload, "ad_id"),
        advertiser_id: string_field(payload, "advertiser_id"),
        title: string_field(payload, "title"),
        body: string_field(payload, "body"),
        cta_text: string_field(payload, "cta_text"),
        landing_url: string_field(payload, "landing_url"),
        topics: string_list_field(payload, "topics"),
        locale: string_list_field(payload, "locale"),
        verticals: string_list_field(payload, "verticals"),
        sensitive: bool_field(payload, "sensitive"),
        age_restricted: bool_field(payload, "age_restricted"),
        blocked_keywords: string_list_field(payload, "blocked_keywords"),
    }
}

fn string_list_value(values: &[String]) -> Value {
    values
        .iter()
        .map(|value| Value::from(value.clone()))
        .collect::<Vec<Value>>()
        .into()
}

fn string_field(payload: &HashMap<String, Value>, field: &str) -> Option<String> {
    payload
        .get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn string_list_field(payload: &HashMap<String, Value>, field: &str) -> Vec<String> {
    payload
        .get(field)
        .and_then(|v| v.as_list())
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

fn bool_field(payload: &HashMap<String, Value>, field: &str) -> bool {
    payload
        .get(field)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}
