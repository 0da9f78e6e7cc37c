//! Ad domain model and its persisted payload form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An advertiser's content unit eligible for matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    /// Caller-assigned, globally unique, immutable.
    pub ad_id: String,
    pub advertiser_id: String,
    pub title: String,
    pub body: String,
    pub cta_text: String,
    pub landing_url: String,
    #[serde(default)]
    pub targeting: AdTargeting,
    #[serde(default)]
    pub policy: AdPolicy,
}

/// Targeting attributes evaluated store-side as filter conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdTargeting {
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub locale: Vec<String>,
    #[serde(default)]
    pub verticals: Vec<String>,
}

/// Policy attributes evaluated locally after the vector query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdPolicy {
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub age_restricted: bool,
    #[serde(default)]
    pub blocked_keywords: Vec<String>,
}

impl Ad {
    /// Text fed to the embedding port when indexing this ad.
    ///
    /// Deterministic concatenation of the display copy plus targeting
    /// topics. Derived on demand, never persisted.
    pub fn embedding_text(&self) -> String {
        let mut text = format!("{}. {}. {}", self.title, self.body, self.cta_text);
        if !self.targeting.topics.is_empty() {
            text.push(' ');
            text.push_str(&self.targeting.topics.join(" "));
        }
        text
    }

    /// Denormalizes this ad into the flat form written to the vector store.
    pub fn to_payload(&self) -> AdPayload {
        AdPayload {
            ad_id: Some(self.ad_id.clone()),
            advertiser_id: Some(self.advertiser_id.clone()),
            title: Some(self.title.clone()),
            body: Some(self.body.clone()),
            cta_text: Some(self.cta_text.clone()),
            landing_url: Some(self.landing_url.clone()),
            topics: self.targeting.topics.clone(),
            locale: self.targeting.locale.clone(),
            verticals: self.targeting.verticals.clone(),
            sensitive: self.policy.sensitive,
            age_restricted: self.policy.age_restricted,
            blocked_keywords: self.policy.blocked_keywords.clone(),
        }
    }
}

/// Flat denormalized ad as stored in (and read back from) the vector store.
///
/// Every field is optional or defaulted: a point written by an older
/// producer may lack fields. Missing policy flags read as permissive
/// `false`; missing display fields surface as [`MissingPayloadField`]
/// when the payload is converted back into an [`Ad`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdPayload {
    #[serde(default)]
    pub ad_id: Option<String>,
    #[serde(default)]
    pub advertiser_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub cta_text: Option<String>,
    #[serde(default)]
    pub landing_url: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub locale: Vec<String>,
    #[serde(default)]
    pub verticals: Vec<String>,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub age_restricted: bool,
    #[serde(default)]
    pub blocked_keywords: Vec<String>,
}

/// A stored payload lacked a field the domain requires.
///
/// This is a data-integrity failure, distinct from a policy denial.
#[derive(Debug, Error)]
#[error("ad payload missing required field '{field}'")]
pub struct MissingPayloadField {
    pub field: &'static str,
}

fn require(
    value: Option<String>,
    field: &'static str,
) -> Result<String, MissingPayloadField> {
    value.ok_or(MissingPayloadField { field })
}

impl TryFrom<AdPayload> for Ad {
    type Error = MissingPayloadField;

    fn try_from(payload: AdPayload) -> Result<Self, Self::Error> {
        Ok(Ad {
            ad_id: require(payload.ad_id, "ad_id")?,
            advertiser_id: require(payload.advertiser_id, "advertiser_id")?,
            title: require(payload.title, "title")?,
            body: require(payload.body, "body")?,
            cta_text: require(payload.cta_text, "cta_text")?,
            landing_url: require(payload.landing_url, "landing_url")?,
            targeting: AdTargeting {
                topics: payload.topics,
                locale: payload.locale,
                verticals: payload.verticals,
            },
            policy: AdPolicy {
                sensitive: payload.sensitive,
                age_restricted: payload.age_restricted,
                blocked_keywords: payload.blocked_keywords,
            },
        })
    }
}
