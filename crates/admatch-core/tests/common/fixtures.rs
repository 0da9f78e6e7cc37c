//! Test fixtures for integration tests.

use admatch::{
    Ad, AdPolicy, AdTargeting, Indexer, MatchPipeline, MockVectorStore, StubEmbedder,
};

pub const EMBEDDING_DIM: u64 = 64;

pub const DEFAULT_AD_ID: &str = "ad-test-001";

pub const DEFAULT_ADVERTISER_ID: &str = "adv-test";

#[derive(Default)]
pub struct AdBuilder {
    ad_id: Option<String>,
    advertiser_id: Option<String>,
    title: Option<String>,
    body: Option<String>,
    cta_text: Option<String>,
    landing_url: Option<String>,
    topics: Vec<String>,
    locale: Vec<String>,
    verticals: Vec<String>,
    sensitive: bool,
    age_restricted: bool,
    blocked_keywords: Vec<String>,
}

impl AdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ad_id(mut self, id: &str) -> Self {
        self.ad_id = Some(id.to_string());
        self
    }

    pub fn advertiser_id(mut self, id: &str) -> Self {
        self.advertiser_id = Some(id.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn cta_text(mut self, cta: &str) -> Self {
        self.cta_text = Some(cta.to_string());
        self
    }

    pub fn landing_url(mut self, url: &str) -> Self {
        self.landing_url = Some(url.to_string());
        self
    }

    pub fn topics(mut self, topics: &[&str]) -> Self {
        self.topics = topics.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn locale(mut self, locale: &[&str]) -> Self {
        self.locale = locale.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn verticals(mut self, verticals: &[&str]) -> Self {
        self.verticals = verticals.iter().map(|v| v.to_string()).collect();
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn age_restricted(mut self) -> Self {
        self.age_restricted = true;
        self
    }

    pub fn blocked_keywords(mut self, keywords: &[&str]) -> Self {
        self.blocked_keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn build(self) -> Ad {
        Ad {
            ad_id: self.ad_id.unwrap_or_else(|| DEFAULT_AD_ID.to_string()),
            advertiser_id: self
                .advertiser_id
                .unwrap_or_else(|| DEFAULT_ADVERTISER_ID.to_string()),
            title: self.title.unwrap_or_else(|| "Test Ad".to_string()),
            body: self
                .body
                .unwrap_or_else(|| "Copy that sells something.".to_string()),
            cta_text: self.cta_text.unwrap_or_else(|| "Learn More".to_string()),
            landing_url: self
                .landing_url
                .unwrap_or_else(|| "https://example.com/test".to_string()),
            targeting: AdTargeting {
                topics: self.topics,
                locale: self.locale,
                verticals: self.verticals,
            },
            policy: AdPolicy {
                sensitive: self.sensitive,
                age_restricted: self.age_restricted,
                blocked_keywords: self.blocked_keywords,
            },
        }
    }
}

/// The sample inventory shipped with the ingestion tooling.
pub fn sample_ads() -> Vec<Ad> {
    vec![
        AdBuilder::new()
            .ad_id("sample-ad-001")
            .advertiser_id("sample-advertiser-tech")
            .title("Learn Python Today")
            .body(
                "Master Python programming with our interactive courses. Build real-world \
                 projects and advance your career.",
            )
            .cta_text("Start Learning")
            .landing_url("https://example.com/python")
            .topics(&["programming", "python", "education", "technology"])
            .locale(&["en-US"])
            .verticals(&["education", "technology"])
            .build(),
        AdBuilder::new()
            .ad_id("sample-ad-002")
            .advertiser_id("sample-advertiser-edu")
            .title("Online Courses for Everyone")
            .body(
                "Discover thousands of online courses in business, design, technology, and \
                 more. Learn at your own pace.",
            )
            .cta_text("Browse Courses")
            .landing_url("https://example.com/courses")
            .topics(&["education", "online learning", "courses", "skills"])
            .locale(&["en-US"])
            .verticals(&["education"])
            .build(),
        AdBuilder::new()
            .ad_id("sample-ad-003")
            .advertiser_id("sample-advertiser-shop")
            .title("Shop the Latest Trends")
            .body(
                "Find amazing deals on fashion, electronics, home goods, and more. Free \
                 shipping on orders over $50.",
            )
            .cta_text("Shop Now")
            .landing_url("https://example.com/shop")
            .topics(&["shopping", "fashion", "deals", "e-commerce"])
            .locale(&["en-US"])
            .verticals(&["retail", "e-commerce"])
            .build(),
        AdBuilder::new()
            .ad_id("sample-ad-004")
            .advertiser_id("sample-advertiser-fitness")
            .title("Get Fit This Year")
            .body(
                "Join thousands of members achieving their fitness goals. Personalized \
                 workout plans and nutrition guidance.",
            )
            .cta_text("Start Free Trial")
            .landing_url("https://example.com/fitness")
            .topics(&["fitness", "health", "workout", "wellness"])
            .locale(&["en-US"])
            .verticals(&["health", "fitness"])
            .build(),
        AdBuilder::new()
            .ad_id("sample-ad-005")
            .advertiser_id("sample-advertiser-finance")
            .title("Invest in Your Future")
            .body(
                "Start investing with as little as $1. Build wealth with low-cost index \
                 funds and expert guidance.",
            )
            .cta_text("Get Started")
            .landing_url("https://example.com/invest")
            .topics(&["investing", "finance", "wealth", "savings"])
            .locale(&["en-US"])
            .verticals(&["finance"])
            .build(),
    ]
}

/// Builds a pipeline and indexer over one shared mock store, with the
/// collection created and `ads` ingested.
pub async fn seeded_world(
    ads: &[Ad],
) -> (
    MatchPipeline<StubEmbedder, MockVectorStore>,
    Indexer<StubEmbedder, MockVectorStore>,
) {
    let embedder = StubEmbedder::new(EMBEDDING_DIM as usize);
    let store = MockVectorStore::new();

    let indexer = Indexer::new(embedder.clone(), store.clone(), 100, EMBEDDING_DIM);
    indexer
        .ensure_collection(None)
        .await
        .expect("collection should be created");
    indexer.upsert_ads(ads).await.expect("ads should ingest");

    (MatchPipeline::new(embedder, store), indexer)
}
