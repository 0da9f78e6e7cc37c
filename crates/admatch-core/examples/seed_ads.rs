//! Seed a mock store with sample ads and run one match against it.

use anyhow::Result;

use admatch::{
    Ad, AdPolicy, AdTargeting, Indexer, MatchConstraints, MatchPipeline, MatchRequest,
    MockVectorStore, StubEmbedder,
};

fn sample_ads() -> Vec<Ad> {
    vec![
        Ad {
            ad_id: "sample-ad-001".to_string(),
            advertiser_id: "sample-advertiser-tech".to_string(),
            title: "Learn Python Today".to_string(),
            body: "Master Python programming with our interactive courses. Build real-world \
                   projects and advance your career."
                .to_string(),
            cta_text: "Start Learning".to_string(),
            landing_url: "https://example.com/python".to_string(),
            targeting: AdTargeting {
                topics: vec![
                    "programming".to_string(),
                    "python".to_string(),
                    "education".to_string(),
                    "technology".to_string(),
                ],
                locale: vec!["en-US".to_string()],
                verticals: vec!["education".to_string(), "technology".to_string()],
            },
            policy: AdPolicy::default(),
        },
        Ad {
            ad_id: "sample-ad-002".to_string(),
            advertiser_id: "sample-advertiser-edu".to_string(),
            title: "Online Courses for Everyone".to_string(),
            body: "Discover thousands of online courses in business, design, technology, and \
                   more. Learn at your own pace."
                .to_string(),
            cta_text: "Browse Courses".to_string(),
            landing_url: "https://example.com/courses".to_string(),
            targeting: AdTargeting {
                topics: vec![
                    "education".to_string(),
                    "online learning".to_string(),
                    "courses".to_string(),
                    "skills".to_string(),
                ],
                locale: vec!["en-US".to_string()],
                verticals: vec!["education".to_string()],
            },
            policy: AdPolicy::default(),
        },
        Ad {
            ad_id: "sample-ad-003".to_string(),
            advertiser_id: "sample-advertiser-shop".to_string(),
            title: "Shop the Latest Trends".to_string(),
            body: "Find amazing deals on fashion, electronics, home goods, and more. Free \
                   shipping on orders over $50."
                .to_string(),
            cta_text: "Shop Now".to_string(),
            landing_url: "https://example.com/shop".to_string(),
            targeting: AdTargeting {
                topics: vec![
                    "shopping".to_string(),
                    "fashion".to_string(),
                    "deals".to_string(),
                    "e-commerce".to_string(),
                ],
                locale: vec!["en-US".to_string()],
                verticals: vec!["retail".to_string(), "e-commerce".to_string()],
            },
            policy: AdPolicy::default(),
        },
        Ad {
            ad_id: "sample-ad-004".to_string(),
            advertiser_id: "sample-advertiser-fitness".to_string(),
            title: "Get Fit This Year".to_string(),
            body: "Join thousands of members achieving their fitness goals. Personalized \
                   workout plans and nutrition guidance."
                .to_string(),
            cta_text: "Start Free Trial".to_string(),
            landing_url: "https://example.com/fitness".to_string(),
            targeting: AdTargeting {
                topics: vec![
                    "fitness".to_string(),
                    "health".to_string(),
                    "workout".to_string(),
                    "wellness".to_string(),
                ],
                locale: vec!["en-US".to_string()],
                verticals: vec!["health".to_string(), "fitness".to_string()],
            },
            policy: AdPolicy::default(),
        },
        Ad {
            ad_id: "sample-ad-005".to_string(),
            advertiser_id: "sample-advertiser-finance".to_string(),
            title: "Invest in Your Future".to_string(),
            body: "Start investing with as little as $1. Build wealth with low-cost index \
                   funds and expert guidance."
                .to_string(),
            cta_text: "Get Started".to_string(),
            landing_url: "https://example.com/invest".to_string(),
            targeting: AdTargeting {
                topics: vec![
                    "investing".to_string(),
                    "finance".to_string(),
                    "wealth".to_string(),
                    "savings".to_string(),
                ],
                locale: vec!["en-US".to_string()],
                verticals: vec!["finance".to_string()],
            },
            policy: AdPolicy::default(),
        },
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    let embedder = StubEmbedder::new(384);
    let store = MockVectorStore::new();

    let indexer = Indexer::new(embedder.clone(), store.clone(), 100, 384);
    indexer.ensure_collection(None).await?;
    let seeded = indexer.upsert_ads(&sample_ads()).await?;
    println!("seeded {seeded} ads");

    let pipeline = MatchPipeline::new(embedder, store);
    let response = pipeline
        .match_ads(&MatchRequest {
            context_text: "I want to learn programming and build a career in tech".to_string(),
            constraints: MatchConstraints {
                locale: Some("en-US".to_string()),
                ..Default::default()
            },
            ..Default::default()
        })
        .await?;

    for candidate in &response.candidates {
        println!(
            "{} score={:.3} \"{}\"",
            candidate.ad_id, candidate.score, candidate.title
        );
    }
    Ok(())
}
