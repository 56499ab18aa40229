//! Query expansion.
//!
//! Turns the user's topic list into a bounded set of search queries. The
//! "semantic" part is a static lookup: a synonym table and a related-topics
//! table, both keyed by exact lowercase topic, plus a handful of fixed
//! phrase templates. No ranking or scoring happens here.

use std::collections::HashMap;
use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::topic::Topic;

/// How many synonym-table entries a single topic may contribute.
const SYNONYMS_PER_TOPIC: usize = 3;

/// How many related-topics entries a single topic may contribute.
const RELATED_PER_TOPIC: usize = 2;

/// Fixed phrase templates appended for every topic.
const TEMPLATES: &[&str] = &["{} tutorial", "{} explained", "best {}", "{} 2024", "{} guide"];

static SYNONYMS: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        (
            "ai",
            vec![
                "artificial intelligence",
                "machine learning",
                "deep learning",
                "neural networks",
                "computer vision",
                "natural language processing",
                "tensorflow",
                "pytorch",
                "AI news",
                "AI tutorials",
            ],
        ),
        (
            "programming",
            vec![
                "coding",
                "software development",
                "web development",
                "javascript",
                "python",
                "react",
                "nodejs",
                "algorithms",
                "coding tutorial",
                "programming tips",
            ],
        ),
        (
            "cooking",
            vec![
                "recipes",
                "baking",
                "chef techniques",
                "kitchen tips",
                "food preparation",
                "meal prep",
                "cuisine",
                "cooking show",
                "food network",
                "cooking tutorial",
            ],
        ),
        (
            "music",
            vec![
                "songs",
                "albums",
                "artists",
                "bands",
                "music theory",
                "instruments",
                "concerts",
                "music production",
                "new music",
                "music videos",
            ],
        ),
        (
            "fitness",
            vec![
                "workout",
                "exercise",
                "gym",
                "bodybuilding",
                "yoga",
                "cardio",
                "strength training",
                "nutrition",
                "fitness tips",
                "home workout",
            ],
        ),
        (
            "travel",
            vec![
                "destinations",
                "adventure",
                "culture",
                "tourism",
                "backpacking",
                "city guides",
                "travel tips",
                "wanderlust",
                "travel vlog",
                "places to visit",
            ],
        ),
        (
            "science",
            vec![
                "physics",
                "chemistry",
                "biology",
                "space",
                "astronomy",
                "research",
                "discoveries",
                "experiments",
                "science news",
                "educational",
            ],
        ),
        (
            "business",
            vec![
                "entrepreneurship",
                "startups",
                "marketing",
                "finance",
                "leadership",
                "productivity",
                "investing",
                "economics",
                "business tips",
                "success",
            ],
        ),
        (
            "technology",
            vec![
                "tech news",
                "gadgets",
                "smartphones",
                "computers",
                "software",
                "hardware",
                "tech reviews",
                "innovation",
                "future tech",
                "tech tutorials",
            ],
        ),
        (
            "education",
            vec![
                "learning",
                "study tips",
                "tutorials",
                "online courses",
                "skills",
                "knowledge",
                "academic",
                "educational content",
                "how to learn",
                "study methods",
            ],
        ),
    ])
});

static RELATED: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        ("ai", vec!["data science", "robotics", "automation"]),
        ("programming", vec!["web design", "database", "cybersecurity"]),
        ("cooking", vec!["nutrition", "food science", "restaurant"]),
        ("music", vec!["audio engineering", "performance", "composition"]),
        ("fitness", vec!["health", "sports", "wellness"]),
        ("travel", vec!["photography", "culture", "languages"]),
        ("science", vec!["technology", "research", "innovation"]),
        ("business", vec!["management", "sales", "strategy"]),
    ])
});

/// Limits applied to the expanded query set.
///
/// The floor and per-topic multiplier are heuristic constants carried over
/// from the original feed behavior, kept configurable rather than derived.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionLimits {
    /// Minimum size of the query cap regardless of topic count.
    pub min_fanout: usize,
    /// Cap contribution per topic.
    pub per_topic: usize,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            min_fanout: crate::constants::DEFAULT_MIN_QUERY_FANOUT,
            per_topic: crate::constants::DEFAULT_QUERIES_PER_TOPIC,
        }
    }
}

impl ExpansionLimits {
    /// The query cap for a run over `topic_count` topics.
    #[must_use]
    pub fn cap(&self, topic_count: usize) -> usize {
        self.min_fanout.max(topic_count * self.per_topic)
    }
}

/// Expand topics into search queries.
///
/// For each topic, in list order: the topic itself, up to three synonym-table
/// entries, the five fixed templates, and up to two related-topics entries.
/// Duplicates are dropped case-sensitively, first insertion wins, and the
/// result is truncated to `limits.cap(topics.len())`.
#[must_use]
pub fn expand(topics: &[Topic], limits: ExpansionLimits) -> Vec<String> {
    let mut queries: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let mut push = |queries: &mut Vec<String>, candidate: String| {
        if seen.insert(candidate.clone()) {
            queries.push(candidate);
        }
    };

    for topic in topics {
        let base = topic.as_str();

        push(&mut queries, base.to_string());

        if let Some(synonyms) = SYNONYMS.get(base) {
            for synonym in synonyms.iter().take(SYNONYMS_PER_TOPIC) {
                push(&mut queries, (*synonym).to_string());
            }
        }

        for template in TEMPLATES {
            push(&mut queries, template.replacen("{}", base, 1));
        }

        if let Some(related) = RELATED.get(base) {
            for rel in related.iter().take(RELATED_PER_TOPIC) {
                push(&mut queries, (*rel).to_string());
            }
        }
    }

    queries.truncate(limits.cap(topics.len()));
    queries
}
