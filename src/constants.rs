//! Shared constants used across the application.

/// User agent string sent with search-page requests.
///
/// A realistic browser user agent; the search endpoint serves the embedded
/// result data only to clients that look like a normal browser.
pub const SEARCH_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default floor for the number of expanded queries per run.
pub const DEFAULT_MIN_QUERY_FANOUT: usize = 6;

/// Default multiplier applied to the topic count when capping expanded queries.
pub const DEFAULT_QUERIES_PER_TOPIC: usize = 2;

/// Default floor for the number of videos kept in the aggregated feed.
pub const DEFAULT_MIN_FEED_SIZE: usize = 20;

/// Default number of search fetches issued concurrently per batch.
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Default delay between fetch batches, in milliseconds.
pub const DEFAULT_BATCH_DELAY_MS: u64 = 500;

/// Allowed values for the results-per-topic setting.
pub const RESULTS_PER_TOPIC_CHOICES: &[u32] = &[5, 10, 15, 20];

/// Default results-per-topic setting.
pub const DEFAULT_RESULTS_PER_TOPIC: u32 = 10;

/// Maximum number of characters of a video title shown on a card.
pub const CARD_TITLE_MAX_CHARS: usize = 60;
