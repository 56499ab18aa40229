//! Result aggregation.
//!
//! Issues one search fetch per expanded query in fixed-size batches with a
//! fixed delay between batches (a crude rate limit, not backpressure),
//! collects the extracted records, deduplicates by video id, and caps the
//! combined list.

use std::collections::HashSet;
use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures_util::future::join_all;
use tracing::{debug, warn};

use super::RunContext;
use crate::search::Extraction;
use crate::search::VideoRecord;

/// Outcome of one aggregation pass.
#[derive(Debug)]
pub struct Aggregation {
    pub videos: Vec<VideoRecord>,
    pub elapsed: Duration,
}

/// Run `task` over `items` in fixed-size batches.
///
/// Tasks within a batch run concurrently; batches run strictly in sequence
/// with `delay` between them. Each task's failure is captured in its own
/// slot and never affects siblings or later batches.
pub async fn run_batched<T, R, F, Fut>(
    items: Vec<T>,
    batch_size: usize,
    delay: Duration,
    task: F,
) -> Vec<Result<R>>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R>>,
{
    let mut outcomes = Vec::with_capacity(items.len());
    let mut iter = items.into_iter().peekable();
    let mut first = true;

    while iter.peek().is_some() {
        if !first {
            tokio::time::sleep(delay).await;
        }
        first = false;

        let batch: Vec<T> = iter.by_ref().take(batch_size.max(1)).collect();
        outcomes.extend(join_all(batch.into_iter().map(&task)).await);
    }

    outcomes
}

/// Deduplicate records by video id, first occurrence wins, order preserved.
#[must_use]
pub fn dedupe_by_id(videos: Vec<VideoRecord>) -> Vec<VideoRecord> {
    let mut seen = HashSet::new();
    videos
        .into_iter()
        .filter(|video| seen.insert(video.id.clone()))
        .collect()
}

/// Fetch and extract every query, then dedupe and cap the combined list.
///
/// Individual query failures contribute zero records; there is no retry.
pub async fn aggregate(
    ctx: &RunContext,
    queries: Vec<String>,
    per_query_limit: usize,
    topic_count: usize,
) -> Aggregation {
    let started = Instant::now();

    let outcomes = run_batched(queries, ctx.batch_size, ctx.batch_delay, |query| async move {
        fetch_one(ctx, &query, per_query_limit).await
    })
    .await;

    let mut combined = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(videos) => combined.extend(videos),
            Err(e) => warn!("Search fetch failed: {e:#}"),
        }
    }

    let mut videos = dedupe_by_id(combined);
    videos.truncate(ctx.min_feed_size.max(per_query_limit * topic_count));

    Aggregation {
        videos,
        elapsed: started.elapsed(),
    }
}

/// Fetch one query's search page and extract its records.
///
/// A page without usable embedded data is zero records, not an error.
async fn fetch_one(ctx: &RunContext, query: &str, limit: usize) -> Result<Vec<VideoRecord>> {
    let page = ctx.client.fetch_search_page(query).await?;

    match ctx.extractor.extract(&page, limit) {
        Extraction::Videos(videos) => {
            debug!(query, count = videos.len(), "Extracted videos");
            Ok(videos)
        }
        Extraction::NotFound => {
            warn!(query, "No embedded result data in search page");
            Ok(Vec::new())
        }
        Extraction::ParseError => {
            warn!(query, "Embedded result data did not parse");
            Ok(Vec::new())
        }
    }
}
