//! Feed generation.
//!
//! One generation run: load persisted topics and settings, expand queries,
//! aggregate search results, replace the stored feed, record analytics.
//! A single run executes at a time; triggers while a run is active are
//! dropped rather than queued.

pub mod aggregate;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::db::{self, AnalyticsSnapshot, Database};
use crate::expansion::{self, ExpansionLimits};
use crate::search::{InitialDataExtractor, SearchClient, VideoExtractor};

/// Everything one generation run needs, bundled explicitly so a run can be
/// driven in isolation without ambient state.
pub struct RunContext {
    pub client: SearchClient,
    pub extractor: Arc<dyn VideoExtractor>,
    pub expansion: ExpansionLimits,
    pub min_feed_size: usize,
    pub batch_size: usize,
    pub batch_delay: Duration,
}

impl RunContext {
    /// Build a run context from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            client: SearchClient::new(&config.search_base_url)?,
            extractor: Arc::new(InitialDataExtractor::new()),
            expansion: ExpansionLimits {
                min_fanout: config.min_query_fanout,
                per_topic: config.queries_per_topic,
            },
            min_feed_size: config.min_feed_size,
            batch_size: config.batch_size,
            batch_delay: config.batch_delay,
        })
    }
}

/// Handle for requesting generation runs. Cheap to clone.
#[derive(Clone)]
pub struct FeedService {
    trigger_tx: mpsc::Sender<()>,
    in_progress: Arc<AtomicBool>,
}

impl FeedService {
    /// Request a generation run.
    ///
    /// Returns false (and does nothing) while a run is already active.
    pub fn request_generation(&self) -> bool {
        if self.in_progress.load(Ordering::SeqCst) {
            debug!("Generation already in progress, ignoring trigger");
            return false;
        }
        match self.trigger_tx.try_send(()) {
            Ok(()) => true,
            Err(_) => {
                debug!("Generation trigger already pending, ignoring");
                false
            }
        }
    }

    /// Whether a run is currently active.
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }
}

/// Background worker that consumes triggers and executes runs.
pub struct FeedGenerator {
    ctx: RunContext,
    db: Database,
    in_progress: Arc<AtomicBool>,
    trigger_rx: mpsc::Receiver<()>,
}

/// Create a connected service/generator pair.
#[must_use]
pub fn service(ctx: RunContext, db: Database) -> (FeedService, FeedGenerator) {
    let (trigger_tx, trigger_rx) = mpsc::channel(1);
    let in_progress = Arc::new(AtomicBool::new(false));

    let handle = FeedService {
        trigger_tx,
        in_progress: Arc::clone(&in_progress),
    };
    let generator = FeedGenerator {
        ctx,
        db,
        in_progress,
        trigger_rx,
    };

    (handle, generator)
}

impl FeedGenerator {
    /// Run the trigger loop until all service handles are dropped.
    pub async fn run(mut self) {
        while self.trigger_rx.recv().await.is_some() {
            self.in_progress.store(true, Ordering::SeqCst);
            if let Err(e) = run_once(&self.ctx, &self.db).await {
                error!("Feed generation failed: {e:#}");
            }
            self.in_progress.store(false, Ordering::SeqCst);
        }
    }
}

/// Execute one generation run end to end.
///
/// A storage failure aborts the run and leaves the stored feed and analytics
/// untouched; per-query fetch failures only cost that query's records.
///
/// # Errors
///
/// Returns an error on storage access failure.
pub async fn run_once(ctx: &RunContext, db: &Database) -> Result<()> {
    let topics = db::load_topics(db.pool())
        .await
        .context("Failed to load topics")?;
    let settings = db::load_settings(db.pool())
        .await
        .context("Failed to load settings")?;

    if topics.is_empty() {
        info!("No topics configured, nothing to generate");
        return Ok(());
    }

    let queries = expansion::expand(&topics, ctx.expansion);
    info!(
        topics = topics.len(),
        queries = queries.len(),
        "Starting feed generation"
    );

    let per_query_limit = settings.results_per_topic as usize;
    let outcome = aggregate::aggregate(ctx, queries, per_query_limit, topics.len()).await;

    if outcome.videos.is_empty() {
        warn!("No videos found for configured topics, keeping previous feed");
        return Ok(());
    }

    db::replace_feed(db.pool(), &outcome.videos)
        .await
        .context("Failed to store feed")?;

    let snapshot = AnalyticsSnapshot {
        generated: outcome.videos.len() as u32,
        performance_ms: outcome.elapsed.as_millis() as u64,
        last_generated: Utc::now().to_rfc3339(),
    };
    db::save_analytics(db.pool(), &snapshot)
        .await
        .context("Failed to store analytics")?;

    info!(
        generated = snapshot.generated,
        elapsed_ms = snapshot.performance_ms,
        "Feed generation complete"
    );

    Ok(())
}
