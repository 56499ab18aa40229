use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

use super::models::{AnalyticsSnapshot, Settings};
use crate::search::VideoRecord;
use crate::topic::Topic;

const TOPICS_KEY: &str = "topics";
const SETTINGS_KEY: &str = "settings";
const ANALYTICS_KEY: &str = "analytics";

// ========== Key-Value Store ==========

async fn get_value<T: DeserializeOwned>(pool: &SqlitePool, key: &str) -> Result<Option<T>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM store WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to read store key '{key}'"))?;

    match row {
        Some((json,)) => {
            let value = serde_json::from_str(&json)
                .with_context(|| format!("Failed to decode store key '{key}'"))?;
            Ok(Some(value))
        }
        None => Ok(None),
    }
}

async fn set_value<T: Serialize>(pool: &SqlitePool, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)
        .with_context(|| format!("Failed to encode store key '{key}'"))?;

    sqlx::query(
        r"
        INSERT INTO store (key, value) VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value
        ",
    )
    .bind(key)
    .bind(json)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to write store key '{key}'"))?;

    Ok(())
}

// ========== Topics ==========

/// Load the ordered topic list. Missing key means no topics yet.
pub async fn load_topics(pool: &SqlitePool) -> Result<Vec<Topic>> {
    Ok(get_value(pool, TOPICS_KEY).await?.unwrap_or_default())
}

/// Persist the ordered topic list.
pub async fn save_topics(pool: &SqlitePool, topics: &[Topic]) -> Result<()> {
    set_value(pool, TOPICS_KEY, &topics).await
}

/// Append a topic if not already present. Returns false on duplicate.
pub async fn add_topic(pool: &SqlitePool, topic: &Topic) -> Result<bool> {
    let mut topics = load_topics(pool).await?;
    if topics.contains(topic) {
        return Ok(false);
    }
    topics.push(topic.clone());
    save_topics(pool, &topics).await?;
    Ok(true)
}

/// Remove a topic. Returns false if it was not in the list.
pub async fn remove_topic(pool: &SqlitePool, topic: &Topic) -> Result<bool> {
    let mut topics = load_topics(pool).await?;
    let before = topics.len();
    topics.retain(|t| t != topic);
    if topics.len() == before {
        return Ok(false);
    }
    save_topics(pool, &topics).await?;
    Ok(true)
}

// ========== Settings ==========

/// Load settings, falling back to defaults when unset.
pub async fn load_settings(pool: &SqlitePool) -> Result<Settings> {
    Ok(get_value(pool, SETTINGS_KEY).await?.unwrap_or_default())
}

/// Persist settings.
pub async fn save_settings(pool: &SqlitePool, settings: &Settings) -> Result<()> {
    set_value(pool, SETTINGS_KEY, settings).await
}

// ========== Analytics ==========

/// Load the last run's analytics snapshot, if any run has completed.
pub async fn load_analytics(pool: &SqlitePool) -> Result<Option<AnalyticsSnapshot>> {
    get_value(pool, ANALYTICS_KEY).await
}

/// Overwrite the analytics snapshot.
pub async fn save_analytics(pool: &SqlitePool, snapshot: &AnalyticsSnapshot) -> Result<()> {
    set_value(pool, ANALYTICS_KEY, snapshot).await
}

// ========== Feed ==========

/// Replace the stored feed wholesale with the given records, in order.
pub async fn replace_feed(pool: &SqlitePool, videos: &[VideoRecord]) -> Result<()> {
    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    sqlx::query("DELETE FROM feed_videos")
        .execute(&mut *tx)
        .await
        .context("Failed to clear feed")?;

    for (position, video) in videos.iter().enumerate() {
        sqlx::query(
            r"
            INSERT INTO feed_videos (position, video_id, title, thumbnail_url, channel, duration, views)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(position as i64)
        .bind(&video.id)
        .bind(&video.title)
        .bind(&video.thumbnail_url)
        .bind(&video.channel)
        .bind(&video.duration)
        .bind(&video.views)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to insert feed video '{}'", video.id))?;
    }

    tx.commit().await.context("Failed to commit feed")?;
    Ok(())
}

/// Load the stored feed in display order.
pub async fn load_feed(pool: &SqlitePool) -> Result<Vec<VideoRecord>> {
    let rows: Vec<(String, String, String, String, String, String)> = sqlx::query_as(
        r"
        SELECT video_id, title, thumbnail_url, channel, duration, views
        FROM feed_videos
        ORDER BY position
        ",
    )
    .fetch_all(pool)
    .await
    .context("Failed to load feed")?;

    Ok(rows
        .into_iter()
        .map(
            |(id, title, thumbnail_url, channel, duration, views)| VideoRecord {
                id,
                title,
                thumbnail_url,
                channel,
                duration,
                views,
            },
        )
        .collect())
}
