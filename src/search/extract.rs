//! Video extraction from raw search-page text.
//!
//! The search page embeds its result data as a JavaScript assignment inside a
//! script tag. Extraction is a regex locate of that assignment followed by a
//! walk of a fixed nested-field path. The path is tied to an undocumented
//! third-party page structure, so the whole thing sits behind the narrow
//! [`VideoExtractor`] trait and call sites only see the three-way outcome.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder used when a result entry has no title.
const UNKNOWN_TITLE: &str = "Unknown Title";

/// Placeholder used when a result entry has no channel name.
const UNKNOWN_CHANNEL: &str = "Unknown Channel";

static INITIAL_DATA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)var ytInitialData = (\{.+?\});").expect("valid regex"));

/// A lightweight video record scraped from a search page.
///
/// Fields are verbatim display strings from the page data; missing sub-fields
/// become placeholders. `id` is the deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub channel: String,
    pub duration: String,
    pub views: String,
}

/// Outcome of extracting videos from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The embedded data was found and walked; may be empty.
    Videos(Vec<VideoRecord>),
    /// No embedded data assignment in the page text.
    NotFound,
    /// The assignment was present but its payload did not parse as JSON.
    ParseError,
}

/// Extract video records from raw search-page text.
///
/// Implementations must never fail hard: an unusable page maps to
/// [`Extraction::NotFound`] or [`Extraction::ParseError`].
pub trait VideoExtractor: Send + Sync {
    fn extract(&self, page: &str, limit: usize) -> Extraction;
}

/// Extractor for the `ytInitialData` script-tag assignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitialDataExtractor;

impl InitialDataExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl VideoExtractor for InitialDataExtractor {
    fn extract(&self, page: &str, limit: usize) -> Extraction {
        let Some(captures) = INITIAL_DATA_RE.captures(page) else {
            return Extraction::NotFound;
        };

        let Ok(data) = serde_json::from_str::<Value>(&captures[1]) else {
            return Extraction::ParseError;
        };

        Extraction::Videos(walk_search_results(&data, limit))
    }
}

/// Walk the fixed renderer path and collect video records.
///
/// Entries without a video id are skipped; all other missing sub-fields fall
/// back to placeholders.
fn walk_search_results(data: &Value, limit: usize) -> Vec<VideoRecord> {
    let sections = data
        .pointer("/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents")
        .and_then(Value::as_array);

    let Some(sections) = sections else {
        return Vec::new();
    };

    let mut videos = Vec::new();

    for section in sections {
        let Some(items) = section
            .pointer("/itemSectionRenderer/contents")
            .and_then(Value::as_array)
        else {
            continue;
        };

        for item in items {
            if videos.len() >= limit {
                return videos;
            }
            let Some(renderer) = item.get("videoRenderer") else {
                continue;
            };
            if let Some(video) = record_from_renderer(renderer) {
                videos.push(video);
            }
        }
    }

    videos
}

fn record_from_renderer(renderer: &Value) -> Option<VideoRecord> {
    let id = renderer.get("videoId").and_then(Value::as_str)?;

    Some(VideoRecord {
        id: id.to_string(),
        title: str_at(renderer, "/title/runs/0/text", UNKNOWN_TITLE),
        thumbnail_url: str_at(renderer, "/thumbnail/thumbnails/0/url", ""),
        channel: str_at(renderer, "/ownerText/runs/0/text", UNKNOWN_CHANNEL),
        duration: str_at(renderer, "/lengthText/simpleText", ""),
        views: str_at(renderer, "/viewCountText/simpleText", ""),
    })
}

fn str_at(value: &Value, pointer: &str, default: &str) -> String {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}
