//! Video card components for the feed page.

use maud::{html, Markup, Render};

use crate::constants::CARD_TITLE_MAX_CHARS;
use crate::db::AnalyticsSnapshot;
use crate::search::VideoRecord;
use crate::topic::Topic;

/// A single recommendation card: thumbnail, duration badge, title, channel,
/// view count. The whole card links to the external watch page in a new tab.
#[derive(Debug, Clone)]
pub struct VideoCard<'a> {
    pub video: &'a VideoRecord,
}

impl<'a> VideoCard<'a> {
    #[must_use]
    pub const fn new(video: &'a VideoRecord) -> Self {
        Self { video }
    }
}

impl Render for VideoCard<'_> {
    fn render(&self) -> Markup {
        let video = self.video;

        html! {
            article class="video-card" data-video-id=(video.id) {
                a href=(watch_url(&video.id)) target="_blank" rel="noopener" {
                    div class="video-thumbnail" {
                        img src=(thumbnail_url(video)) alt=(video.title) loading="lazy";
                        @if !video.duration.is_empty() {
                            span class="duration-badge" { (video.duration) }
                        }
                    }
                    div class="video-info" {
                        h3 class="video-title" { (truncate_title(&video.title)) }
                        p class="video-channel" { (video.channel) }
                        @if !video.views.is_empty() {
                            p class="video-views" { (video.views) }
                        }
                    }
                }
            }
        }
    }
}

/// Grid of video cards.
#[derive(Debug, Clone)]
pub struct VideoGrid<'a> {
    pub videos: &'a [VideoRecord],
}

impl<'a> VideoGrid<'a> {
    #[must_use]
    pub const fn new(videos: &'a [VideoRecord]) -> Self {
        Self { videos }
    }
}

impl Render for VideoGrid<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="video-grid" {
                @for video in self.videos {
                    (VideoCard::new(video))
                }
            }
        }
    }
}

/// Feed header: topic list, video count, last-generated timestamp.
#[derive(Debug, Clone)]
pub struct FeedHeader<'a> {
    pub topics: &'a [Topic],
    pub video_count: usize,
    pub analytics: Option<&'a AnalyticsSnapshot>,
}

impl<'a> FeedHeader<'a> {
    #[must_use]
    pub const fn new(
        topics: &'a [Topic],
        video_count: usize,
        analytics: Option<&'a AnalyticsSnapshot>,
    ) -> Self {
        Self {
            topics,
            video_count,
            analytics,
        }
    }
}

impl Render for FeedHeader<'_> {
    fn render(&self) -> Markup {
        let topic_list = self
            .topics
            .iter()
            .map(Topic::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        html! {
            hgroup class="feed-header" {
                h1 { "Recommendations" }
                @if self.topics.is_empty() {
                    p { "No topics configured yet." }
                } @else {
                    p { "Curated for: " strong { (topic_list) } }
                }
                p class="feed-stats" {
                    span { (self.video_count) " videos" }
                    @if let Some(analytics) = self.analytics {
                        " | "
                        span { "last updated " (analytics.last_generated) }
                    }
                }
            }
        }
    }
}

/// External watch-page URL for a video id.
#[must_use]
pub fn watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}

/// Thumbnail URL for a card, falling back to the site's predictable
/// thumbnail path when the scraped URL is empty.
#[must_use]
pub fn thumbnail_url(video: &VideoRecord) -> String {
    if video.thumbnail_url.is_empty() {
        format!("https://i.ytimg.com/vi/{}/mqdefault.jpg", video.id)
    } else {
        video.thumbnail_url.clone()
    }
}

/// Truncate a title for display, appending an ellipsis when shortened.
#[must_use]
pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > CARD_TITLE_MAX_CHARS {
        let truncated: String = title.chars().take(CARD_TITLE_MAX_CHARS).collect();
        format!("{truncated}...")
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, title: &str) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            title: title.to_string(),
            thumbnail_url: String::new(),
            channel: "Channel".to_string(),
            duration: "10:00".to_string(),
            views: "1K views".to_string(),
        }
    }

    #[test]
    fn test_truncate_title_short_unchanged() {
        assert_eq!(truncate_title("short title"), "short title");
    }

    #[test]
    fn test_truncate_title_long_gets_ellipsis() {
        let long = "x".repeat(CARD_TITLE_MAX_CHARS + 5);
        let truncated = truncate_title(&long);
        assert_eq!(
            truncated.chars().count(),
            CARD_TITLE_MAX_CHARS + 3,
            "60 chars plus ellipsis"
        );
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_thumbnail_falls_back_to_predictable_url() {
        let v = video("abc", "t");
        assert_eq!(thumbnail_url(&v), "https://i.ytimg.com/vi/abc/mqdefault.jpg");

        let mut with_thumb = video("abc", "t");
        with_thumb.thumbnail_url = "https://example.com/t.jpg".to_string();
        assert_eq!(thumbnail_url(&with_thumb), "https://example.com/t.jpg");
    }

    #[test]
    fn test_card_renders_watch_link_and_badge() {
        let v = video("abc123", "My Video");
        let markup = VideoCard::new(&v).render().into_string();
        assert!(markup.contains("https://www.youtube.com/watch?v=abc123"));
        assert!(markup.contains("duration-badge"));
        assert!(markup.contains("My Video"));
    }
}
