//! Page rendering for the web UI.

use maud::{html, Markup};

use crate::components::{BaseLayout, FeedHeader, VideoGrid};
use crate::constants::RESULTS_PER_TOPIC_CHOICES;
use crate::db::{AnalyticsSnapshot, Settings};
use crate::search::VideoRecord;
use crate::topic::Topic;

/// The feed page: header, topic/settings forms, and the card grid.
#[must_use]
pub fn render_home(
    topics: &[Topic],
    settings: Settings,
    videos: &[VideoRecord],
    analytics: Option<&AnalyticsSnapshot>,
) -> Markup {
    let content = html! {
        (FeedHeader::new(topics, videos.len(), analytics))

        section class="manage" {
            form method="post" action="/topics" role="group" {
                input type="text" name="topic" placeholder="Add topic (e.g. ai)" required;
                button type="submit" { "Add" }
            }

            @if !topics.is_empty() {
                ul class="topic-list" {
                    @for topic in topics {
                        li {
                            span { (topic) }
                            form method="post" action="/topics/delete" {
                                input type="hidden" name="topic" value=(topic);
                                button type="submit" class="outline" { "Remove" }
                            }
                        }
                    }
                }
            }

            form method="post" action="/settings" role="group" {
                label for="results_per_topic" { "Results per topic" }
                select id="results_per_topic" name="results_per_topic" {
                    @for &choice in RESULTS_PER_TOPIC_CHOICES {
                        option value=(choice) selected[choice == settings.results_per_topic] {
                            (choice)
                        }
                    }
                }
                button type="submit" { "Save" }
            }

            form method="post" action="/generate" {
                button type="submit" { "Generate now" }
            }
        }

        @if videos.is_empty() {
            section class="empty-state" {
                h3 { "No videos yet" }
                p { "Add a topic and generate to build your feed." }
            }
        } @else {
            (VideoGrid::new(videos))
        }
    };

    BaseLayout::new("Feed").render(content)
}

/// The stats page: the last run's analytics snapshot.
#[must_use]
pub fn render_stats(analytics: Option<&AnalyticsSnapshot>) -> Markup {
    let content = html! {
        h1 { "Generation Stats" }
        @match analytics {
            Some(snapshot) => {
                table {
                    tbody {
                        tr {
                            th scope="row" { "Videos generated" }
                            td { (snapshot.generated) }
                        }
                        tr {
                            th scope="row" { "Run time" }
                            td { (snapshot.performance_ms) " ms" }
                        }
                        tr {
                            th scope="row" { "Last generated" }
                            td { (snapshot.last_generated) }
                        }
                    }
                }
            }
            None => {
                p { "No generation run has completed yet." }
            }
        }
    };

    BaseLayout::new("Stats").render(content)
}
