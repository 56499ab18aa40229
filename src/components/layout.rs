//! Base layout component for the web UI.

use maud::{html, Markup, DOCTYPE};

/// Base page layout.
///
/// # Example
///
/// ```ignore
/// let content = html! { h1 { "Hello" } };
/// let page = BaseLayout::new("Feed").render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
}

impl<'a> BaseLayout<'a> {
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self { title }
    }

    /// Render the complete HTML page with the given content inside
    /// `<main class="container">`.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    meta name="color-scheme" content="light dark";
                    title { (self.title) " - Topic Recommender" }
                    link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css";
                }
                body {
                    header class="container" {
                        nav {
                            ul {
                                li { a href="/" { strong { "Topic Recommender" } } }
                            }
                            ul {
                                li { a href="/" { "Feed" } }
                                li { a href="/stats" { "Stats" } }
                            }
                        }
                    }
                    main class="container" {
                        (content)
                    }
                    footer class="container" {
                        small { "Topic Recommender | " a href="/api/feed" { "JSON" } }
                    }
                }
            }
        }
    }
}
