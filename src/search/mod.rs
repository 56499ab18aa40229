//! Search-page fetching.

pub mod extract;

pub use extract::{Extraction, InitialDataExtractor, VideoExtractor, VideoRecord};

use std::time::Duration;

use anyhow::{Context, Result};

use crate::constants::SEARCH_USER_AGENT;

/// HTTP client for the site's search endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl SearchClient {
    /// Create a client for the given base URL (scheme + host, no path).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The search URL for a query, with the query URL-encoded.
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/results?search_query={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    /// Fetch the raw search page for a query.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure or a non-success HTTP status.
    pub async fn fetch_search_page(&self, query: &str) -> Result<String> {
        let url = self.search_url(query);
        let response = self
            .http
            .get(&url)
            .header("User-Agent", SEARCH_USER_AGENT)
            .send()
            .await
            .with_context(|| format!("Failed to fetch search page for '{query}'"))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "search fetch for '{query}' failed with status {}",
                response.status()
            );
        }

        response
            .text()
            .await
            .with_context(|| format!("Failed to read search page body for '{query}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_query() {
        let client = SearchClient::new("https://www.youtube.com/").unwrap();
        assert_eq!(
            client.search_url("rust async & await"),
            "https://www.youtube.com/results?search_query=rust%20async%20%26%20await"
        );
    }
}
