//! HTTP fetching for remote registries.
//!
//! Provides a blocking HTTP client with a bounded retry policy. Retries
//! apply to transport failures only; an HTTP error status is returned as-is
//! and a 404 is reported as a logical "not found" so the resolver can tell
//! a missing item apart from a broken registry.

use anyhow::{bail, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Number of additional attempts after a failed transport call.
const DEFAULT_RETRIES: u32 = 2;

/// Fetches registry content over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    retries: u32,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with default 30-second timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP fetcher with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("kitbag")
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            timeout,
            retries: DEFAULT_RETRIES,
        }
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch a URL, returning `Ok(None)` on 404.
    ///
    /// Transport failures are retried up to the configured retry budget;
    /// HTTP error statuses other than 404 fail immediately.
    pub fn fetch(&self, url: &str) -> Result<Option<String>> {
        let mut last_err = None;

        for attempt in 0..=self.retries {
            if attempt > 0 {
                tracing::debug!("Retrying fetch of {} (attempt {})", url, attempt + 1);
            }

            match self.client.get(url).send() {
                Ok(response) => {
                    if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Ok(None);
                    }
                    if !response.status().is_success() {
                        bail!("HTTP {} fetching {}", response.status(), url);
                    }
                    return Ok(Some(response.text()?));
                }
                Err(e) => {
                    last_err = Some(e);
                }
            }
        }

        bail!(
            "Failed to fetch {} after {} attempt(s): {}",
            url,
            self.retries + 1,
            last_err.expect("at least one attempt was made")
        )
    }

    /// Fetch a URL and parse the body as JSON, returning `Ok(None)` on 404.
    pub fn fetch_json(&self, url: &str) -> Result<Option<serde_json::Value>> {
        match self.fetch(url)? {
            None => Ok(None),
            Some(body) => {
                let value = serde_json::from_str(&body)
                    .map_err(|e| anyhow::anyhow!("Invalid JSON from {}: {}", url, e))?;
                Ok(Some(value))
            }
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn fetch_returns_body_on_success() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/r/button.json");
            then.status(200).body(r#"{"name":"button"}"#);
        });

        let fetcher = HttpFetcher::new();
        let body = fetcher.fetch(&server.url("/r/button.json")).unwrap();
        assert_eq!(body.unwrap(), r#"{"name":"button"}"#);
    }

    #[test]
    fn fetch_returns_none_on_404() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/r/missing.json");
            then.status(404);
        });

        let fetcher = HttpFetcher::new();
        let body = fetcher.fetch(&server.url("/r/missing.json")).unwrap();
        assert!(body.is_none());
    }

    #[test]
    fn fetch_fails_on_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/r/broken.json");
            then.status(500);
        });

        let fetcher = HttpFetcher::new();
        let result = fetcher.fetch(&server.url("/r/broken.json"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("500"));
    }

    #[test]
    fn fetch_json_rejects_invalid_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/r/garbage.json");
            then.status(200).body("not json");
        });

        let fetcher = HttpFetcher::new();
        let result = fetcher.fetch_json(&server.url("/r/garbage.json"));
        assert!(result.is_err());
    }

    #[test]
    fn fetch_json_parses_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/r/input.json");
            then.status(200).body(r#"{"name":"input","type":"ui"}"#);
        });

        let fetcher = HttpFetcher::new();
        let value = fetcher
            .fetch_json(&server.url("/r/input.json"))
            .unwrap()
            .unwrap();
        assert_eq!(value["name"], "input");
    }
}
