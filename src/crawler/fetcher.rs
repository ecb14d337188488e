//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the fixed browser identity
//! - GET requests returning raw markup
//! - Turning non-2xx responses into errors
//!
//! There are no retries here. A failed fetch is final for that URL within
//! the run; callers decide whether the failure degrades or aborts.

use crate::config::FetchConfig;
use crate::ScrapeError;
use reqwest::Client;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration (user agent and timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use threadline::config::FetchConfig;
/// use threadline::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.clone())
        .gzip(true)
        .brotli(true);

    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// Fetches markup over HTTP, one request at a time
#[derive(Debug, Clone)]
pub struct HtmlFetcher {
    client: Client,
}

impl HtmlFetcher {
    /// Creates a fetcher from the fetch configuration
    pub fn new(config: &FetchConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Issues a GET and returns the body text
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Raw markup of a 2xx response
    /// * `Err(ScrapeError::Status)` - The server answered with a non-2xx status
    /// * `Err(ScrapeError::Http)` - Connection, timeout or body decoding failure
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })
    }
}
