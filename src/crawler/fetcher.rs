//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured User-Agent and Accept headers
//! - Single GET requests; no retry, no backoff, no per-request timeout (the
//!   crawl deadline bounds every request)
//! - Mapping transport failures and non-2xx statuses into `CrawlerError`

use crate::config::RequestConfig;
use crate::{ConfigError, CrawlerError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The request configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(CrawlerError)` - A header value was not valid or the client failed to build
///
/// # Example
///
/// ```no_run
/// use product_crawler::config::RequestConfig;
/// use product_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&RequestConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &RequestConfig) -> Result<Client, CrawlerError> {
    let accept = HeaderValue::from_str(&config.accept)
        .map_err(|e| ConfigError::Validation(format!("Invalid accept header: {}", e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, accept);

    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches a page and returns its body as text
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Connection refused, timeout, TLS failure | `CrawlerError::Http` |
/// | Non-2xx status after redirects | `CrawlerError::HttpStatus` |
/// | Body cannot be decoded | `CrawlerError::Http` |
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, CrawlerError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| CrawlerError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlerError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| CrawlerError::Http {
        url: url.to_string(),
        source,
    })?;

    tracing::debug!("Fetched {} ({} bytes)", url, body.len());

    Ok(body)
}
