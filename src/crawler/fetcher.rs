//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building the shared HTTP client with the configured user agent
//! - GET requests for listing, item and index pages
//! - GET requests for raw image bytes
//! - Error classification into `FetchError`
//!
//! Requests are issued once; nothing here retries.

use crate::config::HttpConfig;
use crate::FetchError;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// A successfully retrieved HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects; relative links on the page resolve against it
    pub url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Page body content
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use catalog_harvest::config::HttpConfig;
/// use catalog_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches an HTML page
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx | `Ok(FetchedPage)` |
/// | Any other status | `FetchError::Status` |
/// | Timeout | `FetchError::Timeout` |
/// | Connection / body failure | `FetchError::Network` |
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = send(client, url).await?;
    let final_url = response.url().clone();
    let status_code = response.status().as_u16();

    let body = response
        .text()
        .await
        .map_err(|e| classify_error(url, e))?;

    tracing::debug!(url = %url, status = status_code, bytes = body.len(), "Fetched page");

    Ok(FetchedPage {
        url: final_url,
        status_code,
        body,
    })
}

/// Fetches a binary resource such as an image
pub async fn fetch_bytes(client: &Client, url: &Url) -> Result<Vec<u8>, FetchError> {
    let response = send(client, url).await?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| classify_error(url, e))?;
    Ok(bytes.to_vec())
}

async fn send(client: &Client, url: &Url) -> Result<Response, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response)
}

fn classify_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Network {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
