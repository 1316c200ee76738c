//! HTTP audio source
//!
//! Opens the remote MP3 and hands back the response so its body can be
//! read chunk by chunk.

use reqwest::{Response, StatusCode, Url};
use thiserror::Error;

/// Errors from opening the remote stream
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Request failed")]
    Request(#[from] reqwest::Error),
    #[error("Server returned {status} for {url}")]
    Status { url: String, status: StatusCode },
}

/// Parse and check a stream URL (http or https only)
pub fn validate_url(url: &str) -> Result<Url, SourceError> {
    let parsed = Url::parse(url).map_err(|e| SourceError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(SourceError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// HTTP client for fetching audio
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: reqwest::Client,
    allow_error_status: bool,
}

impl HttpSource {
    /// Create a source with a default client
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream non-2xx bodies as if they were audio instead of failing
    pub fn allow_error_status(mut self, allow: bool) -> Self {
        self.allow_error_status = allow;
        self
    }

    /// Send the GET and return once headers have arrived
    pub async fn open(&self, url: &str) -> Result<Response, SourceError> {
        let url = validate_url(url)?;

        tracing::debug!(%url, "requesting stream");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!(%status, content_length = ?response.content_length(), "response headers received");

        if !status.is_success() {
            if !self.allow_error_status {
                return Err(SourceError::Status {
                    url: url.to_string(),
                    status,
                });
            }
            tracing::warn!(%status, "streaming non-success response body");
        }

        Ok(response)
    }
}
