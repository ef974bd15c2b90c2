//! Playlist and segment retrieval over the shared session
//!
//! Playlist fetches propagate typed errors because nothing downstream can
//! proceed without the document. Segment fetches never raise past their own
//! boundary: every outcome, success or failure, is represented in the
//! returned [`SegmentResult`].
//!
//! Transient server statuses (429/500/502/503/504) are retried here with
//! exponential backoff. This per-request resilience is distinct from the
//! coordinator's single application-level retry pass.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::app::playlist::SegmentReference;
use crate::constants::limits;
use crate::errors::{FetchError, FetchResult, SegmentFailure};

use super::config::ClientConfig;

/// Outcome of one segment fetch attempt
#[derive(Debug, Clone)]
pub struct SegmentResult {
    /// Index of the segment this result belongs to
    pub index: usize,
    /// Payload bytes on success, classified failure otherwise
    pub outcome: std::result::Result<Vec<u8>, SegmentFailure>,
}

impl SegmentResult {
    /// Number of payload bytes, zero for failures
    pub fn byte_len(&self) -> usize {
        self.outcome.as_ref().map(Vec::len).unwrap_or(0)
    }
}

/// Shared HTTP session for one download run
///
/// Wraps the pooled reqwest client with the session's fixed headers and
/// timeouts. Read-only after construction and safely shared across all
/// concurrent fetch tasks.
#[derive(Debug, Clone)]
pub struct SessionClient {
    client: Client,
    config: ClientConfig,
}

impl SessionClient {
    /// Create a session with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> FetchResult<Self> {
        let client = config.build_http_client()?;
        Ok(Self { client, config })
    }

    /// Create a session with default configuration
    pub fn new_default() -> FetchResult<Self> {
        Self::new(ClientConfig::default())
    }

    /// Fetch a playlist document as text
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the request fails after transient retries or
    /// the server responds with a non-success status.
    pub async fn get_playlist(&self, url: &Url) -> FetchResult<String> {
        let response = self
            .get_with_retry(url, self.config.playlist_timeout)
            .await?;
        let text = response.text().await?;
        tracing::debug!("Fetched playlist document: {}", url);
        Ok(text)
    }

    /// Fetch one segment, resolving its URL against the base
    ///
    /// All failure modes are classified into the result; this method never
    /// returns an error.
    pub async fn fetch_segment(
        &self,
        reference: &SegmentReference,
        base_url: &Url,
    ) -> SegmentResult {
        let index = reference.index;

        let url = match resolve_segment_url(base_url, &reference.url) {
            Ok(url) => url,
            Err(e) => {
                return SegmentResult {
                    index,
                    outcome: Err(classify(e)),
                }
            }
        };

        let outcome = match self.get_with_retry(&url, self.config.segment_timeout).await {
            Ok(response) => match response.bytes().await {
                Ok(bytes) => Ok(bytes.to_vec()),
                Err(e) => Err(classify(FetchError::Http(e))),
            },
            Err(e) => Err(classify(e)),
        };

        if let Err(failure) = &outcome {
            tracing::debug!("Segment {} failed: {}", index, failure);
        }

        SegmentResult { index, outcome }
    }

    /// Perform one GET with transient-status retry and backoff
    async fn get_with_retry(&self, url: &Url, timeout: Duration) -> FetchResult<reqwest::Response> {
        let mut retries = 0;
        loop {
            match self.client.get(url.as_str()).timeout(timeout).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();

                    if limits::RETRY_STATUSES.contains(&status) && retries < limits::MAX_RETRIES {
                        retries += 1;
                        let delay = backoff_delay(retries);
                        tracing::warn!(
                            "Transient HTTP {} for {} (attempt {}/{}). Backing off for {}ms",
                            status,
                            url,
                            retries,
                            limits::MAX_RETRIES,
                            delay.as_millis()
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    if !response.status().is_success() {
                        return Err(FetchError::ServerError { status });
                    }

                    return Ok(response);
                }
                Err(e) if retries < limits::MAX_RETRIES => {
                    retries += 1;
                    let delay = backoff_delay(retries);
                    tracing::warn!(
                        "Request failed (attempt {}/{}): {}. Retrying in {}ms",
                        retries,
                        limits::MAX_RETRIES,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(FetchError::Http(e)),
            }
        }
    }
}

/// Resolve a segment URL against the base, leaving absolute URLs untouched
fn resolve_segment_url(base_url: &Url, segment_url: &str) -> FetchResult<Url> {
    if segment_url.starts_with("http://") || segment_url.starts_with("https://") {
        return Url::parse(segment_url).map_err(|e| FetchError::InvalidUrl {
            url: segment_url.to_string(),
            error: e.to_string(),
        });
    }

    base_url.join(segment_url).map_err(|e| FetchError::InvalidUrl {
        url: segment_url.to_string(),
        error: e.to_string(),
    })
}

/// Exponential backoff delay for the given retry attempt
fn backoff_delay(retries: u32) -> Duration {
    Duration::from_secs_f64(limits::RETRY_BACKOFF_FACTOR * f64::from(1u32 << retries))
}

/// Map a fetch error into a per-segment failure classification
fn classify(error: FetchError) -> SegmentFailure {
    match error {
        FetchError::ServerError { status } => SegmentFailure::HttpStatus(status),
        FetchError::Http(e) if e.is_timeout() => SegmentFailure::Timeout,
        FetchError::Http(e) => SegmentFailure::Transport(e.to_string()),
        FetchError::InvalidUrl { url, error } => {
            SegmentFailure::Transport(format!("invalid url {}: {}", url, error))
        }
    }
}
