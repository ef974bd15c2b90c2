//! HTTP client configuration and building logic
//!
//! This module handles the configuration and construction of the shared
//! HTTP client. The upstream CDN expects a fixed browser identity, so the
//! builder installs the User-Agent, Referer, and client-hint headers as
//! client defaults applied to every request.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::{http, workers};
use crate::errors::{FetchError, FetchResult};

/// Configuration for the shared download session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Maximum connections kept per host; sized to the worker budget so the
    /// pool never serializes concurrent fetches
    pub pool_max_per_host: usize,
    /// Per-segment request timeout
    pub segment_timeout: Duration,
    /// Playlist document request timeout
    pub playlist_timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
    /// TCP nodelay (disable Nagle's algorithm)
    pub tcp_nodelay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            pool_max_per_host: workers::DEFAULT_WORKER_BUDGET,
            segment_timeout: http::SEGMENT_TIMEOUT,
            playlist_timeout: http::PLAYLIST_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            tcp_nodelay: true,
        }
    }
}

impl ClientConfig {
    /// Configuration sized for a specific worker budget
    pub fn with_worker_budget(worker_budget: usize) -> Self {
        Self {
            pool_max_per_host: worker_budget,
            ..Default::default()
        }
    }

    /// Builds the HTTP client with the session's fixed headers
    ///
    /// No client-wide request timeout is set; playlist and segment requests
    /// carry different per-request timeouts.
    pub fn build_http_client(&self) -> FetchResult<Client> {
        Client::builder()
            .default_headers(Self::session_headers())
            .user_agent(http::USER_AGENT)
            .connect_timeout(self.connect_timeout)
            .tcp_nodelay(self.tcp_nodelay)
            .pool_max_idle_per_host(self.pool_max_per_host)
            .build()
            .map_err(FetchError::Http)
    }

    /// Fixed headers required by the upstream service
    fn session_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(http::REFERER));
        headers.insert("sec-ch-ua", HeaderValue::from_static(http::SEC_CH_UA));
        headers.insert(
            "sec-ch-ua-mobile",
            HeaderValue::from_static(http::SEC_CH_UA_MOBILE),
        );
        headers.insert(
            "sec-ch-ua-platform",
            HeaderValue::from_static(http::SEC_CH_UA_PLATFORM),
        );
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.pool_max_per_host, workers::DEFAULT_WORKER_BUDGET);
        assert_eq!(config.segment_timeout, Duration::from_secs(20));
        assert_eq!(config.playlist_timeout, Duration::from_secs(30));
        assert!(config.tcp_nodelay);
    }

    #[test]
    fn test_pool_sized_to_worker_budget() {
        let config = ClientConfig::with_worker_budget(4);
        assert_eq!(config.pool_max_per_host, 4);
        assert_eq!(config.segment_timeout, Duration::from_secs(20));
    }

    #[test]
    fn test_session_headers_present() {
        let headers = ClientConfig::session_headers();
        assert_eq!(headers.get(REFERER).unwrap(), http::REFERER);
        assert!(headers.contains_key("sec-ch-ua"));
        assert!(headers.contains_key("sec-ch-ua-mobile"));
        assert!(headers.contains_key("sec-ch-ua-platform"));
    }

    #[test]
    fn test_http_client_creation() {
        let config = ClientConfig::default();
        let result = config.build_http_client();
        assert!(result.is_ok());
    }
}
