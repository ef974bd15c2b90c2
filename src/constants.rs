//! Application constants for HLS Fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// HTTP session configuration constants
///
/// The upstream CDN validates client-hint headers and the Referer, so the
/// session presents a fixed mobile Chromium identity on every request.
pub mod http {
    use super::Duration;

    /// User agent presented on all requests
    pub const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/140.0.0.0 Mobile Safari/537.36";

    /// Referer required by the upstream service
    pub const REFERER: &str = "https://vidlink.pro/";

    /// Client-hint brand list header
    pub const SEC_CH_UA: &str = "\"Chromium\";v=\"140\", \"Not=A?Brand\";v=\"24\", \"Brave\";v=\"140\"";

    /// Client-hint mobile flag header
    pub const SEC_CH_UA_MOBILE: &str = "?1";

    /// Client-hint platform header
    pub const SEC_CH_UA_PLATFORM: &str = "\"Android\"";

    /// Per-segment request timeout
    pub const SEGMENT_TIMEOUT: Duration = Duration::from_secs(20);

    /// Playlist document request timeout
    pub const PLAYLIST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default base URL for resolving relative segment paths
    pub const DEFAULT_BASE_URL: &str = "https://storm.vodvidl.site";
}

/// Transient-error retry configuration for the HTTP layer
///
/// This is the per-request retry applied inside the session client for
/// transient server statuses. It is distinct from the coordinator's single
/// application-level retry pass over failed segments.
pub mod limits {
    /// Maximum retry attempts for transient HTTP errors
    pub const MAX_RETRIES: u32 = 3;

    /// Backoff factor applied between retries (seconds)
    pub const RETRY_BACKOFF_FACTOR: f64 = 0.5;

    /// HTTP statuses considered transient and retried by the session
    pub const RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];
}

/// Worker pool configuration
pub mod workers {
    /// Default number of concurrent segment fetches in flight
    pub const DEFAULT_WORKER_BUDGET: usize = 20;
}

/// Progress sampling policy
pub mod progress {
    use super::Duration;

    /// Minimum interval between time-driven samples
    pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(500);

    /// Emit a sample on every Nth completion regardless of elapsed time
    pub const SAMPLE_EVERY_N_COMPLETIONS: u64 = 20;

    /// Progress bar width in characters
    pub const BAR_WIDTH: usize = 40;
}

// Re-export commonly used constants for convenience
pub use http::{DEFAULT_BASE_URL, REFERER, SEGMENT_TIMEOUT, USER_AGENT};
pub use limits::{MAX_RETRIES, RETRY_STATUSES};
pub use workers::DEFAULT_WORKER_BUDGET;
