//! Error types for HLS Fetcher
//!
//! This module defines the error taxonomy for all components of the
//! application. Playlist and selection errors are hard failures surfaced to
//! the caller; per-segment failures are soft and absorbed into the download
//! outcome rather than propagated.

use thiserror::Error;

/// Playlist parsing and variant selection errors
#[derive(Error, Debug)]
pub enum PlaylistError {
    /// Document contained no variant or segment entries
    #[error("Malformed playlist: no variant or segment entries found")]
    Malformed,

    /// Variant selection was given an empty variant list
    #[error("Master playlist contains no variants")]
    NoVariants,
}

/// Playlist-level HTTP fetch errors
///
/// These cover retrieving playlist documents, where a failure is fatal to
/// the run. Segment-level failures use [`SegmentFailure`] instead and never
/// abort anything.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request error
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Invalid URL provided
    #[error("Invalid URL: {url} - {error}")]
    InvalidUrl { url: String, error: String },

    /// Server returned error status, or kept returning a transient status
    /// after retries were exhausted
    #[error("Server error: HTTP {status}")]
    ServerError { status: u16 },
}

/// Classified failure for a single segment fetch
///
/// Exactly one of these is recorded per failed segment. The coordinator
/// treats them uniformly (one retry pass, then permanently missing), but the
/// classification is kept for logging and diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentFailure {
    /// Request exceeded the per-segment timeout
    #[error("Segment request timed out")]
    Timeout,

    /// Server returned a non-success status
    #[error("Segment request failed: HTTP {0}")]
    HttpStatus(u16),

    /// Connection or protocol error below the HTTP layer
    #[error("Segment transport error: {0}")]
    Transport(String),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Playlist parsing or selection error
    #[error(transparent)]
    Playlist(#[from] PlaylistError),

    /// Playlist retrieval error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Playlist(_) => "playlist",
            AppError::Fetch(_) => "fetch",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Playlist result type alias
pub type PlaylistResult<T> = std::result::Result<T, PlaylistError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let playlist = AppError::Playlist(PlaylistError::Malformed);
        assert_eq!(playlist.category(), "playlist");

        let fetch = AppError::Fetch(FetchError::ServerError { status: 502 });
        assert_eq!(fetch.category(), "fetch");

        let generic = AppError::generic("boom");
        assert_eq!(generic.category(), "generic");
    }

    #[test]
    fn test_segment_failure_display() {
        assert_eq!(
            SegmentFailure::HttpStatus(404).to_string(),
            "Segment request failed: HTTP 404"
        );
        assert_eq!(
            SegmentFailure::Timeout.to_string(),
            "Segment request timed out"
        );
    }
}
