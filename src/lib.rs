//! HLS Fetcher Library
//!
//! A Rust library for downloading segmented media playlists. Resolves a
//! master playlist to a quality variant, fetches all segments concurrently
//! under a bounded worker budget with a single retry pass, and reassembles
//! them in strict original order.

pub mod app;
pub mod cli;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        assert_eq!(DEFAULT_WORKER_BUDGET, 20);
        assert_eq!(SEGMENT_TIMEOUT.as_secs(), 20);
        assert!(RETRY_STATUSES.contains(&429));
    }

    #[test]
    fn test_error_types() {
        let playlist_error = errors::PlaylistError::NoVariants;
        let app_error = AppError::Playlist(playlist_error);
        assert_eq!(app_error.category(), "playlist");
    }
}
