//! Core application logic for HLS Fetcher
//!
//! This module contains the main application components: the playlist
//! parser and variant selector, the shared HTTP session, the concurrent
//! download coordinator, and the ordered assembler.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hls_fetcher::app::{
//!     assemble, parse, ClientConfig, CompletionEvent, Coordinator, CoordinatorConfig,
//!     Playlist, SessionClient,
//! };
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Arc::new(SessionClient::new(ClientConfig::default())?);
//! let url = Url::parse("https://example.com/media.m3u8")?;
//! let document = session.get_playlist(&url).await?;
//!
//! if let Playlist::Media(segments) = parse(&document)? {
//!     let coordinator = Coordinator::new(CoordinatorConfig::default(), session);
//!     let mut on_event = |_event: CompletionEvent| {};
//!     let outcome = coordinator.run(&segments, &url, &mut on_event).await;
//!
//!     let mut output = std::fs::File::create("output.ts")?;
//!     let result = assemble(&outcome, &mut output)?;
//!     println!("wrote {} bytes, {} missing", result.written, result.missing_count);
//! }
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod client;
pub mod coordinator;
pub mod playlist;

// Re-export main public API
pub use assemble::{assemble, AssembleResult};
pub use client::{ClientConfig, SegmentResult, SessionClient};
pub use coordinator::{
    run_with_fetcher, CompletionEvent, Coordinator, CoordinatorConfig, DownloadOutcome,
    OutcomeSummary, ProgressSample, ProgressTracker,
};
pub use playlist::{parse, select, Playlist, QualityPreference, SegmentList, SegmentReference, VariantEntry};
