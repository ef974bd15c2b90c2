//! Shared HTTP session for playlist and segment retrieval
//!
//! One [`SessionClient`] is created per coordinator run and shared
//! (read-only) across all concurrent fetch tasks. The session carries the
//! fixed headers the upstream service requires and applies transient-status
//! retry below the application-level retry pass.

pub mod config;
pub mod fetch;

pub use config::ClientConfig;
pub use fetch::{SegmentResult, SessionClient};
