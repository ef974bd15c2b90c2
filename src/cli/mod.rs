//! Command-line interface for HLS Fetcher
//!
//! Argument parsing, command handlers, and progress rendering. All user
//! facing output lives here; the library modules only log through tracing.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{Cli, Commands, DownloadArgs, GlobalArgs};
pub use commands::handle_download;
pub use progress::ProgressDisplay;
