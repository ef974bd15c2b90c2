//! Command-line argument parsing for HLS Fetcher
//!
//! This module defines the CLI structure using clap derive macros,
//! providing the download interface plus global verbosity controls.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::QualityPreference;
use crate::constants::{http, workers};

/// HLS Fetcher - reassemble segmented media playlists
#[derive(Parser, Debug)]
#[command(
    name = "hls_fetcher",
    version,
    about = "Download a segmented media playlist into a single file",
    long_about = "Downloads every segment of an HLS playlist concurrently and writes them back \
in original order. Master playlists are resolved to a single variant first, driven by the \
requested quality."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download a playlist into a single media file
    Download(DownloadArgs),
}

/// Arguments for the download command
#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    /// Playlist URL (master or media)
    #[arg(value_name = "PLAYLIST_URL")]
    pub url: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Quality preference: highest, lowest, or a resolution tag (e.g. 720p)
    #[arg(short = 'q', long, default_value = "720p")]
    pub quality: String,

    /// Number of concurrent segment fetches
    #[arg(short = 'w', long, default_value_t = workers::DEFAULT_WORKER_BUDGET)]
    pub workers: usize,

    /// Base URL for resolving relative segment paths
    #[arg(long, default_value = http::DEFAULT_BASE_URL, value_name = "URL")]
    pub base_url: String,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Resolve the tracing level from verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.global.very_verbose {
            "debug"
        } else if self.global.verbose {
            "info"
        } else if self.global.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

impl DownloadArgs {
    /// Validate argument combinations
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.workers == 0 {
            return Err("worker count must be at least 1".to_string());
        }
        Ok(())
    }

    /// The parsed quality preference
    pub fn quality_preference(&self) -> QualityPreference {
        self.quality
            .parse()
            .expect("quality preference parsing is infallible")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn download_args(extra: &[&str]) -> DownloadArgs {
        let mut argv = vec![
            "hls_fetcher",
            "download",
            "https://example.com/master.m3u8",
            "--output",
            "out.ts",
        ];
        argv.extend_from_slice(extra);
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Download(args) => args,
        }
    }

    #[test]
    fn test_download_defaults() {
        let args = download_args(&[]);
        assert_eq!(args.quality, "720p");
        assert_eq!(args.workers, workers::DEFAULT_WORKER_BUDGET);
        assert_eq!(args.base_url, http::DEFAULT_BASE_URL);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_quality_preference_parsing() {
        let args = download_args(&["--quality", "highest"]);
        assert_eq!(args.quality_preference(), QualityPreference::Highest);

        let args = download_args(&["--quality", "360p"]);
        assert_eq!(
            args.quality_preference(),
            QualityPreference::Named("360p".to_string())
        );
    }

    #[test]
    fn test_zero_workers_rejected() {
        let args = download_args(&["--workers", "0"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level_from_verbosity() {
        let cli = Cli::try_parse_from([
            "hls_fetcher",
            "--verbose",
            "download",
            "https://example.com/a.m3u8",
            "--output",
            "out.ts",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), "info");

        let cli = Cli::try_parse_from([
            "hls_fetcher",
            "--quiet",
            "download",
            "https://example.com/a.m3u8",
            "--output",
            "out.ts",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), "error");
    }
}
