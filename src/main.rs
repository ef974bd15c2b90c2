//! HLS Fetcher CLI application
//!
//! Command-line interface for downloading segmented media playlists into a
//! single file, with concurrent segment fetching and progress reporting.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use hls_fetcher::cli::{handle_download, Cli, Commands};
use hls_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(&cli);

    info!("HLS Fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Download(args) => handle_download(args, cli.global.quiet).await,
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let log_level = cli.log_level();

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("hls_fetcher={}", log_level).parse().unwrap());

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();
}
