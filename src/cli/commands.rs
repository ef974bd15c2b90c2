//! Command handlers for HLS Fetcher CLI
//!
//! This module implements the end-to-end download flow: fetch and parse the
//! playlist, resolve a master playlist to its selected variant, run the
//! concurrent download, and assemble the output file. A run with missing
//! segments still writes its best-effort output and reports a warning; it
//! is the caller's call whether that constitutes failure.

use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use crate::app::{
    assemble, parse, select, ClientConfig, Coordinator, CoordinatorConfig, Playlist,
    ProgressTracker, SegmentList, SessionClient,
};
use crate::cli::{DownloadArgs, ProgressDisplay};
use crate::errors::{AppError, FetchError, PlaylistError, Result};

/// Handle the download command
pub async fn handle_download(args: DownloadArgs, quiet: bool) -> Result<()> {
    args.validate().map_err(AppError::generic)?;

    let session = Arc::new(
        SessionClient::new(ClientConfig::with_worker_budget(args.workers))
            .map_err(AppError::Fetch)?,
    );

    let playlist_url = parse_url(&args.url)?;
    let base_url = parse_url(&args.base_url)?;

    info!(
        "Resolving playlist {} (quality: {}, workers: {})",
        playlist_url, args.quality, args.workers
    );
    let segments = resolve_segments(&session, &playlist_url, &args).await?;
    info!("Resolved {} segments", segments.len());

    let display = ProgressDisplay::new(segments.len() as u64, quiet);
    let mut tracker = ProgressTracker::new();
    let mut observer = |event: crate::app::CompletionEvent| {
        if let Some(sample) = tracker.record(event.completed, event.total, event.bytes_so_far) {
            display.render(&sample);
        }
    };

    let coordinator = Coordinator::new(
        CoordinatorConfig::default().with_worker_budget(args.workers),
        Arc::clone(&session),
    );
    let outcome = coordinator.run(&segments, &base_url, &mut observer).await;
    display.finish();

    let file = File::create(&args.output)?;
    let mut sink = BufWriter::new(file);
    let result = assemble(&outcome, &mut sink)?;

    let summary = outcome.summary();
    if !quiet {
        println!("Download complete");
        println!("  File:  {}", args.output.display());
        println!("  Size:  {:.2} MB", summary.total_bytes as f64 / (1024.0 * 1024.0));
        println!("  Time:  {:.2}s", summary.elapsed_secs);
        println!("  Speed: {:.2} Mbps", summary.average_mbps);
    }

    if !result.is_complete() {
        warn!("{} segments missing from assembled output", result.missing_count);
        if !quiet {
            println!("Warning: {} segments missing", result.missing_count);
        }
    }

    Ok(())
}

/// Resolve a playlist URL down to its final segment list
///
/// A media playlist is used directly. A master playlist goes through
/// variant selection, and its selected sub-playlist is fetched and parsed
/// again; a second master at that level is malformed.
async fn resolve_segments(
    session: &SessionClient,
    playlist_url: &Url,
    args: &DownloadArgs,
) -> Result<SegmentList> {
    let document = session.get_playlist(playlist_url).await.map_err(AppError::Fetch)?;

    match parse(&document)? {
        Playlist::Media(segments) => Ok(segments),
        Playlist::Master(variants) => {
            let preference = args.quality_preference();
            let selected = select(&variants, &preference)?;
            let variant_url = resolve_variant_url(playlist_url, &selected.url)?;
            info!(
                "Selected variant {:?} -> {}",
                selected.resolution, variant_url
            );

            let media_document = session
                .get_playlist(&variant_url)
                .await
                .map_err(AppError::Fetch)?;
            match parse(&media_document)? {
                Playlist::Media(segments) => Ok(segments),
                Playlist::Master(_) => Err(AppError::Playlist(PlaylistError::Malformed)),
            }
        }
    }
}

/// Resolve a variant's sub-playlist URL against the master playlist URL
fn resolve_variant_url(playlist_url: &Url, variant_url: &str) -> Result<Url> {
    if variant_url.starts_with("http://") || variant_url.starts_with("https://") {
        return parse_url(variant_url);
    }
    playlist_url
        .join(variant_url)
        .map_err(|e| {
            AppError::Fetch(FetchError::InvalidUrl {
                url: variant_url.to_string(),
                error: e.to_string(),
            })
        })
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| {
        AppError::Fetch(FetchError::InvalidUrl {
            url: url.to_string(),
            error: e.to_string(),
        })
    })
}
