//! Concurrent download orchestration
//!
//! The coordinator owns the whole segment download run: it dispatches one
//! fetch task per segment through a pool bounded at the worker budget,
//! drains results in completion order, then drives a single sequential retry
//! pass over the failures. Worker tasks only ever return [`SegmentResult`]
//! values; the success map and failure set are touched by exactly one
//! consuming loop, so the collection needs no locking.
//!
//! The coordinator never fails outright. A run that ends with missing
//! indices is a degraded success surfaced through
//! [`DownloadOutcome::missing`], never as an error.

pub mod outcome;
pub mod progress;

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use futures::{stream, StreamExt};
use tracing::{info, warn};
use url::Url;

use crate::app::client::{SegmentResult, SessionClient};
use crate::app::playlist::{SegmentList, SegmentReference};
use crate::constants::workers;

pub use outcome::{DownloadOutcome, OutcomeSummary};
pub use progress::{ProgressSample, ProgressTracker};

/// Completion event fed to the progress observer
///
/// Emitted once per finished first-pass fetch, success or failure alike.
#[derive(Debug, Clone, Copy)]
pub struct CompletionEvent {
    /// Fetches finished so far
    pub completed: u64,
    /// Total fetches in the first pass
    pub total: u64,
    /// Payload bytes accumulated so far
    pub bytes_so_far: u64,
}

/// Configuration for a coordinator run
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Maximum fetches in flight concurrently
    pub worker_budget: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            worker_budget: workers::DEFAULT_WORKER_BUDGET,
        }
    }
}

impl CoordinatorConfig {
    /// Set the worker budget
    pub fn with_worker_budget(mut self, worker_budget: usize) -> Self {
        self.worker_budget = worker_budget;
        self
    }
}

/// Orchestrates the concurrent fetch of a full segment list
pub struct Coordinator {
    config: CoordinatorConfig,
    session: Arc<SessionClient>,
}

impl Coordinator {
    /// Create a coordinator over a shared session
    pub fn new(config: CoordinatorConfig, session: Arc<SessionClient>) -> Self {
        Self { config, session }
    }

    /// Download every segment in the list, resolving URLs against `base_url`
    ///
    /// The observer is called once per first-pass completion, off the
    /// critical path: it can render progress but cannot influence the run.
    pub async fn run(
        &self,
        segments: &SegmentList,
        base_url: &Url,
        observer: &mut dyn FnMut(CompletionEvent),
    ) -> DownloadOutcome {
        let fetcher = |reference: SegmentReference| {
            let session = Arc::clone(&self.session);
            let base_url = base_url.clone();
            async move { session.fetch_segment(&reference, &base_url).await }
        };

        run_with_fetcher(segments, self.config.worker_budget, fetcher, observer).await
    }
}

/// Run the two-pass download with an injected fetcher
///
/// The fetcher is the unit of work: one call per segment in the pooled first
/// pass, then one sequential call per still-failed index in the retry pass.
/// Exposed separately from [`Coordinator::run`] so the concurrency and retry
/// semantics are testable without a network.
pub async fn run_with_fetcher<F, Fut>(
    segments: &SegmentList,
    worker_budget: usize,
    fetcher: F,
    observer: &mut dyn FnMut(CompletionEvent),
) -> DownloadOutcome
where
    F: Fn(SegmentReference) -> Fut,
    Fut: Future<Output = SegmentResult>,
{
    let start = Instant::now();
    let started_at = chrono::Utc::now();
    let total = segments.len();

    let mut payloads: BTreeMap<usize, Vec<u8>> = BTreeMap::new();
    let mut pending_failures: BTreeSet<usize> = BTreeSet::new();
    let mut total_bytes: u64 = 0;
    let mut completed: u64 = 0;

    info!(
        "Starting download of {} segments with worker budget {}",
        total, worker_budget
    );

    // First pass: one task per segment, bounded in-flight, drained here in
    // completion order by this single consumer.
    {
        let mut results = stream::iter(segments.iter().cloned())
            .map(&fetcher)
            .buffer_unordered(worker_budget.max(1));

        while let Some(result) = results.next().await {
            completed += 1;
            apply_result(result, &mut payloads, &mut pending_failures, &mut total_bytes);
            observer(CompletionEvent {
                completed,
                total: total as u64,
                bytes_so_far: total_bytes,
            });
        }
    }

    // Retry pass: exactly one sequential attempt per failure, ascending
    // index order. A second failure is permanent.
    if !pending_failures.is_empty() {
        let failed_count = pending_failures.len();
        info!("Retrying {} failed segments", failed_count);

        let mut recovered = 0;
        for index in pending_failures.clone() {
            let reference = segments
                .get(index)
                .expect("failure index originates from this segment list")
                .clone();

            let result = fetcher(reference).await;
            if matches!(result.outcome, Ok(_)) {
                pending_failures.remove(&index);
                recovered += 1;
            }
            apply_result(result, &mut payloads, &mut pending_failures, &mut total_bytes);
        }

        info!("Retry pass recovered {}/{} segments", recovered, failed_count);
    }

    if !pending_failures.is_empty() {
        warn!(
            "{} segments still missing after retry: {:?}",
            pending_failures.len(),
            pending_failures
        );
    }

    DownloadOutcome {
        total_segments: total,
        payloads,
        missing: pending_failures,
        started_at,
        elapsed: start.elapsed(),
        total_bytes,
    }
}

/// Fold one segment result into the coordinator's bookkeeping
fn apply_result(
    result: SegmentResult,
    payloads: &mut BTreeMap<usize, Vec<u8>>,
    pending_failures: &mut BTreeSet<usize>,
    total_bytes: &mut u64,
) {
    match result.outcome {
        Ok(payload) => {
            *total_bytes += payload.len() as u64;
            payloads.insert(result.index, payload);
        }
        Err(failure) => {
            warn!("Segment {} failed: {}", result.index, failure);
            pending_failures.insert(result.index);
        }
    }
}
