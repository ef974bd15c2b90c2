//! Progress sampling and throughput calculation
//!
//! The tracker is a passive observer fed completion events by the
//! coordinator. It decides when a sample is worth emitting and derives the
//! rates; rendering is left to the CLI. Dropping every sample never affects
//! download correctness.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::constants::progress;

/// One emitted progress sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSample {
    /// Completions observed so far (successes and failures)
    pub completed: u64,
    /// Total expected completions
    pub total: u64,
    /// Payload bytes accumulated so far
    pub bytes_so_far: u64,
    /// Time since the run started
    pub elapsed: Duration,
    /// Completions per second over the session so far
    pub rate_per_sec: f64,
    /// Throughput in megabits per second over the session so far
    pub throughput_mbps: f64,
}

impl ProgressSample {
    /// Completion percentage in the 0..=100 range
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.completed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Sampling gate and rate calculator for completion events
///
/// Emits a sample when any trigger fires: the sampling interval elapsed
/// since the last emission, the completion count hit a multiple of the
/// per-N threshold, or this is the final completion.
#[derive(Debug)]
pub struct ProgressTracker {
    started: Instant,
    last_emit: Instant,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    /// Create a tracker; the session clock starts now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_emit: now,
        }
    }

    /// Record a completion event, returning a sample if one is due
    pub fn record(&mut self, completed: u64, total: u64, bytes_so_far: u64) -> Option<ProgressSample> {
        let now = Instant::now();
        let interval_due = now.duration_since(self.last_emit) >= progress::SAMPLE_INTERVAL;
        let count_due =
            completed > 0 && completed % progress::SAMPLE_EVERY_N_COMPLETIONS == 0;
        let final_due = completed == total;

        if !(interval_due || count_due || final_due) {
            return None;
        }

        self.last_emit = now;
        Some(self.sample(completed, total, bytes_so_far, now))
    }

    fn sample(&self, completed: u64, total: u64, bytes_so_far: u64, now: Instant) -> ProgressSample {
        let elapsed = now.duration_since(self.started);
        let secs = elapsed.as_secs_f64();

        let (rate_per_sec, throughput_mbps) = if secs > 0.0 {
            (
                completed as f64 / secs,
                (bytes_so_far as f64 * 8.0) / (secs * 1_000_000.0),
            )
        } else {
            (0.0, 0.0)
        };

        ProgressSample {
            completed,
            total,
            bytes_so_far,
            elapsed,
            rate_per_sec,
            throughput_mbps,
        }
    }
}
