//! Download outcome aggregation
//!
//! The outcome is produced once by the coordinator and consumed by the
//! assembler and the CLI summary. A run with missing indices is a degraded
//! success, not an error.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of one coordinator run
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    /// Number of segments in the source playlist
    pub total_segments: usize,
    /// Payloads keyed by segment index
    pub payloads: BTreeMap<usize, Vec<u8>>,
    /// Indices still missing after the retry pass
    pub missing: BTreeSet<usize>,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall-clock time for both passes
    pub elapsed: Duration,
    /// Total payload bytes transferred
    pub total_bytes: u64,
}

impl Default for DownloadOutcome {
    fn default() -> Self {
        Self {
            total_segments: 0,
            payloads: BTreeMap::new(),
            missing: BTreeSet::new(),
            started_at: Utc::now(),
            elapsed: Duration::ZERO,
            total_bytes: 0,
        }
    }
}

impl DownloadOutcome {
    /// Number of segments successfully downloaded
    pub fn success_count(&self) -> usize {
        self.payloads.len()
    }

    /// Whether every segment was retrieved
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Average throughput over the whole run in megabits per second
    pub fn average_mbps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.total_bytes as f64 * 8.0) / (secs * 1_000_000.0)
        } else {
            0.0
        }
    }

    /// Serializable summary for logging and reporting
    pub fn summary(&self) -> OutcomeSummary {
        OutcomeSummary {
            started_at: self.started_at,
            total_segments: self.total_segments,
            succeeded: self.success_count(),
            missing: self.missing.len(),
            total_bytes: self.total_bytes,
            elapsed_secs: self.elapsed.as_secs_f64(),
            average_mbps: self.average_mbps(),
        }
    }
}

/// Compact summary of a download run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub started_at: DateTime<Utc>,
    pub total_segments: usize,
    pub succeeded: usize,
    pub missing: usize,
    pub total_bytes: u64,
    pub elapsed_secs: f64,
    pub average_mbps: f64,
}
