//! Ordered segment assembly
//!
//! Writes downloaded payloads to a sink in strict segment-index order,
//! independent of the order fetches completed in. Missing segments are
//! skipped, never padded: a hole in the middle omits those bytes without
//! shifting or corrupting the segments after it.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::coordinator::DownloadOutcome;

/// Result of writing an outcome to a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembleResult {
    /// Bytes written to the sink
    pub written: u64,
    /// Indices that had no payload and were skipped
    pub missing_count: usize,
}

impl AssembleResult {
    /// Whether every segment was present
    pub fn is_complete(&self) -> bool {
        self.missing_count == 0
    }
}

/// Write all present payloads to the sink in ascending index order
///
/// Iterates indices `0..total_segments`; the caller inspects the returned
/// `missing_count` to decide whether the assembled output is complete.
///
/// # Errors
///
/// Returns `std::io::Error` only for sink write failures.
pub fn assemble<W: Write>(
    outcome: &DownloadOutcome,
    sink: &mut W,
) -> std::io::Result<AssembleResult> {
    let mut written: u64 = 0;
    let mut missing_count = 0;

    for index in 0..outcome.total_segments {
        match outcome.payloads.get(&index) {
            Some(payload) => {
                sink.write_all(payload)?;
                written += payload.len() as u64;
            }
            None => {
                debug!("Skipping missing segment {}", index);
                missing_count += 1;
            }
        }
    }

    sink.flush()?;
    Ok(AssembleResult {
        written,
        missing_count,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::io::Read;
    use std::time::Duration;

    use super::*;

    fn outcome_from_payloads(total: usize, payloads: Vec<(usize, Vec<u8>)>) -> DownloadOutcome {
        let payloads: BTreeMap<usize, Vec<u8>> = payloads.into_iter().collect();
        let missing = (0..total).filter(|i| !payloads.contains_key(i)).collect();
        let total_bytes = payloads.values().map(|p| p.len() as u64).sum();

        DownloadOutcome {
            total_segments: total,
            payloads,
            missing,
            elapsed: Duration::from_secs(1),
            total_bytes,
            ..Default::default()
        }
    }

    #[test]
    fn test_output_matches_index_order() {
        // Payloads inserted out of completion order still assemble by index.
        let outcome = outcome_from_payloads(
            3,
            vec![
                (2, b"charlie".to_vec()),
                (0, b"alpha".to_vec()),
                (1, b"bravo".to_vec()),
            ],
        );

        let mut sink = Vec::new();
        let result = assemble(&outcome, &mut sink).unwrap();

        assert_eq!(sink, b"alphabravocharlie");
        assert_eq!(result.written, 17);
        assert!(result.is_complete());
    }

    #[test]
    fn test_missing_middle_segment_is_omitted() {
        let outcome = outcome_from_payloads(
            3,
            vec![(0, b"aa".to_vec()), (2, b"cc".to_vec())],
        );

        let mut sink = Vec::new();
        let result = assemble(&outcome, &mut sink).unwrap();

        // Segment 1's bytes are absent; segment 2 is not shifted or padded.
        assert_eq!(sink, b"aacc");
        assert_eq!(result.written, 4);
        assert_eq!(result.missing_count, 1);
        assert!(!result.is_complete());
    }

    #[test]
    fn test_assemble_is_idempotent() {
        let outcome = outcome_from_payloads(
            4,
            vec![
                (0, vec![1, 2]),
                (1, vec![3]),
                (3, vec![4, 5, 6]),
            ],
        );

        let mut first = Vec::new();
        let mut second = Vec::new();
        let a = assemble(&outcome, &mut first).unwrap();
        let b = assemble(&outcome, &mut second).unwrap();

        assert_eq!(first, second);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_outcome_writes_nothing() {
        let outcome = outcome_from_payloads(0, vec![]);
        let mut sink = Vec::new();
        let result = assemble(&outcome, &mut sink).unwrap();

        assert!(sink.is_empty());
        assert_eq!(result.written, 0);
        assert!(result.is_complete());
    }

    #[test]
    fn test_assemble_to_file_sink() {
        let outcome =
            outcome_from_payloads(2, vec![(0, b"seg0".to_vec()), (1, b"seg1".to_vec())]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.ts");
        let mut file = std::fs::File::create(&path).unwrap();
        let result = assemble(&outcome, &mut file).unwrap();
        assert_eq!(result.written, 8);

        let mut contents = Vec::new();
        std::fs::File::open(&path)
            .unwrap()
            .read_to_end(&mut contents)
            .unwrap();
        assert_eq!(contents, b"seg0seg1");
    }
}
