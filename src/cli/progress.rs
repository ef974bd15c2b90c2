//! Terminal rendering of progress samples
//!
//! The library's progress tracker decides when a sample is due; this module
//! only draws. Quiet mode uses a hidden bar so the call sites stay uniform.

use indicatif::{ProgressBar, ProgressStyle};

use crate::app::ProgressSample;
use crate::constants::progress;

/// Progress bar wrapper for the download run
pub struct ProgressDisplay {
    bar: ProgressBar,
}

impl ProgressDisplay {
    /// Create a display for the given segment count
    pub fn new(total: u64, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total)
        };

        bar.set_style(
            ProgressStyle::default_bar()
                .template(&format!(
                    "|{{bar:{}}}| {{percent}}% | {{msg}} | {{pos}}/{{len}}",
                    progress::BAR_WIDTH
                ))
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("██-"),
        );

        Self { bar }
    }

    /// Render one sample
    pub fn render(&self, sample: &ProgressSample) {
        self.bar.set_position(sample.completed);
        self.bar.set_message(format!(
            "{:.1}/s | {:.2}Mbps",
            sample.rate_per_sec, sample.throughput_mbps
        ));
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_render_updates_position() {
        let display = ProgressDisplay::new(10, true);
        let sample = ProgressSample {
            completed: 4,
            total: 10,
            bytes_so_far: 4096,
            elapsed: Duration::from_secs(1),
            rate_per_sec: 4.0,
            throughput_mbps: 0.03,
        };

        display.render(&sample);
        assert_eq!(display.bar.position(), 4);
        display.finish();
    }
}
