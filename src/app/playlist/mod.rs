//! Playlist parsing and variant selection
//!
//! This module turns raw playlist text into typed entries and resolves a
//! quality preference against a master playlist's variant list. Parsing is
//! pure (no I/O, no URL resolution) so both halves are directly testable.

pub mod parser;
pub mod select;
pub mod types;

pub use parser::parse;
pub use select::{select, QualityPreference};
pub use types::{Playlist, SegmentList, SegmentReference, VariantEntry};
