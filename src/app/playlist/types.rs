//! Core types for playlist processing
//!
//! This module contains the data structures produced by the playlist parser:
//! variant entries from a master playlist and segment references from a
//! media playlist.

use serde::{Deserialize, Serialize};

/// One quality variant advertised by a master playlist
///
/// Variants keep their manifest order. The first listed variant is
/// conventionally the highest quality, and the selector relies on that
/// ordering for its `Highest`/`Lowest` policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantEntry {
    /// Resolution tag extracted from the stream-inf attributes (e.g. "1920x1080")
    pub resolution: Option<String>,
    /// Sub-playlist URL, absolute or relative
    pub url: String,
}

/// One fetchable media segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentReference {
    /// Zero-based position in the media playlist after comment filtering
    pub index: usize,
    /// Segment URL, absolute or relative to the session base URL
    pub url: String,
}

/// Ordered list of segment references from a media playlist
///
/// Invariant: indices are contiguous, unique, and match each entry's
/// position in the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentList {
    segments: Vec<SegmentReference>,
}

impl SegmentList {
    /// Build a segment list from URLs, assigning positional indices
    pub fn from_urls(urls: impl IntoIterator<Item = String>) -> Self {
        let segments = urls
            .into_iter()
            .enumerate()
            .map(|(index, url)| SegmentReference { index, url })
            .collect();
        Self { segments }
    }

    /// Number of segments in the list
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the list contains no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over segment references in playback order
    pub fn iter(&self) -> std::slice::Iter<'_, SegmentReference> {
        self.segments.iter()
    }

    /// Look up a segment reference by index
    pub fn get(&self, index: usize) -> Option<&SegmentReference> {
        self.segments.get(index)
    }
}

impl<'a> IntoIterator for &'a SegmentList {
    type Item = &'a SegmentReference;
    type IntoIter = std::slice::Iter<'a, SegmentReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// A parsed playlist document
///
/// A master playlist points at sub-playlists tagged with quality attributes;
/// a media playlist lists the segments themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Playlist {
    /// Variant list in manifest order
    Master(Vec<VariantEntry>),
    /// Directly fetchable segment list
    Media(SegmentList),
}
