//! Variant selection policy
//!
//! Given the ordered variant list from a master playlist and a quality
//! preference, deterministically picks one variant. The fallback table is a
//! total function: every preference resolves to some variant for any
//! non-empty input.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::errors::{PlaylistError, PlaylistResult};

use super::types::VariantEntry;

/// Requested quality for variant selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualityPreference {
    /// First variant in manifest order
    Highest,
    /// Last variant in manifest order
    Lowest,
    /// First variant whose resolution tag contains this substring
    Named(String),
}

impl FromStr for QualityPreference {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "highest" => QualityPreference::Highest,
            "lowest" => QualityPreference::Lowest,
            other => QualityPreference::Named(other.to_string()),
        })
    }
}

impl fmt::Display for QualityPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityPreference::Highest => write!(f, "highest"),
            QualityPreference::Lowest => write!(f, "lowest"),
            QualityPreference::Named(tag) => write!(f, "{}", tag),
        }
    }
}

/// Select a variant according to the preference
///
/// Fallback policy when a named tag matches no resolution: low-quality tags
/// (containing "360") fall back to the last variant, high-quality tags
/// (containing "720" or "1080") fall back to the first, and unrecognized
/// tags fall back to the first. The asymmetry biases toward a playable
/// result over an exact match.
///
/// # Errors
///
/// Returns [`PlaylistError::NoVariants`] on an empty variant list.
pub fn select<'a>(
    variants: &'a [VariantEntry],
    preference: &QualityPreference,
) -> PlaylistResult<&'a VariantEntry> {
    let first = variants.first().ok_or(PlaylistError::NoVariants)?;
    let last = variants.last().expect("non-empty list has a last entry");

    let selected = match preference {
        QualityPreference::Highest => first,
        QualityPreference::Lowest => last,
        QualityPreference::Named(tag) => match find_by_tag(variants, tag) {
            Some(found) => found,
            None if tag.contains("360") => last,
            None => first,
        },
    };

    debug!(
        "Selected variant {:?} ({}) for preference '{}'",
        selected.resolution, selected.url, preference
    );
    Ok(selected)
}

/// First variant whose resolution tag contains the given substring
fn find_by_tag<'a>(variants: &'a [VariantEntry], tag: &str) -> Option<&'a VariantEntry> {
    let digits = resolution_digits(tag);
    variants.iter().find(|v| {
        v.resolution
            .as_deref()
            .is_some_and(|res| res.contains(digits))
    })
}

/// Strip a trailing "p" so "720p" matches "1280x720" resolution tags
fn resolution_digits(tag: &str) -> &str {
    tag.strip_suffix('p').unwrap_or(tag)
}
