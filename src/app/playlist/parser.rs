//! Tagged-line playlist scanner
//!
//! Parses an HLS playlist document into either a variant list (master) or a
//! segment list (media). The scanner is pure text-in, types-out: relative
//! URLs are left unresolved so the parser stays free of session and base-URL
//! concerns.
//!
//! Detection rule: any line carrying the `EXT-X-STREAM-INF` tag makes the
//! document a master playlist. Otherwise every non-empty, non-comment line
//! is a segment reference, and its position after filtering defines its
//! index.

use tracing::debug;

use crate::errors::{PlaylistError, PlaylistResult};

use super::types::{Playlist, SegmentList, VariantEntry};

/// Tag that marks a master-playlist variant line
const STREAM_INF_TAG: &str = "#EXT-X-STREAM-INF";

/// Attribute key carrying the variant resolution
const RESOLUTION_ATTR: &str = "RESOLUTION=";

/// Parse a playlist document
///
/// Returns [`Playlist::Master`] when the document advertises quality
/// variants, [`Playlist::Media`] when it lists segments directly.
///
/// # Errors
///
/// Returns [`PlaylistError::Malformed`] if the document contains no
/// extractable entries of either kind.
pub fn parse(document: &str) -> PlaylistResult<Playlist> {
    let lines: Vec<&str> = document.lines().map(str::trim).collect();

    let is_master = lines.iter().any(|line| line.starts_with(STREAM_INF_TAG));

    if is_master {
        let variants = scan_variants(&lines);
        if variants.is_empty() {
            return Err(PlaylistError::Malformed);
        }
        debug!("Parsed master playlist with {} variants", variants.len());
        return Ok(Playlist::Master(variants));
    }

    let urls: Vec<String> = lines
        .iter()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect();

    if urls.is_empty() {
        return Err(PlaylistError::Malformed);
    }

    let segments = SegmentList::from_urls(urls);
    debug!("Parsed media playlist with {} segments", segments.len());
    Ok(Playlist::Media(segments))
}

/// Scan stream-inf tag lines and pair each with the URL line that follows it
fn scan_variants(lines: &[&str]) -> Vec<VariantEntry> {
    let mut variants = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !line.starts_with(STREAM_INF_TAG) {
            continue;
        }

        // The variant URL is the next non-empty, non-comment line.
        let url = lines[i + 1..]
            .iter()
            .find(|next| !next.is_empty() && !next.starts_with('#'))
            .map(|next| next.to_string());

        if let Some(url) = url {
            variants.push(VariantEntry {
                resolution: extract_resolution(line),
                url,
            });
        }
    }

    variants
}

/// Extract the RESOLUTION attribute value from a stream-inf line
///
/// Attribute values in the stream-inf list are comma separated, so the value
/// runs until the next comma or end of line.
fn extract_resolution(line: &str) -> Option<String> {
    let start = line.find(RESOLUTION_ATTR)? + RESOLUTION_ATTR.len();
    let rest = &line[start..];
    let end = rest.find(',').unwrap_or(rest.len());
    let value = rest[..end].trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "#EXTM3U\n\
        #EXT-X-STREAM-INF:BANDWIDTH=5000000,RESOLUTION=1920x1080\n\
        1080p/index.m3u8\n\
        #EXT-X-STREAM-INF:BANDWIDTH=2500000,RESOLUTION=1280x720\n\
        720p/index.m3u8\n\
        #EXT-X-STREAM-INF:BANDWIDTH=1000000,RESOLUTION=854x480\n\
        480p/index.m3u8\n";

    const MEDIA: &str = "#EXTM3U\n\
        #EXT-X-VERSION:3\n\
        #EXT-X-TARGETDURATION:6\n\
        #EXTINF:6.0,\n\
        /seg-000.ts\n\
        #EXTINF:6.0,\n\
        /seg-001.ts\n\
        #EXTINF:4.2,\n\
        /seg-002.ts\n\
        #EXT-X-ENDLIST\n";

    #[test]
    fn test_parse_master_preserves_manifest_order() {
        let playlist = parse(MASTER).unwrap();
        let variants = match playlist {
            Playlist::Master(v) => v,
            other => panic!("expected master playlist, got {:?}", other),
        };

        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0].resolution.as_deref(), Some("1920x1080"));
        assert_eq!(variants[0].url, "1080p/index.m3u8");
        assert_eq!(variants[2].resolution.as_deref(), Some("854x480"));
        assert_eq!(variants[2].url, "480p/index.m3u8");
    }

    #[test]
    fn test_parse_media_assigns_contiguous_indices() {
        let playlist = parse(MEDIA).unwrap();
        let segments = match playlist {
            Playlist::Media(s) => s,
            other => panic!("expected media playlist, got {:?}", other),
        };

        assert_eq!(segments.len(), 3);
        let urls: Vec<_> = segments.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, vec!["/seg-000.ts", "/seg-001.ts", "/seg-002.ts"]);
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.index, i);
        }
    }

    #[test]
    fn test_parse_empty_document_is_malformed() {
        assert!(matches!(parse(""), Err(PlaylistError::Malformed)));
        assert!(matches!(
            parse("#EXTM3U\n#EXT-X-ENDLIST\n"),
            Err(PlaylistError::Malformed)
        ));
    }

    #[test]
    fn test_parse_master_without_urls_is_malformed() {
        // A stream-inf tag with no following URL line yields no variants.
        let doc = "#EXTM3U\n#EXT-X-STREAM-INF:RESOLUTION=1920x1080\n";
        assert!(matches!(parse(doc), Err(PlaylistError::Malformed)));
    }

    #[test]
    fn test_resolution_extraction() {
        assert_eq!(
            extract_resolution("#EXT-X-STREAM-INF:RESOLUTION=1280x720,CODECS=\"avc1\""),
            Some("1280x720".to_string())
        );
        assert_eq!(
            extract_resolution("#EXT-X-STREAM-INF:BANDWIDTH=100,RESOLUTION=640x360"),
            Some("640x360".to_string())
        );
        assert_eq!(extract_resolution("#EXT-X-STREAM-INF:BANDWIDTH=100"), None);
    }

    #[test]
    fn test_variant_without_resolution_is_kept() {
        let doc = "#EXT-X-STREAM-INF:BANDWIDTH=100\nonly/index.m3u8\n";
        let playlist = parse(doc).unwrap();
        match playlist {
            Playlist::Master(variants) => {
                assert_eq!(variants.len(), 1);
                assert_eq!(variants[0].resolution, None);
            }
            other => panic!("expected master playlist, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_lines_do_not_shift_indices() {
        let doc = "/a.ts\n\n\n/b.ts\n\n/c.ts";
        let playlist = parse(doc).unwrap();
        match playlist {
            Playlist::Media(segments) => {
                assert_eq!(segments.len(), 3);
                assert_eq!(segments.get(2).unwrap().url, "/c.ts");
            }
            other => panic!("expected media playlist, got {:?}", other),
        }
    }
}
