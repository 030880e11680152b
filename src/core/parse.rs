//! Artist/title parsing from normalized video titles
//!
//! A normalized title is split into (artist, song) using an ordered set of
//! separator patterns. The uploader name is the artist of last resort when
//! no pattern matches.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::ArtistTitlePair;

lazy_static! {
    // Tried strictly in this order; first match wins.
    static ref SEPARATOR_PATTERNS: Vec<Regex> = vec![
        // "Artist1, Artist2 - Title"
        Regex::new(r"(?i)^(.+?)\s*,\s*(.+?)\s*[-–]\s*(.+)$").unwrap(),
        // "Artist1 & Artist2 - Title"
        Regex::new(r"(?i)^(.+?)\s*&\s*(.+?)\s*[-–]\s*(.+)$").unwrap(),
        // "Artist - Title"
        Regex::new(r"(?i)^(.+?)\s*[-–]\s*(.+)$").unwrap(),
        // "Artist ft. Artist2 - Title"
        Regex::new(r"(?i)^(.+?)\s*[\(\[]?ft\.?\s*(.+?)[\)\]]?\s*[-–]\s*(.+)$").unwrap(),
    ];
}

/// Split a normalized title into an (artist, title) pair.
///
/// Total for non-empty input: when no separator pattern matches, the
/// uploader becomes the artist and the full title the song.
pub fn parse(normalized_title: &str, uploader: &str) -> ArtistTitlePair {
    for pattern in SEPARATOR_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(normalized_title) {
            return match (caps.get(1), caps.get(2), caps.get(3)) {
                (Some(first), Some(second), Some(title)) => ArtistTitlePair::new(
                    format!("{}, {}", first.as_str().trim(), second.as_str().trim()),
                    title.as_str().trim(),
                ),
                (Some(artist), Some(title), None) => {
                    ArtistTitlePair::new(artist.as_str().trim(), title.as_str().trim())
                }
                _ => continue,
            };
        }
    }

    ArtistTitlePair::new(uploader, normalized_title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_dash() {
        let pair = parse("Dr. Dre - Still D.R.E.", "DrDreVEVO");
        assert_eq!(pair.artist, "Dr. Dre");
        assert_eq!(pair.title, "Still D.R.E.");
    }

    #[test]
    fn test_comma_pattern_wins_over_generic_dash() {
        let pair = parse("A, B - Song", "uploader");
        assert_eq!(pair.artist, "A, B");
        assert_eq!(pair.title, "Song");
    }

    #[test]
    fn test_ampersand_collaboration() {
        let pair = parse("Daft Punk & Pharrell - Get Lucky", "uploader");
        assert_eq!(pair.artist, "Daft Punk, Pharrell");
        assert_eq!(pair.title, "Get Lucky");
    }

    #[test]
    fn test_en_dash_separator() {
        let pair = parse("Artist – Song", "uploader");
        assert_eq!(pair.artist, "Artist");
        assert_eq!(pair.title, "Song");
    }

    #[test]
    fn test_uploader_fallback() {
        let pair = parse("Some Song Without Separator", "ChannelName");
        assert_eq!(pair.artist, "ChannelName");
        assert_eq!(pair.title, "Some Song Without Separator");
    }

    #[test]
    fn test_totality_on_nonempty_input() {
        for title in ["x", "a - b", "a, b - c", "just words here"] {
            let pair = parse(title, "uploader");
            assert!(!pair.artist.is_empty());
            assert!(!pair.title.is_empty());
        }
    }
}
