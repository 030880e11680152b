//! Video title normalization
//!
//! Raw video titles carry decorative markers ("(Official Video)", "[Lyrics]",
//! credit tags) that poison lyrics lookups. Normalization removes a fixed
//! list of known tags first, then strips any remaining bracketed spans,
//! quotes and extra whitespace.

use lazy_static::lazy_static;
use regex::Regex;

/// Decorative tags removed from titles, tried in order. Tag removal runs
/// before generic bracket stripping so a tag like "(Remix)" converges to the
/// same form whichever pass catches it.
const TITLE_TAGS: &[&str] = &[
    "(Official Music Video)",
    "(Official Video)",
    "(Music Video)",
    "(Official)",
    "(Lyrics)",
    "[Official Video]",
    "[Music Video]",
    "[Official]",
    "[Lyrics]",
    "| Official Video",
    "- Official Video",
    "(Clip officiel)",
    "[Clip officiel]",
    "- Clip officiel",
    "prod by",
    "prod. by",
    "produced by",
    "ft.",
    "feat.",
    "featuring",
    "[One Take Video]",
    "(One Take Video)",
    "[One Take]",
    "(One Take)",
    "Remix",
    "Mix",
    "Cover",
    "Version",
];

lazy_static! {
    static ref TAG_PATTERNS: Vec<Regex> = TITLE_TAGS
        .iter()
        .map(|tag| Regex::new(&format!("(?i){}", regex::escape(tag))).unwrap())
        .collect();

    // Remaining bracketed and parenthesized spans, removed wholesale
    static ref BRACKET_SPAN: Regex = Regex::new(r"\[.*?\]").unwrap();
    static ref PAREN_SPAN: Regex = Regex::new(r"\(.*?\)").unwrap();

    static ref QUOTE_CHARS: Regex = Regex::new(r#"["']"#).unwrap();
    static ref EXTRA_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize a raw video title for lyrics lookup.
///
/// Total function; always returns a string, possibly empty.
pub fn normalize(raw_title: &str) -> String {
    let mut cleaned = raw_title.to_string();

    for pattern in TAG_PATTERNS.iter() {
        cleaned = pattern.replace_all(&cleaned, "").trim().to_string();
    }

    cleaned = QUOTE_CHARS.replace_all(&cleaned, "").to_string();
    cleaned = BRACKET_SPAN.replace_all(&cleaned, "").to_string();
    cleaned = PAREN_SPAN.replace_all(&cleaned, "").to_string();

    EXTRA_WHITESPACE
        .replace_all(&cleaned, " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_known_tags() {
        assert_eq!(
            normalize("Dr. Dre - Still D.R.E. (Official Video)"),
            "Dr. Dre - Still D.R.E."
        );
        assert_eq!(normalize("Song [Lyrics]"), "Song");
        assert_eq!(normalize("Song | Official Video"), "Song");
    }

    #[test]
    fn test_tag_matching_is_case_insensitive() {
        assert_eq!(normalize("Song (OFFICIAL VIDEO)"), "Song");
        assert_eq!(normalize("Song (official video)"), "Song");
    }

    #[test]
    fn test_strips_unlisted_bracket_spans() {
        assert_eq!(normalize("Song [4K Upgrade]"), "Song");
        assert_eq!(normalize("Song (Visualizer)"), "Song");
    }

    #[test]
    fn test_strips_quotes_and_collapses_whitespace() {
        assert_eq!(normalize("Artist  -  \"Song\"  "), "Artist - Song");
    }

    #[test]
    fn test_remix_removed_by_either_pass() {
        // caught by the literal tag list
        assert_eq!(normalize("Song Remix"), "Song");
        // caught by generic paren stripping after the literal pass
        assert_eq!(normalize("Song (Club Remix)"), "Song");
    }

    #[test]
    fn test_empty_and_tag_only_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("(Official Video)"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Dr. Dre - Still D.R.E. (Official Video)",
            "Artist, Friend - Song [Official]",
            "A & B - Tune (Lyrics)",
            "Some \"Quoted\" Title",
            "Plain Title",
            "Song (Club Remix)",
            "",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
