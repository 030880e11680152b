//! URL slug helpers for direct lyrics-page lookups
//!
//! Lyrics sites address songs by slugged artist/title path segments. Slugs
//! are ASCII-folded first so accented names resolve to the same pages a
//! browser would reach.

use deunicode::deunicode;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_ALNUM_OR_SPACE: Regex = Regex::new(r"[^a-zA-Z0-9\s]").unwrap();
}

/// Hyphenated slug: punctuation stripped, lowercased, spaces become hyphens.
///
/// Matches the Musixmatch path segment format.
pub fn hyphenated(text: &str) -> String {
    let ascii = deunicode(text);
    NON_ALNUM_OR_SPACE
        .replace_all(&ascii, "")
        .to_lowercase()
        .replace(' ', "-")
}

/// Compact slug: a leading "the " is dropped, everything non-alphanumeric
/// removed, lowercased.
///
/// Matches the AZLyrics path segment format.
pub fn compact(text: &str) -> String {
    let ascii = deunicode(text).to_lowercase();
    let trimmed = ascii.strip_prefix("the ").unwrap_or(&ascii);
    trimmed.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}
