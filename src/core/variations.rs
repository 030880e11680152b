//! Search variation generation
//!
//! Exact (artist, title) pairs often miss against free-text lyrics sources.
//! This module widens the search space with alternative guesses for
//! collaborations, featured artists and decorated titles. The list is
//! ordered (first-found wins), deduplicated case-insensitively and capped.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::models::ArtistTitlePair;

/// Maximum number of variations tried per request
pub const MAX_VARIATIONS: usize = 8;

lazy_static! {
    static ref FEAT_SPLIT: Regex = Regex::new(r"(?i)\s+(?:feat\.?|ft\.?|featuring)\s+").unwrap();
    static ref BRACKET_SPANS: Regex = Regex::new(r"\[.*?\]|\(.*?\)").unwrap();
    static ref TITLE_STOPWORDS: Regex =
        Regex::new(r"(?i)\b(?:remix|mix|version|edit|remaster|remastered|cover)\b").unwrap();
    static ref EXTRA_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Generate the ordered variation list for a base (artist, title) pair.
///
/// The base pair always comes first. Later rules are applied independently
/// and concatenated; duplicates are dropped case-insensitively keeping the
/// first occurrence, and the list is truncated to [`MAX_VARIATIONS`].
pub fn generate(title: &str, artist: &str) -> Vec<ArtistTitlePair> {
    let mut candidates = vec![ArtistTitlePair::new(artist, title)];

    // Collaborations joined by commas: first artist alone, then "A feat B"
    if artist.contains(',') {
        let artists: Vec<&str> = artist.split(',').map(str::trim).collect();
        if let Some(first) = artists.first() {
            candidates.push(ArtistTitlePair::new(*first, title));
            if artists.len() > 1 {
                candidates.push(ArtistTitlePair::new(
                    format!("{} feat {}", artists[0], artists[1]),
                    title,
                ));
            }
        }
    }

    // Featured-artist markers inside the artist field: keep the main portion
    let artist_lower = artist.to_lowercase();
    if artist_lower.contains("feat") || artist_lower.contains("ft.") {
        if let Some(main_artist) = FEAT_SPLIT.split(artist).next() {
            candidates.push(ArtistTitlePair::new(main_artist.trim(), title));
        }
    }

    // Title without bracketed/parenthesized spans
    let simple_title = collapse(&BRACKET_SPANS.replace_all(title, ""));
    if simple_title != title && !simple_title.is_empty() {
        candidates.push(ArtistTitlePair::new(artist, simple_title));
    }

    // Title without remix/version/cover stopwords
    let plain_title = collapse(&TITLE_STOPWORDS.replace_all(title, ""));
    if plain_title != title && !plain_title.is_empty() {
        candidates.push(ArtistTitlePair::new(artist, plain_title));
    }

    // Long titles truncated to their first three words
    let words: Vec<&str> = title.split_whitespace().collect();
    if words.len() > 3 {
        candidates.push(ArtistTitlePair::new(artist, words[..3].join(" ")));
    }

    dedup_and_cap(candidates)
}

fn collapse(text: &str) -> String {
    EXTRA_WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Order-preserving case-insensitive dedup, dropping pairs with an empty
/// field, truncated to [`MAX_VARIATIONS`].
fn dedup_and_cap(candidates: Vec<ArtistTitlePair>) -> Vec<ArtistTitlePair> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|pair| !pair.artist.is_empty() && !pair.title.is_empty())
        .filter(|pair| seen.insert(pair.dedup_key()))
        .take(MAX_VARIATIONS)
        .collect()
}
