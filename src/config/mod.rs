//! Configuration module for lyricsnap
//!
//! This module contains the lookup settings structure and shared request
//! constants.

mod settings;

pub use settings::LookupSettings;

/// Browser-like user agent sent with every outbound request
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Minimum extracted length accepted from a direct Musixmatch scrape
pub const MIN_SCRAPE_LEN: usize = 50;

/// Minimum extracted length accepted from AZLyrics and search-mediated scrapes
pub const MIN_PAGE_LEN: usize = 100;
