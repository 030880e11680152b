//! Lookup strategy chain for lyricsnap
//!
//! Every external lyrics source implements [`LyricsProvider`]: a uniform
//! found/not-found contract over an (artist, title) pair. Transport and
//! parsing failures stay inside a provider — they are logged and mapped to
//! `None`, never propagated to the orchestrator.

pub mod azlyrics;
pub mod lyrics_ovh;
pub mod markup;
pub mod musixmatch;
pub mod websearch;

pub use azlyrics::AzLyricsProvider;
pub use lyrics_ovh::LyricsOvhProvider;
pub use musixmatch::MusixmatchProvider;
pub use websearch::WebSearchProvider;

use async_trait::async_trait;

use crate::config::LookupSettings;

/// One external lookup strategy
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Look up lyrics for an exact (artist, title) pair. `None` covers both
    /// "not found" and any internal failure.
    async fn lookup(&self, artist: &str, title: &str) -> Option<String>;
}

/// The default strategy chain in fixed trial order: free API first, then
/// the direct-URL scrapes, then the search-engine-mediated lookup.
pub fn default_chain(settings: &LookupSettings) -> Vec<Box<dyn LyricsProvider>> {
    vec![
        Box::new(LyricsOvhProvider::new(settings)),
        Box::new(MusixmatchProvider::new(settings)),
        Box::new(AzLyricsProvider::new(settings)),
        Box::new(WebSearchProvider::new(settings)),
    ]
}
