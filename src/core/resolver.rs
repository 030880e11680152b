//! Lyrics resolution orchestrator
//!
//! Walks the variation list against the strategy chain sequentially,
//! short-circuiting on the first hit. The resolver never fails: every path
//! produces a well-formed [`LyricsOutcome`].

use thiserror::Error;
use tracing::{debug, info};

use crate::config::LookupSettings;
use crate::core::normalize::normalize;
use crate::core::parse::parse;
use crate::core::variations::generate;
use crate::metadata::{MetadataProvider, OEmbedMetadata};
use crate::models::{LyricsOutcome, OutcomeMetadata};
use crate::providers::{self, LyricsProvider};

/// Failures surfaced to the caller as an error outcome. Metadata and
/// strategy failures are absorbed before they reach this level.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Invalid video URL")]
    InvalidInput,
    #[error("No lyrics found for this track")]
    Exhausted,
}

/// Orchestrates one extraction: metadata, normalization, variations, then
/// the strategy chain over each variation in order.
pub struct LyricsResolver {
    metadata: Box<dyn MetadataProvider>,
    providers: Vec<Box<dyn LyricsProvider>>,
}

impl LyricsResolver {
    pub fn new(
        metadata: Box<dyn MetadataProvider>,
        providers: Vec<Box<dyn LyricsProvider>>,
    ) -> Self {
        Self {
            metadata,
            providers,
        }
    }

    /// Resolver wired with the default metadata provider and strategy chain
    pub fn from_settings(settings: &LookupSettings) -> Self {
        Self::new(
            Box::new(OEmbedMetadata::new(settings)),
            providers::default_chain(settings),
        )
    }

    /// Resolve a video URL into lyrics. Always returns an outcome; invalid
    /// input is rejected before any network activity.
    pub async fn resolve(&self, video_url: &str) -> LyricsOutcome {
        if !is_supported_url(video_url) {
            return LyricsOutcome::error(
                ExtractError::InvalidInput.to_string(),
                OutcomeMetadata::default(),
            );
        }

        let metadata = self.metadata.fetch(video_url).await;
        let normalized = normalize(&metadata.title);
        let pair = parse(&normalized, &metadata.uploader);
        info!("resolving lyrics for {} - {}", pair.artist, pair.title);

        let outcome_metadata = OutcomeMetadata {
            title: pair.title.clone(),
            artist: pair.artist.clone(),
            thumbnail: metadata.thumbnail.clone(),
        };

        let search_title = strip_artist_echo(&pair.title, &pair.artist);
        let variations = generate(&search_title, &pair.artist);

        for (i, variation) in variations.iter().enumerate() {
            debug!(
                "variation {}/{}: {} - {}",
                i + 1,
                variations.len(),
                variation.artist,
                variation.title
            );

            for provider in &self.providers {
                if let Some(lyrics) = provider.lookup(&variation.artist, &variation.title).await {
                    info!(
                        "found lyrics via {} for {} - {}",
                        provider.name(),
                        variation.artist,
                        variation.title
                    );
                    return LyricsOutcome::success(lyrics, outcome_metadata);
                }
            }
        }

        LyricsOutcome::error(ExtractError::Exhausted.to_string(), outcome_metadata)
    }
}

/// Precondition checked before any network activity: the URL must carry a
/// recognized video-host marker.
pub fn is_supported_url(url: &str) -> bool {
    !url.is_empty() && (url.contains("youtube.com") || url.contains("youtu.be"))
}

/// Drop an echo of the artist name from the title so searches don't query
/// "Artist - Artist Title". Only exact-case occurrences are removed; the
/// check is case-insensitive to match how often uploaders restyle names.
fn strip_artist_echo(title: &str, artist: &str) -> String {
    if artist.is_empty() || !title.to_lowercase().contains(&artist.to_lowercase()) {
        return title.to_string();
    }

    title
        .replace(artist, "")
        .trim_matches(|c| c == ' ' || c == '-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VideoMetadata;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockMetadata {
        metadata: VideoMetadata,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl MetadataProvider for MockMetadata {
        async fn fetch(&self, _video_url: &str) -> VideoMetadata {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.metadata.clone()
        }
    }

    struct MockProvider {
        name: &'static str,
        result: Option<String>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl LyricsProvider for MockProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn lookup(&self, _artist: &str, _title: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn dre_metadata() -> VideoMetadata {
        VideoMetadata {
            title: "Dr. Dre - Still D.R.E. (Official Video)".to_string(),
            uploader: "DrDreVEVO".to_string(),
            thumbnail: Some("https://i.ytimg.com/vi/abc/hq.jpg".to_string()),
        }
    }

    fn resolver_with(
        metadata: VideoMetadata,
        results: Vec<Option<String>>,
    ) -> (LyricsResolver, Arc<AtomicUsize>, Vec<Arc<AtomicUsize>>) {
        let metadata_calls = Arc::new(AtomicUsize::new(0));
        let mock_metadata = MockMetadata {
            metadata,
            calls: metadata_calls.clone(),
        };

        let mut provider_calls = Vec::new();
        let providers: Vec<Box<dyn LyricsProvider>> = results
            .into_iter()
            .map(|result| {
                let calls = Arc::new(AtomicUsize::new(0));
                provider_calls.push(calls.clone());
                Box::new(MockProvider {
                    name: "mock",
                    result,
                    calls,
                }) as Box<dyn LyricsProvider>
            })
            .collect();

        (
            LyricsResolver::new(Box::new(mock_metadata), providers),
            metadata_calls,
            provider_calls,
        )
    }

    #[tokio::test]
    async fn test_first_hit_short_circuits_everything() {
        let (resolver, _, calls) = resolver_with(
            dre_metadata(),
            vec![
                Some("Nowadays everybody wanna talk...".to_string()),
                None,
                None,
                None,
            ],
        );

        let outcome = resolver
            .resolve("https://www.youtube.com/watch?v=_CL6n0FJZpk")
            .await;

        assert!(outcome.is_success());
        assert_eq!(calls[0].load(Ordering::SeqCst), 1);
        for later in &calls[1..] {
            assert_eq!(later.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_end_to_end_metadata_pipeline() {
        let (resolver, _, _) = resolver_with(
            dre_metadata(),
            vec![Some("lyrics text".to_string())],
        );

        let outcome = resolver
            .resolve("https://youtu.be/_CL6n0FJZpk")
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.lyrics, "lyrics text");
        assert_eq!(outcome.metadata.title, "Still D.R.E.");
        assert_eq!(outcome.metadata.artist, "Dr. Dre");
        assert_eq!(
            outcome.metadata.thumbnail.as_deref(),
            Some("https://i.ytimg.com/vi/abc/hq.jpg")
        );
    }

    #[tokio::test]
    async fn test_invalid_url_makes_no_calls() {
        let (resolver, metadata_calls, provider_calls) =
            resolver_with(dre_metadata(), vec![Some("never returned".to_string())]);

        let outcome = resolver.resolve("not-a-url").await;

        assert!(!outcome.is_success());
        assert!(outcome.lyrics.contains("Invalid video URL"));
        assert_eq!(outcome.metadata, OutcomeMetadata::default());
        assert_eq!(metadata_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider_calls[0].load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_exhaustion_keeps_parsed_metadata() {
        let (resolver, _, provider_calls) =
            resolver_with(dre_metadata(), vec![None, None, None, None]);

        let outcome = resolver
            .resolve("https://www.youtube.com/watch?v=_CL6n0FJZpk")
            .await;

        assert!(!outcome.is_success());
        assert!(outcome.lyrics.contains("No lyrics found"));
        // metadata reflects the parsed values, not the sentinels
        assert_eq!(outcome.metadata.title, "Still D.R.E.");
        assert_eq!(outcome.metadata.artist, "Dr. Dre");
        // "Still D.R.E." yields a single variation, so each strategy ran once
        for calls in &provider_calls {
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_later_variation_reached_after_chain_misses() {
        // "A, B" fans out into collaboration variations; the single mock
        // strategy is consulted once per variation
        let metadata = VideoMetadata {
            title: "A, B - Song".to_string(),
            uploader: "uploader".to_string(),
            thumbnail: None,
        };
        let (resolver, _, provider_calls) = resolver_with(metadata, vec![None]);

        let outcome = resolver
            .resolve("https://www.youtube.com/watch?v=x")
            .await;

        assert!(!outcome.is_success());
        assert_eq!(provider_calls[0].load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_is_supported_url() {
        assert!(is_supported_url("https://www.youtube.com/watch?v=abc"));
        assert!(is_supported_url("https://youtu.be/abc"));
        assert!(!is_supported_url("https://vimeo.com/123"));
        assert!(!is_supported_url(""));
    }

    #[test]
    fn test_strip_artist_echo() {
        assert_eq!(strip_artist_echo("Dr. Dre Still D.R.E.", "Dr. Dre"), "Still D.R.E.");
        assert_eq!(strip_artist_echo("Still D.R.E.", "Dr. Dre"), "Still D.R.E.");
        assert_eq!(strip_artist_echo("Song", ""), "Song");
    }
}
