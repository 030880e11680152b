//! Musixmatch direct-URL scrape

use anyhow::Result;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{LookupSettings, MIN_SCRAPE_LEN, USER_AGENT};
use crate::providers::markup::{self, SelectorRule};
use crate::providers::LyricsProvider;
use crate::utils::slug;

const MUSIXMATCH_LYRICS_URL: &str = "https://www.musixmatch.com/lyrics";

/// Markup patterns for Musixmatch lyrics pages, tried in order
const LYRICS_RULES: &[SelectorRule] = &[
    SelectorRule {
        selector: r#"p[class*="lyrics__content"]"#,
        min_len: MIN_SCRAPE_LEN,
        exclude: &[],
    },
    SelectorRule {
        selector: r#"span[class*="lyrics__content"]"#,
        min_len: MIN_SCRAPE_LEN,
        exclude: &[],
    },
    SelectorRule {
        selector: r#"div[class*="lyrics"]"#,
        min_len: MIN_SCRAPE_LEN,
        exclude: &[],
    },
    SelectorRule {
        selector: r#"p[data-test="lyrics-text"]"#,
        min_len: MIN_SCRAPE_LEN,
        exclude: &[],
    },
    SelectorRule {
        selector: r#"div[class*="mxm-lyrics"]"#,
        min_len: MIN_SCRAPE_LEN,
        exclude: &[],
    },
    SelectorRule {
        selector: r#"span[class*="lyrics__content__ok"]"#,
        min_len: MIN_SCRAPE_LEN,
        exclude: &[],
    },
];

/// Musixmatch provider
pub struct MusixmatchProvider {
    client: Client,
    delay: Duration,
}

impl MusixmatchProvider {
    pub fn new(settings: &LookupSettings) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.scrape_timeout())
            .build()
            .unwrap_or_default();

        Self {
            client,
            delay: settings.scrape_delay(),
        }
    }

    /// Direct lyrics URL for a slugged (artist, title) pair
    pub fn lyrics_url(artist: &str, title: &str) -> String {
        format!(
            "{}/{}/{}",
            MUSIXMATCH_LYRICS_URL,
            slug::hyphenated(artist),
            slug::hyphenated(title)
        )
    }

    async fn try_lookup(&self, artist: &str, title: &str) -> Result<Option<String>> {
        let url = Self::lyrics_url(artist, title);

        tokio::time::sleep(self.delay).await;

        let response = self
            .client
            .get(&url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("musixmatch returned status {} for {}", status, url);
            return Ok(None);
        }

        let body = response.text().await?;
        Ok(extract_lyrics(&body))
    }
}

/// Extract lyrics from a Musixmatch page: selector rules first, then the
/// JSON-LD structured-data fallback.
pub fn extract_lyrics(html: &str) -> Option<String> {
    markup::extract_joined(html, LYRICS_RULES).or_else(|| json_ld_lyrics(html))
}

fn json_ld_lyrics(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;

    for script in document.select(&selector) {
        let raw = script.text().collect::<String>();
        let Ok(data) = serde_json::from_str::<serde_json::Value>(&raw) else {
            continue;
        };
        if let Some(lyrics) = data.get("lyrics").and_then(|v| v.as_str()) {
            if !lyrics.trim().is_empty() {
                return Some(lyrics.to_string());
            }
        }
    }

    None
}

#[async_trait::async_trait]
impl LyricsProvider for MusixmatchProvider {
    fn name(&self) -> &'static str {
        "musixmatch"
    }

    async fn lookup(&self, artist: &str, title: &str) -> Option<String> {
        match self.try_lookup(artist, title).await {
            Ok(found) => found,
            Err(err) => {
                warn!("musixmatch lookup failed for {} - {}: {:#}", artist, title, err);
                None
            }
        }
    }
}
