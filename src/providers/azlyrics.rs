//! AZLyrics direct-URL scrape

use anyhow::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{LookupSettings, MIN_PAGE_LEN, USER_AGENT};
use crate::providers::markup::{self, Exclusion, SelectorRule};
use crate::providers::LyricsProvider;
use crate::utils::slug;

const AZLYRICS_URL: &str = "https://www.azlyrics.com/lyrics";

/// Markup patterns for AZLyrics pages. The lyrics live in the one div with
/// neither class nor id; lookalike containers are filtered out by the
/// boilerplate exclusions.
const PAGE_RULES: &[SelectorRule] = &[
    SelectorRule {
        selector: "div:not([class]):not([id])",
        min_len: MIN_PAGE_LEN,
        exclude: BOILERPLATE,
    },
    SelectorRule {
        selector: r#"div[class=""]"#,
        min_len: MIN_PAGE_LEN,
        exclude: BOILERPLATE,
    },
    SelectorRule {
        selector: "div.col-xs-12.col-lg-8.text-center div:not([class]):not([id])",
        min_len: MIN_PAGE_LEN,
        exclude: BOILERPLATE,
    },
    SelectorRule {
        selector: "div.ringtone + div:not([class]):not([id])",
        min_len: MIN_PAGE_LEN,
        exclude: BOILERPLATE,
    },
];

const BOILERPLATE: &[Exclusion] = &[
    Exclusion::Anywhere("Submit Corrections"),
    Exclusion::WithinPrefix("Thanks to", 50),
    Exclusion::WithinPrefix("Sorry", 20),
];

/// AZLyrics provider
pub struct AzLyricsProvider {
    client: Client,
    delay: Duration,
}

impl AzLyricsProvider {
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

    /// Candidate direct URLs, tried in order: full artist slug, first artist
    /// only for collaborations, first title word only for multi-word titles.
    pub fn candidate_urls(artist: &str, title: &str) -> Vec<String> {
        let artist_slug = slug::compact(artist);
        let title_slug = slug::compact(title);

        let mut urls = vec![format!("{}/{}/{}.html", AZLYRICS_URL, artist_slug, title_slug)];

        if artist.contains(',') {
            let first_artist = artist.split(',').next().unwrap_or(artist);
            urls.push(format!(
                "{}/{}/{}.html",
                AZLYRICS_URL,
                slug::compact(first_artist),
                title_slug
            ));
        }

        let mut title_words = title.split_whitespace();
        if let (Some(first_word), Some(_)) = (title_words.next(), title_words.next()) {
            urls.push(format!(
                "{}/{}/{}.html",
                AZLYRICS_URL,
                artist_slug,
                slug::compact(first_word)
            ));
        }

        urls
    }

    async fn try_lookup(&self, artist: &str, title: &str) -> Result<Option<String>> {
        for url in Self::candidate_urls(artist, title) {
            debug!("trying azlyrics url {}", url);
            tokio::time::sleep(self.delay).await;

            let response = self
                .client
                .get(&url)
                .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
                .header("Accept-Language", "en-US,en;q=0.9")
                .header("Referer", "https://www.google.com/")
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                debug!("azlyrics returned status {} for {}", status, url);
                continue;
            }

            let body = response.text().await?;
            if let Some(lyrics) = extract_lyrics(&body) {
                return Ok(Some(lyrics));
            }
        }

        Ok(None)
    }
}

/// Extract lyrics from an AZLyrics page
pub fn extract_lyrics(html: &str) -> Option<String> {
    markup::extract_per_element(html, PAGE_RULES)
}

#[async_trait::async_trait]
impl LyricsProvider for AzLyricsProvider {
    fn name(&self) -> &'static str {
        "azlyrics"
    }

    async fn lookup(&self, artist: &str, title: &str) -> Option<String> {
        match self.try_lookup(artist, title).await {
            Ok(found) => found,
            Err(err) => {
                warn!("azlyrics lookup failed for {} - {}: {:#}", artist, title, err);
                None
            }
        }
    }
}
