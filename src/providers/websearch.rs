//! Search-engine-mediated lookup
//!
//! Issues a small fixed set of web queries, scans the result links for known
//! lyrics-hosting domains and dispatches each hit to that site's scraper.

use anyhow::Result;
use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{ElementRef, Html, Node, Selector};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{LookupSettings, MIN_PAGE_LEN, USER_AGENT};
use crate::providers::{azlyrics, musixmatch, LyricsProvider};

const SEARCH_URL: &str = "https://www.google.com/search";

/// Extra wait applied when the search engine rate-limits us
const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(5);

/// Allow-listed lyrics hosts recognized in search results
const LYRICS_HOSTS: &[&str] = &[
    "genius.com/lyrics",
    "azlyrics.com/lyrics",
    "musixmatch.com/lyrics",
    "lyrics.com",
    "metrolyrics.com",
];

/// Result-link shapes the search markup has been seen to use
const LINK_SELECTORS: &[&str] = &[r#"a[href*="/url?q="]"#, "h3 a", "div.yuRUbf a"];

lazy_static! {
    static ref GENIUS_CONTAINERS: Vec<Selector> = [
        r#"div[class*="Lyrics__Container"]"#,
        r#"div[data-lyrics-container="true"]"#,
        r#"div[class*="lyrics"]"#,
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect();
}

/// Scrapeable site a search hit can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Site {
    Genius,
    AzLyrics,
    Musixmatch,
}

/// Web search provider
pub struct WebSearchProvider {
    client: Client,
    search_delay: Duration,
    scrape_delay: Duration,
}

impl WebSearchProvider {
    pub fn new(settings: &LookupSettings) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.api_timeout())
            .build()
            .unwrap_or_default();

        Self {
            client,
            search_delay: settings.search_delay(),
            scrape_delay: settings.scrape_delay(),
        }
    }

    /// Search queries in priority order: site-restricted and quoted first,
    /// open queries last.
    fn queries(artist: &str, title: &str) -> [String; 4] {
        [
            format!("\"{}\" \"{}\" lyrics site:genius.com", artist, title),
            format!("\"{}\" \"{}\" lyrics", artist, title),
            format!("{} {} lyrics site:azlyrics.com", artist, title),
            format!("{} {} song lyrics", artist, title),
        ]
    }

    async fn try_lookup(&self, artist: &str, title: &str) -> Result<Option<String>> {
        for (i, query) in Self::queries(artist, title).iter().enumerate() {
            debug!("search query {}/4: {}", i + 1, query);

            let url = format!("{}?q={}", SEARCH_URL, urlencoding::encode(query));
            tokio::time::sleep(self.search_delay).await;

            let response = self
                .client
                .get(&url)
                .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
                .header("Accept-Language", "en-US,en;q=0.9")
                .send()
                .await?;

            let status = response.status();
            if status.as_u16() == 429 {
                warn!("search engine rate limiting, backing off");
                tokio::time::sleep(RATE_LIMIT_BACKOFF).await;
                continue;
            }
            if !status.is_success() {
                debug!("search returned status {} for query {}", status, query);
                continue;
            }

            let body = response.text().await?;
            for link in result_links(&body) {
                let Some(site) = classify(&link) else {
                    continue;
                };

                debug!("promising result link: {}", link);
                if let Some(lyrics) = self.scrape_site(site, &link).await {
                    if lyrics.len() > MIN_PAGE_LEN {
                        return Ok(Some(lyrics));
                    }
                }
            }
        }

        Ok(None)
    }

    async fn scrape_site(&self, site: Site, url: &str) -> Option<String> {
        tokio::time::sleep(self.scrape_delay).await;

        let response = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(err) => {
                debug!("failed to fetch {}: {:#}", url, err);
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("{} returned status {}", url, response.status());
            return None;
        }

        let body = response.text().await.ok()?;
        match site {
            Site::Genius => extract_genius_lyrics(&body),
            Site::AzLyrics => azlyrics::extract_lyrics(&body),
            Site::Musixmatch => musixmatch::extract_lyrics(&body),
        }
    }
}

/// Collect candidate result URLs from a search page, decoding the
/// `/url?q=` redirect wrappers.
fn result_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for selector_str in LINK_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };

        for anchor in document.select(&selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let Some(wrapped) = href.split("/url?q=").nth(1) else {
                continue;
            };
            let target = wrapped.split('&').next().unwrap_or(wrapped);
            if let Ok(decoded) = urlencoding::decode(target) {
                links.push(decoded.into_owned());
            }
        }
    }

    links
}

/// Match a result URL against the lyrics-host allow-list
fn classify(url: &str) -> Option<Site> {
    let lowered = url.to_lowercase();
    if !LYRICS_HOSTS.iter().any(|host| lowered.contains(host)) {
        return None;
    }

    if lowered.contains("genius.com") {
        Some(Site::Genius)
    } else if lowered.contains("azlyrics.com") {
        Some(Site::AzLyrics)
    } else if lowered.contains("musixmatch.com") {
        Some(Site::Musixmatch)
    } else {
        None
    }
}

/// Extract lyrics from a Genius page, flattening the lyric containers while
/// preserving `<br>` line breaks.
fn extract_genius_lyrics(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for selector in GENIUS_CONTAINERS.iter() {
        let mut lyrics = String::new();

        for container in document.select(selector) {
            flatten_container(container, &mut lyrics);
            lyrics.push('\n');
        }

        let trimmed = lyrics.trim();
        if trimmed.len() > MIN_PAGE_LEN / 2 {
            return Some(trimmed.to_string());
        }
    }

    None
}

fn flatten_container(container: ElementRef, out: &mut String) {
    for child in container.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                if element.name() == "br" {
                    out.push('\n');
                } else if let Some(child_ref) = ElementRef::wrap(child) {
                    flatten_container(child_ref, out);
                }
            }
            _ => {}
        }
    }
}

#[async_trait::async_trait]
impl LyricsProvider for WebSearchProvider {
    fn name(&self) -> &'static str {
        "websearch"
    }

    async fn lookup(&self, artist: &str, title: &str) -> Option<String> {
        match self.try_lookup(artist, title).await {
            Ok(found) => found,
            Err(err) => {
                warn!("web search failed for {} - {}: {:#}", artist, title, err);
                None
            }
        }
    }
}
