//! Free lyrics API lookup (lyrics.ovh)

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{LookupSettings, USER_AGENT};
use crate::providers::LyricsProvider;

const LYRICS_OVH_URL: &str = "https://api.lyrics.ovh/v1";

/// Placeholder prefix the API returns for unknown tracks
const PLACEHOLDER_PREFIX: &str = "Pardon";

#[derive(Debug, Deserialize)]
struct OvhResponse {
    #[serde(default)]
    lyrics: String,
}

/// lyrics.ovh provider
pub struct LyricsOvhProvider {
    client: Client,
    delay: Duration,
}

impl LyricsOvhProvider {
    pub fn new(settings: &LookupSettings) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.api_timeout())
            .build()
            .unwrap_or_default();

        Self {
            client,
            delay: settings.api_delay(),
        }
    }

    async fn try_lookup(&self, artist: &str, title: &str) -> Result<Option<String>> {
        let url = format!(
            "{}/{}/{}",
            LYRICS_OVH_URL,
            urlencoding::encode(artist),
            urlencoding::encode(title)
        );

        tokio::time::sleep(self.delay).await;

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json, text/plain, */*")
            .header("Accept-Language", "en-US,en;q=0.9,fr;q=0.8")
            .header("Referer", "https://lyrics.ovh/")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("lyrics.ovh returned status {} for {} - {}", status, artist, title);
            return Ok(None);
        }

        let payload: OvhResponse = response.json().await?;
        Ok(accept_body(&payload.lyrics))
    }
}

/// Accept an API body only when it is non-empty and not the apology
/// placeholder served for unknown tracks.
fn accept_body(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with(PLACEHOLDER_PREFIX) {
        return None;
    }
    Some(trimmed.to_string())
}

#[async_trait::async_trait]
impl LyricsProvider for LyricsOvhProvider {
    fn name(&self) -> &'static str {
        "lyrics.ovh"
    }

    async fn lookup(&self, artist: &str, title: &str) -> Option<String> {
        match self.try_lookup(artist, title).await {
            Ok(found) => found,
            Err(err) => {
                warn!("lyrics.ovh lookup failed for {} - {}: {:#}", artist, title, err);
                None
            }
        }
    }
}
