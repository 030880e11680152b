//! Video metadata lookup
//!
//! Resolves a video URL into {title, uploader, thumbnail} through the
//! YouTube oEmbed endpoint. Collaborator failures never propagate: the
//! provider degrades to sentinel metadata so extraction can continue.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::config::{LookupSettings, USER_AGENT};
use crate::models::VideoMetadata;

const OEMBED_URL: &str = "https://www.youtube.com/oembed";

/// Capability for fetching video metadata
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch(&self, video_url: &str) -> VideoMetadata;
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

impl From<OEmbedResponse> for VideoMetadata {
    fn from(payload: OEmbedResponse) -> Self {
        let sentinel = VideoMetadata::unknown();
        Self {
            title: if payload.title.trim().is_empty() {
                sentinel.title
            } else {
                payload.title
            },
            uploader: if payload.author_name.trim().is_empty() {
                sentinel.uploader
            } else {
                payload.author_name
            },
            thumbnail: payload.thumbnail_url.filter(|t| !t.is_empty()),
        }
    }
}

/// oEmbed-backed metadata provider
pub struct OEmbedMetadata {
    client: Client,
}

impl OEmbedMetadata {
    pub fn new(settings: &LookupSettings) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.api_timeout())
            .build()
            .unwrap_or_default();

        Self { client }
    }

    async fn try_fetch(&self, video_url: &str) -> anyhow::Result<VideoMetadata> {
        let url = format!(
            "{}?url={}&format=json",
            OEMBED_URL,
            urlencoding::encode(video_url)
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("oembed request failed with status {}", response.status());
        }

        let payload: OEmbedResponse = response.json().await?;
        Ok(payload.into())
    }
}

#[async_trait]
impl MetadataProvider for OEmbedMetadata {
    async fn fetch(&self, video_url: &str) -> VideoMetadata {
        match self.try_fetch(video_url).await {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!("metadata lookup failed for {}: {:#}", video_url, err);
                VideoMetadata::unknown()
            }
        }
    }
}
