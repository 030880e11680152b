//! Data models for lyricsnap
//!
//! This module contains the wire types for the extract endpoint and the
//! domain types shared by the resolver core.

use serde::{Deserialize, Serialize};

/// Request body for the extract endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractRequest {
    pub youtube_url: String,
}

/// Outcome status of an extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// Metadata attached to an extraction outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeMetadata {
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// The externally visible result of one extraction request.
///
/// Constructed exactly once per request and immutable afterwards. Failures
/// carry an explanatory message in `lyrics` and best-effort metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricsOutcome {
    pub status: OutcomeStatus,
    pub lyrics: String,
    pub metadata: OutcomeMetadata,
}

impl LyricsOutcome {
    pub fn success(lyrics: String, metadata: OutcomeMetadata) -> Self {
        Self {
            status: OutcomeStatus::Success,
            lyrics,
            metadata,
        }
    }

    pub fn error(message: impl Into<String>, metadata: OutcomeMetadata) -> Self {
        Self {
            status: OutcomeStatus::Error,
            lyrics: message.into(),
            metadata,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Video metadata returned by the metadata collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub uploader: String,
    pub thumbnail: Option<String>,
}

impl VideoMetadata {
    /// Sentinel metadata used when the collaborator fails
    pub fn unknown() -> Self {
        Self {
            title: "Unknown Title".to_string(),
            uploader: "Unknown Artist".to_string(),
            thumbnail: None,
        }
    }
}

/// An (artist, title) guess tried against the lookup strategies.
///
/// Both fields are non-empty once the pair is accepted into a variation
/// list, and the component order is never swapped after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistTitlePair {
    pub artist: String,
    pub title: String,
}

impl ArtistTitlePair {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// Case-insensitive key used to deduplicate variation lists
    pub fn dedup_key(&self) -> String {
        format!(
            "{} - {}",
            self.artist.to_lowercase(),
            self.title.to_lowercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let outcome = LyricsOutcome::success(
            "la la la".to_string(),
            OutcomeMetadata {
                title: "Song".to_string(),
                artist: "Artist".to_string(),
                thumbnail: None,
            },
        );

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["lyrics"], "la la la");
        assert_eq!(json["metadata"]["title"], "Song");
        // absent thumbnail is omitted from the payload
        assert!(json["metadata"].get("thumbnail").is_none());
    }

    #[test]
    fn test_error_outcome() {
        let outcome = LyricsOutcome::error("Invalid video URL", OutcomeMetadata::default());
        assert!(!outcome.is_success());
        assert_eq!(serde_json::to_value(&outcome).unwrap()["status"], "error");
    }

    #[test]
    fn test_dedup_key_is_case_insensitive() {
        let a = ArtistTitlePair::new("Dr. Dre", "Still D.R.E.");
        let b = ArtistTitlePair::new("dr. dre", "still d.r.e.");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }
}
