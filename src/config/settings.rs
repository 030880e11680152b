//! Lookup settings for lyricsnap
//!
//! Politeness delays and HTTP timeouts are configuration data rather than
//! constants inside the strategies, so tests can run with zero delays and
//! operators can tune pacing per deployment.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunable knobs for the outbound lookup strategies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LookupSettings {
    /// Timeout for the free lyrics API, in seconds
    pub api_timeout_secs: u64,

    /// Timeout for lyrics-site and search-engine fetches, in seconds
    pub scrape_timeout_secs: u64,

    /// Pre-request delay for the free lyrics API, in milliseconds
    pub api_delay_ms: u64,

    /// Pre-request delay for direct lyrics-site scrapes, in milliseconds
    pub scrape_delay_ms: u64,

    /// Pre-request delay for search-engine queries, in milliseconds
    pub search_delay_ms: u64,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            api_timeout_secs: 15,
            scrape_timeout_secs: 20,
            api_delay_ms: 1000,
            scrape_delay_ms: 3000,
            search_delay_ms: 2000,
        }
    }
}

impl LookupSettings {
    /// Load settings from an optional JSON file, then apply `LYRICSNAP_*`
    /// env overrides on top
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut settings = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("failed to read settings file {:?}", p))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("failed to parse settings file {:?}", p))?
            }
            None => Self::default(),
        };

        settings.apply_env();
        Ok(settings)
    }

    fn apply_env(&mut self) {
        if let Some(v) = env_u64("LYRICSNAP_API_TIMEOUT_SECS") {
            self.api_timeout_secs = v;
        }
        if let Some(v) = env_u64("LYRICSNAP_SCRAPE_TIMEOUT_SECS") {
            self.scrape_timeout_secs = v;
        }
        if let Some(v) = env_u64("LYRICSNAP_API_DELAY_MS") {
            self.api_delay_ms = v;
        }
        if let Some(v) = env_u64("LYRICSNAP_SCRAPE_DELAY_MS") {
            self.scrape_delay_ms = v;
        }
        if let Some(v) = env_u64("LYRICSNAP_SEARCH_DELAY_MS") {
            self.search_delay_ms = v;
        }
    }

    /// Settings with all politeness delays removed, for tests
    pub fn without_delays() -> Self {
        Self {
            api_delay_ms: 0,
            scrape_delay_ms: 0,
            search_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn scrape_timeout(&self) -> Duration {
        Duration::from_secs(self.scrape_timeout_secs)
    }

    pub fn api_delay(&self) -> Duration {
        Duration::from_millis(self.api_delay_ms)
    }

    pub fn scrape_delay(&self) -> Duration {
        Duration::from_millis(self.scrape_delay_ms)
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_upstream_pacing() {
        let settings = LookupSettings::default();
        assert_eq!(settings.api_timeout_secs, 15);
        assert_eq!(settings.scrape_timeout_secs, 20);
        assert_eq!(settings.api_delay_ms, 1000);
        assert_eq!(settings.scrape_delay_ms, 3000);
        assert_eq!(settings.search_delay_ms, 2000);
    }

    #[test]
    fn test_settings_parse_from_json() {
        let settings: LookupSettings =
            serde_json::from_str(r#"{"apiDelayMs": 0, "scrapeTimeoutSecs": 5}"#).unwrap();
        assert_eq!(settings.api_delay_ms, 0);
        assert_eq!(settings.scrape_timeout_secs, 5);
        // unspecified fields keep their defaults
        assert_eq!(settings.search_delay_ms, 2000);
    }

    #[test]
    fn test_without_delays() {
        let settings = LookupSettings::without_delays();
        assert_eq!(settings.api_delay(), Duration::ZERO);
        assert_eq!(settings.scrape_delay(), Duration::ZERO);
        assert_eq!(settings.search_delay(), Duration::ZERO);
        // timeouts keep their defaults
        assert_eq!(settings.scrape_timeout_secs, 20);
    }
}
