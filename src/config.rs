use std::time::Duration;

use serde::Deserialize;

use crate::error::{BotScoreError, Result};

/// Tunables for a [`BotScoreClient`](crate::BotScoreClient).
///
/// Immutable once the client is built. Every field has a default, so a
/// partial TOML/JSON document deserializes into a usable config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BotScoreConfig {
    /// Delay before every outbound request, in milliseconds.
    pub rate_limit_ms: u64,
    /// Emit per-account progress lines.
    pub log_progress: bool,
    pub include_author: bool,
    pub include_timeline: bool,
    pub include_mentions: bool,
    /// Upper bound for a single request. `None` disables the bound.
    pub request_timeout_secs: Option<u64>,
    /// Number of recent posts requested per timeline.
    pub timeline_count: u32,
    /// Number of mentions requested per search.
    pub mentions_count: u32,
}

impl Default for BotScoreConfig {
    fn default() -> Self {
        Self {
            rate_limit_ms: 0,
            log_progress: true,
            include_author: true,
            include_timeline: true,
            include_mentions: false,
            request_timeout_secs: Some(30),
            timeline_count: 200,
            mentions_count: 100,
        }
    }
}

impl BotScoreConfig {
    pub fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// API credentials for the social network and the scoring service.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    /// App-only bearer token for the Twitter API.
    pub twitter_bearer_token: String,
    /// RapidAPI key for the Botometer endpoint.
    pub rapidapi_key: String,
}

impl Credentials {
    pub const TWITTER_BEARER_TOKEN_VAR: &'static str = "TWITTER_BEARER_TOKEN";
    pub const RAPIDAPI_KEY_VAR: &'static str = "RAPIDAPI_KEY";

    pub fn new(twitter_bearer_token: impl Into<String>, rapidapi_key: impl Into<String>) -> Self {
        Self {
            twitter_bearer_token: twitter_bearer_token.into(),
            rapidapi_key: rapidapi_key.into(),
        }
    }

    /// Read credentials from `TWITTER_BEARER_TOKEN` and `RAPIDAPI_KEY`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            twitter_bearer_token: read_env(Self::TWITTER_BEARER_TOKEN_VAR)?,
            rapidapi_key: read_env(Self::RAPIDAPI_KEY_VAR)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("twitter_bearer_token", &"<redacted>")
            .field("rapidapi_key", &"<redacted>")
            .finish()
    }
}

fn read_env(var: &'static str) -> Result<String> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(BotScoreError::MissingEnv { var })
}
