//! Collaborator seams: the social-network API and the scoring service.

mod botometer;
mod twitter;

#[cfg(test)]
pub(crate) use botometer::parse_score_body;
pub use botometer::BotometerApi;
pub use twitter::TwitterApi;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::{BotScoreError, Result};
use crate::model::ScorePayload;

/// Social API endpoints the pipeline reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
pub enum Endpoint {
    #[strum(serialize = "statuses/user_timeline")]
    UserTimeline,
    #[strum(serialize = "search/tweets")]
    SearchTweets,
}

/// Read-only access to the social network.
#[async_trait]
pub trait SocialApi: Send + Sync {
    /// Fetch `endpoint` with query `params` and return the parsed JSON body.
    async fn get(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<Value>;
}

/// The bot-detection scoring service.
#[async_trait]
pub trait ScoringApi: Send + Sync {
    /// Submit one account's payload and return the parsed JSON body.
    async fn check_account(&self, payload: &ScorePayload<'_>) -> Result<Value>;
}

/// Send a request and return the body of a successful response as text.
pub(crate) async fn read_body(request: reqwest::RequestBuilder, url: &str) -> Result<String> {
    debug!(url, "sending request");

    let response = request.send().await.map_err(|e| BotScoreError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(BotScoreError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(|e| BotScoreError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })
}
