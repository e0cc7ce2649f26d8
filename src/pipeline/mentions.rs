use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::api::{Endpoint, SocialApi};
use crate::error::BotScoreError;
use crate::model::{posts_from_value, Author, MentionSet};
use crate::pipeline::RateLimitedInvoker;

/// Fetches recent posts mentioning an account.
pub struct MentionsFetcher<'a> {
    social: &'a dyn SocialApi,
    invoker: RateLimitedInvoker,
    count: u32,
}

impl<'a> MentionsFetcher<'a> {
    pub fn new(social: &'a dyn SocialApi, invoker: RateLimitedInvoker, count: u32) -> Self {
        Self {
            social,
            invoker,
            count,
        }
    }

    /// Search for `@handle`. Any failure yields an empty set: zero mentions
    /// is a valid outcome and must not stop the pipeline.
    #[instrument(skip(self, author), fields(handle = %author.handle))]
    pub async fn fetch(&self, author: &Author) -> MentionSet {
        let params = [
            ("q", format!("@{}", author.handle)),
            ("count", self.count.to_string()),
        ];

        let result = self
            .invoker
            .invoke(|| self.social.get(Endpoint::SearchTweets, &params))
            .await
            .and_then(parse_statuses);

        match result {
            Ok(mentions) => {
                debug!(count = mentions.len(), "fetched mentions");
                mentions
            }
            Err(e) => {
                warn!(error = %e, "mentions unavailable, continuing without");
                MentionSet::new()
            }
        }
    }
}

/// Search responses wrap their results as `{ "statuses": [...] }`.
fn parse_statuses(mut body: Value) -> crate::error::Result<MentionSet> {
    let statuses = body
        .get_mut("statuses")
        .map(Value::take)
        .unwrap_or(Value::Null);
    posts_from_value(statuses).map_err(|e| BotScoreError::Json {
        url: Endpoint::SearchTweets.to_string(),
        source: e,
    })
}
