use tracing::{debug, instrument, warn};

use crate::api::{Endpoint, SocialApi};
use crate::error::BotScoreError;
use crate::model::{posts_from_value, AccountQuery, Timeline};
use crate::pipeline::RateLimitedInvoker;

/// Fetches an account's most recent posts.
pub struct TimelineFetcher<'a> {
    social: &'a dyn SocialApi,
    invoker: RateLimitedInvoker,
    count: u32,
}

impl<'a> TimelineFetcher<'a> {
    pub fn new(social: &'a dyn SocialApi, invoker: RateLimitedInvoker, count: u32) -> Self {
        Self {
            social,
            invoker,
            count,
        }
    }

    /// Returns `None` when the timeline is unavailable (transport error,
    /// non-success status, or a body that is not a list of posts).
    ///
    /// An empty timeline is returned as `Some`; deciding what it means is up
    /// to the caller.
    #[instrument(skip(self, query), fields(query = %query))]
    pub async fn fetch(&self, query: &AccountQuery) -> Option<Timeline> {
        let mut params = query.params();
        params.push(("count", self.count.to_string()));

        let result = self
            .invoker
            .invoke(|| self.social.get(Endpoint::UserTimeline, &params))
            .await
            .and_then(|body| {
                posts_from_value(body).map_err(|e| BotScoreError::Json {
                    url: Endpoint::UserTimeline.to_string(),
                    source: e,
                })
            });

        match result {
            Ok(timeline) => {
                debug!(
                    count = timeline.len(),
                    newest = ?timeline.first().and_then(|p| p.created_at()),
                    oldest = ?timeline.last().and_then(|p| p.created_at()),
                    "fetched timeline"
                );
                Some(timeline)
            }
            Err(e) => {
                warn!(error = %e, "timeline unavailable");
                None
            }
        }
    }
}
