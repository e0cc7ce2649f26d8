use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::api::ScoringApi;
use crate::model::{ScorePayload, ScoreResult};
use crate::pipeline::RateLimitedInvoker;

/// Submits an account's payload to the scoring service.
pub struct ScoreRequester<'a> {
    scoring: &'a dyn ScoringApi,
    invoker: RateLimitedInvoker,
}

impl<'a> ScoreRequester<'a> {
    pub fn new(scoring: &'a dyn ScoringApi, invoker: RateLimitedInvoker) -> Self {
        Self { scoring, invoker }
    }

    /// Returns `None` on transport failure or when the body is not a JSON
    /// object. Whether the object holds a usable score is not checked here.
    #[instrument(skip(self, payload), fields(handle = %payload.author.handle))]
    pub async fn request(&self, payload: &ScorePayload<'_>) -> Option<ScoreResult> {
        match self
            .invoker
            .invoke(|| self.scoring.check_account(payload))
            .await
        {
            Ok(Value::Object(fields)) => {
                debug!(fields = fields.len(), "received score");
                Some(ScoreResult::new(fields))
            }
            Ok(other) => {
                warn!(body = %other, "score response is not an object");
                None
            }
            Err(e) => {
                warn!(error = %e, "score unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Author, Post};
    use crate::testing::{self, FakeScoring, Reply};

    fn alice() -> Author {
        serde_json::from_value(testing::author("alice", "1")).unwrap()
    }

    #[tokio::test]
    async fn test_request_score() {
        let scoring = FakeScoring::default().reply("alice", Reply::Json(testing::score(1.5)));
        let requester = ScoreRequester::new(&scoring, RateLimitedInvoker::default());
        let author = alice();
        let timeline: Vec<Post> =
            serde_json::from_value(testing::timeline("alice", "1", 2)).unwrap();
        let mentions = vec![];

        let score = requester
            .request(&ScorePayload::new(&author, &timeline, &mentions))
            .await
            .unwrap();

        assert_eq!(score.overall_score(), Some(1.5));
        let payload = &scoring.payloads()[0];
        assert_eq!(payload["user"]["screen_name"], "alice");
        assert_eq!(payload["timeline"].as_array().unwrap().len(), 2);
        assert_eq!(payload["mentions"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_non_object_is_unavailable() {
        let author = alice();
        let (timeline, mentions) = (vec![], vec![]);
        let payload = ScorePayload::new(&author, &timeline, &mentions);

        for reply in [
            Reply::Json(serde_json::json!("Bad gateway")),
            Reply::Json(serde_json::json!([1, 2])),
            Reply::Html("<html><title>502 Bad Gateway</title></html>"),
            Reply::Status(503),
        ] {
            let scoring = FakeScoring::default().reply("alice", reply);
            let requester = ScoreRequester::new(&scoring, RateLimitedInvoker::default());
            assert!(requester.request(&payload).await.is_none());
        }
    }

    #[tokio::test]
    async fn test_object_without_display_scores_passes_through() {
        let scoring = FakeScoring::default()
            .reply("alice", Reply::Json(serde_json::json!({ "message": "quota" })));
        let requester = ScoreRequester::new(&scoring, RateLimitedInvoker::default());
        let author = alice();
        let (timeline, mentions) = (vec![], vec![]);

        let score = requester
            .request(&ScorePayload::new(&author, &timeline, &mentions))
            .await
            .unwrap();
        assert!(score.display_scores().is_none());
    }
}
