//! In-memory stand-ins for the social and scoring APIs.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::{Endpoint, ScoringApi, SocialApi};
use crate::error::{BotScoreError, Result};
use crate::model::ScorePayload;

/// A scripted response.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Json(Value),
    Status(u16),
    /// A body that is not JSON, e.g. a gateway error page.
    Html(&'static str),
}

impl Reply {
    fn into_result(self, url: &str) -> Result<Value> {
        match self {
            Reply::Json(value) => Ok(value),
            Reply::Status(code) => Err(BotScoreError::UnexpectedStatus {
                url: url.to_string(),
                status: reqwest::StatusCode::from_u16(code).unwrap(),
            }),
            Reply::Html(body) => crate::api::parse_score_body(url, body),
        }
    }
}

/// Social API keyed by handle; unknown handles answer 404.
#[derive(Default)]
pub(crate) struct FakeSocial {
    timelines: HashMap<String, Reply>,
    searches: HashMap<String, Reply>,
    calls: Mutex<Vec<(Endpoint, String)>>,
}

impl FakeSocial {
    pub(crate) fn timeline(mut self, handle: &str, reply: Reply) -> Self {
        self.timelines.insert(handle.to_string(), reply);
        self
    }

    /// Script the mention search for `handle` (the query is `@handle`).
    pub(crate) fn mentions(mut self, handle: &str, reply: Reply) -> Self {
        self.searches.insert(format!("@{handle}"), reply);
        self
    }

    pub(crate) fn calls(&self) -> Vec<(Endpoint, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_to(&self, endpoint: Endpoint) -> usize {
        self.calls().iter().filter(|(e, _)| *e == endpoint).count()
    }
}

#[async_trait]
impl SocialApi for FakeSocial {
    async fn get(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<Value> {
        let key_name = match endpoint {
            Endpoint::UserTimeline => "screen_name",
            Endpoint::SearchTweets => "q",
        };
        let key = params
            .iter()
            .find(|(name, _)| *name == key_name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default();
        self.calls.lock().unwrap().push((endpoint, key.clone()));

        let scripted = match endpoint {
            Endpoint::UserTimeline => self.timelines.get(&key),
            Endpoint::SearchTweets => self.searches.get(&key),
        };
        scripted
            .cloned()
            .unwrap_or(Reply::Status(404))
            .into_result(&format!("fake://{endpoint}"))
    }
}

/// Scoring API keyed by the payload's author handle; unknown handles answer 502.
#[derive(Default)]
pub(crate) struct FakeScoring {
    replies: HashMap<String, Reply>,
    payloads: Mutex<Vec<Value>>,
}

impl FakeScoring {
    pub(crate) fn reply(mut self, handle: &str, reply: Reply) -> Self {
        self.replies.insert(handle.to_string(), reply);
        self
    }

    /// Every payload submitted so far, as JSON.
    pub(crate) fn payloads(&self) -> Vec<Value> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoringApi for FakeScoring {
    async fn check_account(&self, payload: &ScorePayload<'_>) -> Result<Value> {
        self.payloads
            .lock()
            .unwrap()
            .push(serde_json::to_value(payload).unwrap());
        self.replies
            .get(&payload.author.handle)
            .cloned()
            .unwrap_or(Reply::Status(502))
            .into_result("fake://check_account")
    }
}

pub(crate) fn author(handle: &str, id: &str) -> Value {
    json!({ "screen_name": handle, "id_str": id, "followers_count": 10 })
}

/// `count` posts by `handle`, most recent first.
pub(crate) fn timeline(handle: &str, id: &str, count: usize) -> Value {
    let posts: Vec<Value> = (0..count)
        .map(|n| {
            json!({
                "id_str": format!("{id}{n}"),
                "text": format!("post {n} by {handle}"),
                "created_at": "Wed Oct 10 20:19:24 +0000 2018",
                "user": author(handle, id),
            })
        })
        .collect();
    Value::Array(posts)
}

/// Search response with `count` posts mentioning `handle`.
pub(crate) fn mentions(handle: &str, count: usize) -> Value {
    let statuses: Vec<Value> = (0..count)
        .map(|n| {
            json!({
                "id_str": format!("m{n}"),
                "text": format!("hey @{handle}"),
                "user": author(&format!("fan{n}"), &format!("9{n}")),
            })
        })
        .collect();
    json!({ "statuses": statuses, "search_metadata": { "count": count } })
}

/// A usable score response whose echoed `user` differs from the account's.
pub(crate) fn score(overall: f64) -> Value {
    json!({
        "cap": { "english": 0.8, "universal": 0.7 },
        "display_scores": {
            "english": { "overall": overall },
            "universal": { "overall": overall }
        },
        "user": {
            "majority_lang": "en",
            "user_data": { "screen_name": "SERVICE_COPY", "id_str": "0" }
        }
    })
}
