use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{Author, AuthorIdentity, MentionSet, Post, Timeline};

/// Request body submitted to the scoring service for one account.
#[derive(Debug, Clone, Serialize)]
pub struct ScorePayload<'a> {
    #[serde(rename = "user")]
    pub author: &'a Author,
    pub timeline: &'a [Post],
    pub mentions: &'a [Post],
}

impl<'a> ScorePayload<'a> {
    pub fn new(author: &'a Author, timeline: &'a Timeline, mentions: &'a MentionSet) -> Self {
        Self {
            author,
            timeline,
            mentions,
        }
    }
}

/// Opaque score object returned by the scoring service.
///
/// Only `display_scores` and the embedded `user` member are interpreted;
/// everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreResult(Map<String, Value>);

impl ScoreResult {
    const DISPLAY_SCORES: &'static str = "display_scores";
    const AUTHOR: &'static str = "user";

    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The human-facing score breakdown. A result without it is unusable.
    pub fn display_scores(&self) -> Option<&Value> {
        self.0.get(Self::DISPLAY_SCORES)
    }

    /// `display_scores.universal.overall`, the headline bot score.
    pub fn overall_score(&self) -> Option<f64> {
        self.display_scores()?
            .get("universal")?
            .get("overall")?
            .as_f64()
    }

    /// The author identity embedded in the result, if any.
    pub fn author(&self) -> Option<AuthorIdentity> {
        self.0
            .get(Self::AUTHOR)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Replace whatever author data the service echoed back with `identity`.
    pub fn set_author(&mut self, identity: AuthorIdentity) {
        let value = serde_json::json!({
            "screen_name": identity.handle,
            "id_str": identity.account_id,
        });
        self.0.insert(Self::AUTHOR.to_string(), value);
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}
