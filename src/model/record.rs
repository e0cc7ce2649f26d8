use serde::{Deserialize, Serialize};

use crate::model::{Author, MentionSet, ScoreResult, Timeline};

/// The combined result for one successfully scored account.
///
/// Which of `author`, `timeline` and `mentions` are present depends on the
/// client configuration; `score` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentions: Option<MentionSet>,
    #[serde(rename = "botometer")]
    pub score: ScoreResult,
}

impl AccountRecord {
    /// Short human-readable score summary, e.g. `"2.4"`.
    pub fn summary(&self) -> String {
        self.score
            .overall_score()
            .map(|overall| overall.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Outcome of one account pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(AccountRecord),
    /// Some stage could not produce usable data; the account is skipped.
    Unavailable,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn into_record(self) -> Option<AccountRecord> {
        match self {
            Resolution::Resolved(record) => Some(record),
            Resolution::Unavailable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(score: serde_json::Value) -> AccountRecord {
        AccountRecord {
            author: None,
            timeline: None,
            mentions: None,
            score: serde_json::from_value(score).unwrap(),
        }
    }

    #[test]
    fn test_summary() {
        let scored = record(json!({ "display_scores": { "universal": { "overall": 3.5 } } }));
        assert_eq!(scored.summary(), "3.5");

        let unscored = record(json!({ "display_scores": {} }));
        assert_eq!(unscored.summary(), "unknown");
    }
}
