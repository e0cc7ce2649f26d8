use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{BotScoreError, Result};

/// Identifies the account one pipeline run is about.
///
/// At least one of `handle` and `account_id` is always populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountQuery {
    handle: Option<String>,
    account_id: Option<String>,
}

impl AccountQuery {
    /// Build a query from an optional handle and an optional account id.
    ///
    /// Fails with [`BotScoreError::InvalidQuery`] when both are missing or blank.
    pub fn new(handle: Option<String>, account_id: Option<String>) -> Result<Self> {
        let handle = handle.filter(|h| !h.trim().is_empty());
        let account_id = account_id.filter(|id| !id.trim().is_empty());
        if handle.is_none() && account_id.is_none() {
            return Err(BotScoreError::InvalidQuery);
        }
        Ok(Self { handle, account_id })
    }

    /// Query an account by its public handle. Surrounding whitespace and a
    /// leading `@` are ignored.
    pub fn by_handle(handle: impl Into<String>) -> Result<Self> {
        let handle: String = handle.into();
        let handle = handle.trim().trim_start_matches('@').trim();
        Self::new(Some(handle.to_string()), None)
    }

    /// Query an account by its numeric id.
    pub fn by_account_id(account_id: impl Into<String>) -> Result<Self> {
        Self::new(None, Some(account_id.into()))
    }

    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// Query parameters identifying this account on the timeline endpoint.
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(handle) = &self.handle {
            params.push(("screen_name", handle.clone()));
        }
        if let Some(account_id) = &self.account_id {
            params.push(("user_id", account_id.clone()));
        }
        params
    }
}

impl Display for AccountQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.handle, &self.account_id) {
            (Some(handle), _) => write!(f, "@{handle}"),
            (None, Some(account_id)) => write!(f, "#{account_id}"),
            (None, None) => write!(f, "<empty>"),
        }
    }
}

/// Profile snapshot of an account, as embedded in each of its posts.
///
/// Fields other than the handle and id are kept verbatim so the profile can
/// be forwarded to the scoring service unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "screen_name")]
    pub handle: String,
    #[serde(rename = "id_str")]
    pub account_id: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// The minimal author identity written into a score result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorIdentity {
    #[serde(rename = "screen_name")]
    pub handle: String,
    #[serde(rename = "id_str")]
    pub account_id: String,
}

impl From<&Author> for AuthorIdentity {
    fn from(author: &Author) -> Self {
        Self {
            handle: author.handle.clone(),
            account_id: author.account_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_requires_handle_or_id() {
        assert!(matches!(
            AccountQuery::new(None, None),
            Err(BotScoreError::InvalidQuery)
        ));
        assert!(matches!(
            AccountQuery::new(Some("  ".to_string()), Some(String::new())),
            Err(BotScoreError::InvalidQuery)
        ));
        assert!(AccountQuery::by_account_id("12345").is_ok());
    }

    #[test]
    fn test_query_params() {
        let query = AccountQuery::by_handle("@alice").unwrap();
        assert_eq!(query.handle(), Some("alice"));
        assert_eq!(query.params(), vec![("screen_name", "alice".to_string())]);
        assert_eq!(query.to_string(), "@alice");

        let query = AccountQuery::by_handle(" @alice\n").unwrap();
        assert_eq!(query.params(), vec![("screen_name", "alice".to_string())]);

        let query = AccountQuery::new(Some("bob".to_string()), Some("42".to_string())).unwrap();
        assert_eq!(
            query.params(),
            vec![
                ("screen_name", "bob".to_string()),
                ("user_id", "42".to_string())
            ]
        );
    }

    #[test]
    fn test_author_keeps_profile_fields() {
        let author: Author = serde_json::from_value(serde_json::json!({
            "screen_name": "alice",
            "id_str": "1001",
            "followers_count": 12,
            "protected": false
        }))
        .unwrap();

        assert_eq!(author.handle, "alice");
        assert_eq!(author.account_id, "1001");
        assert_eq!(author.profile["followers_count"], 12);

        let value = serde_json::to_value(&author).unwrap();
        assert_eq!(value["screen_name"], "alice");
        assert_eq!(value["protected"], false);
    }
}
