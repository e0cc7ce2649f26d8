use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::model::Author;

/// Timestamp format of the `created_at` field on posts.
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// An account's recent posts, most recent first.
pub type Timeline = Vec<Post>;

/// Recent posts by other accounts mentioning a target account.
pub type MentionSet = Vec<Post>;

/// A single post with its embedded author snapshot.
///
/// The snapshot is kept as raw JSON; [`Post::author`] decodes it on demand so
/// an odd `user` object on one post never spoils the rest of a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_str: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Post {
    /// The embedded author, if present and carrying a handle and id.
    pub fn author(&self) -> Option<Author> {
        self.user
            .as_ref()
            .and_then(|user| serde_json::from_value(user.clone()).ok())
    }

    /// Parse `created_at` into a timestamp, if present and well formed.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_str(raw, CREATED_AT_FORMAT).ok())
    }
}

/// Decode a JSON array of posts. Entries that are not posts are dropped one
/// by one; only a body that is not an array is an error.
pub(crate) fn posts_from_value(body: Value) -> serde_json::Result<Vec<Post>> {
    let entries: Vec<Value> = serde_json::from_value(body)?;
    let total = entries.len();
    let posts: Vec<Post> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if posts.len() < total {
        debug!(dropped = total - posts.len(), "skipped malformed posts");
    }
    Ok(posts)
}
