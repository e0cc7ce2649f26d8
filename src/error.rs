use std::time::Duration;

/// All errors that can occur while talking to the social or scoring API.
///
/// The account pipeline never surfaces these to its caller: every stage
/// converts them into a degraded value or an unavailable resolution.
#[derive(thiserror::Error, Debug)]
pub enum BotScoreError {
    /// HTTP request failed (network, DNS, TLS, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was JSON but did not have the expected shape,
    /// or a request payload could not be encoded.
    #[error("invalid json for {url}: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },

    /// The response body was not JSON at all (typically a gateway error page).
    #[error("non-json response from {url}{}", title_suffix(.title))]
    NonJsonBody { url: String, title: Option<String> },

    /// The call did not complete within the configured request timeout.
    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },

    /// An account query carried neither a handle nor an account id.
    #[error("account query needs a handle or an account id")]
    InvalidQuery,

    /// A required environment variable is not set.
    #[error("missing environment variable {var}")]
    MissingEnv { var: &'static str },

    /// A configured base URL could not be parsed.
    #[error("invalid url {url}")]
    InvalidUrl { url: String },
}

pub type Result<T> = std::result::Result<T, BotScoreError>;

fn title_suffix(title: &Option<String>) -> String {
    title
        .as_deref()
        .map(|t| format!(": {t}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_json_body_message() {
        let with_title = BotScoreError::NonJsonBody {
            url: "https://scores.test/check".to_string(),
            title: Some("502 Bad Gateway".to_string()),
        };
        assert_eq!(
            with_title.to_string(),
            "non-json response from https://scores.test/check: 502 Bad Gateway"
        );

        let without_title = BotScoreError::NonJsonBody {
            url: "https://scores.test/check".to_string(),
            title: None,
        };
        assert_eq!(
            without_title.to_string(),
            "non-json response from https://scores.test/check"
        );
    }
}
