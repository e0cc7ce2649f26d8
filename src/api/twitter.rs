use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::instrument;

use crate::api::{read_body, Endpoint, SocialApi};
use crate::error::{BotScoreError, Result};

const BASE_URL: &str = "https://api.twitter.com/1.1";

/// [`SocialApi`] backed by the Twitter v1.1 REST API with app-only auth.
pub struct TwitterApi {
    http: reqwest::Client,
    bearer_token: String,
    base_url: String,
}

impl TwitterApi {
    /// Create a client with default HTTP settings.
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), bearer_token)
    }

    /// Create a client using the provided [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, bearer_token: impl Into<String>) -> Self {
        Self {
            http: client,
            bearer_token: bearer_token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at another API root, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint_url(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<Url> {
        let url = format!("{}/{endpoint}.json", self.base_url.trim_end_matches('/'));
        Url::parse_with_params(&url, params).map_err(|_| BotScoreError::InvalidUrl { url })
    }
}

#[async_trait]
impl SocialApi for TwitterApi {
    #[instrument(skip(self, params), fields(params = params.len()))]
    async fn get(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<Value> {
        let url = self.endpoint_url(endpoint, params)?;
        let request = self.http.get(url.clone()).bearer_auth(&self.bearer_token);
        let body = read_body(request, url.as_str()).await?;
        serde_json::from_str(&body).map_err(|e| BotScoreError::Json {
            url: url.to_string(),
            source: e,
        })
    }
}
