use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{instrument, warn};

use crate::api::ScoringApi;
use crate::error::{BotScoreError, Result};
use crate::model::ScorePayload;

const CHECK_ACCOUNT_URL: &str = "https://botometer-pro.p.rapidapi.com/4/check_account";
const RAPIDAPI_HOST: &str = "botometer-pro.p.rapidapi.com";

/// [`ScoringApi`] backed by the Botometer `check_account` endpoint on RapidAPI.
pub struct BotometerApi {
    http: reqwest::Client,
    api_key: String,
    url: String,
    host: String,
}

impl BotometerApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_key)
    }

    pub fn with_client(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http: client,
            api_key: api_key.into(),
            url: CHECK_ACCOUNT_URL.to_string(),
            host: RAPIDAPI_HOST.to_string(),
        }
    }

    /// Submit to another `check_account` URL. The RapidAPI host header follows the URL.
    pub fn with_url(mut self, url: &str) -> Result<Self> {
        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .ok_or_else(|| BotScoreError::InvalidUrl {
                url: url.to_string(),
            })?;
        self.url = url.to_string();
        self.host = host;
        Ok(self)
    }
}

#[async_trait]
impl ScoringApi for BotometerApi {
    #[instrument(skip(self, payload), fields(handle = %payload.author.handle))]
    async fn check_account(&self, payload: &ScorePayload<'_>) -> Result<Value> {
        let url = self.url.as_str();
        let body = serde_json::to_vec(payload).map_err(|e| BotScoreError::Json {
            url: url.to_owned(),
            source: e,
        })?;

        let response = self
            .http
            .post(url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| BotScoreError::Http {
                url: url.to_owned(),
                source: e,
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| BotScoreError::ResponseBody {
                url: url.to_owned(),
                source: e,
            })?;

        if !status.is_success() {
            warn!(%status, title = ?html_title(&text), "scoring service rejected request");
            return Err(BotScoreError::UnexpectedStatus {
                url: url.to_owned(),
                status,
            });
        }

        parse_score_body(url, &text)
    }
}

/// Parse a scoring response body. Anything that is not JSON is an error
/// carrying the page title when the body is an HTML error page.
pub(crate) fn parse_score_body(url: &str, body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|_| BotScoreError::NonJsonBody {
        url: url.to_owned(),
        title: html_title(body),
    })
}

fn html_title(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}
