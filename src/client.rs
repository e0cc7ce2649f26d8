use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::api::{BotometerApi, ScoringApi, SocialApi, TwitterApi};
use crate::config::{BotScoreConfig, Credentials};
use crate::model::{AccountQuery, AccountRecord, Resolution};
use crate::pipeline::{AccountPipeline, BatchRunner};
use crate::progress::{LogProgress, ProgressSink};

/// The main entry point for scoring accounts.
///
/// `BotScoreClient` pairs a social API with a scoring API and runs accounts
/// through the timeline → mentions → score pipeline.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> botscore::Result<()> {
/// use botscore::{BotScoreClient, BotScoreConfig, Credentials};
///
/// let client = BotScoreClient::new(Credentials::from_env()?, BotScoreConfig::default());
/// let records = client.get_batch_bot_scores(&["alice", "bob"]).await;
/// println!("Scored {} accounts", records.len());
/// # Ok(())
/// # }
/// ```
pub struct BotScoreClient {
    social: Arc<dyn SocialApi>,
    scoring: Arc<dyn ScoringApi>,
    config: BotScoreConfig,
}

impl BotScoreClient {
    /// Create a client talking to Twitter and Botometer with default HTTP settings.
    pub fn new(credentials: Credentials, config: BotScoreConfig) -> Self {
        Self::with_client(reqwest::Client::new(), credentials, config)
    }

    /// Create a client using the provided [`reqwest::Client`] for both APIs.
    ///
    /// Use this when you need to configure proxies, headers, etc.
    pub fn with_client(
        client: reqwest::Client,
        credentials: Credentials,
        config: BotScoreConfig,
    ) -> Self {
        Self::with_apis(
            TwitterApi::with_client(client.clone(), credentials.twitter_bearer_token),
            BotometerApi::with_client(client, credentials.rapidapi_key),
            config,
        )
    }

    /// Create a client from arbitrary API implementations.
    pub fn with_apis(
        social: impl SocialApi + 'static,
        scoring: impl ScoringApi + 'static,
        config: BotScoreConfig,
    ) -> Self {
        Self {
            social: Arc::new(social),
            scoring: Arc::new(scoring),
            config,
        }
    }

    pub fn config(&self) -> &BotScoreConfig {
        &self.config
    }

    /// Score a single account.
    #[instrument(skip(self))]
    pub async fn get_bot_score(&self, query: &AccountQuery) -> Resolution {
        self.pipeline().run(query).await
    }

    /// Score `handles` in order, logging progress when `log_progress` is set.
    pub async fn get_batch_bot_scores<S: AsRef<str>>(&self, handles: &[S]) -> Vec<AccountRecord> {
        let progress = LogProgress::new(self.config.log_progress);
        self.get_batch_bot_scores_with(handles, &progress, &CancellationToken::new())
            .await
    }

    /// Score `handles` in order, reporting to `progress` and stopping early
    /// once `cancel` fires.
    pub async fn get_batch_bot_scores_with<S: AsRef<str>>(
        &self,
        handles: &[S],
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Vec<AccountRecord> {
        let pipeline = self.pipeline();
        BatchRunner::new(&pipeline)
            .run(handles, progress, cancel)
            .await
    }

    fn pipeline(&self) -> AccountPipeline<'_> {
        AccountPipeline::new(self.social.as_ref(), self.scoring.as_ref(), &self.config)
    }
}
