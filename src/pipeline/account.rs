use tracing::{debug, instrument, warn};

use crate::api::{ScoringApi, SocialApi};
use crate::config::BotScoreConfig;
use crate::model::{
    AccountQuery, AccountRecord, Author, AuthorIdentity, MentionSet, Resolution, ScorePayload,
    Timeline,
};
use crate::pipeline::{MentionsFetcher, RateLimitedInvoker, ScoreRequester, TimelineFetcher};

/// Which optional parts of an [`AccountRecord`] to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputShape {
    pub include_author: bool,
    pub include_timeline: bool,
    pub include_mentions: bool,
}

impl From<&BotScoreConfig> for OutputShape {
    fn from(config: &BotScoreConfig) -> Self {
        Self {
            include_author: config.include_author,
            include_timeline: config.include_timeline,
            include_mentions: config.include_mentions,
        }
    }
}

enum Stage {
    FetchingTimeline,
    FetchingMentions {
        author: Author,
        timeline: Timeline,
    },
    Scoring {
        author: Author,
        timeline: Timeline,
        mentions: MentionSet,
    },
    Resolved(Resolution),
}

/// Timeline, mentions and score for a single account.
///
/// Stages run in order and never repeat. A missing timeline or score ends
/// the run as [`Resolution::Unavailable`]; missing mentions do not. The
/// pipeline itself never fails.
pub struct AccountPipeline<'a> {
    timelines: TimelineFetcher<'a>,
    mentions: MentionsFetcher<'a>,
    scores: ScoreRequester<'a>,
    shape: OutputShape,
}

impl<'a> AccountPipeline<'a> {
    pub fn new(
        social: &'a dyn SocialApi,
        scoring: &'a dyn ScoringApi,
        config: &BotScoreConfig,
    ) -> Self {
        let invoker =
            RateLimitedInvoker::new(config.rate_limit()).with_timeout(config.request_timeout());
        Self {
            timelines: TimelineFetcher::new(social, invoker, config.timeline_count),
            mentions: MentionsFetcher::new(social, invoker, config.mentions_count),
            scores: ScoreRequester::new(scoring, invoker),
            shape: OutputShape::from(config),
        }
    }

    #[instrument(skip(self, query), fields(query = %query))]
    pub async fn run(&self, query: &AccountQuery) -> Resolution {
        let mut stage = Stage::FetchingTimeline;
        loop {
            stage = match stage {
                Stage::FetchingTimeline => self.fetch_timeline(query).await,
                Stage::FetchingMentions { author, timeline } => {
                    let mentions = self.mentions.fetch(&author).await;
                    Stage::Scoring {
                        author,
                        timeline,
                        mentions,
                    }
                }
                Stage::Scoring {
                    author,
                    timeline,
                    mentions,
                } => self.score(author, timeline, mentions).await,
                Stage::Resolved(resolution) => return resolution,
            };
        }
    }

    async fn fetch_timeline(&self, query: &AccountQuery) -> Stage {
        let Some(timeline) = self.timelines.fetch(query).await else {
            return Stage::Resolved(Resolution::Unavailable);
        };

        let Some(first) = timeline.first() else {
            debug!("empty timeline, nothing to score");
            return Stage::Resolved(Resolution::Unavailable);
        };

        // Protected or suspended accounts come back without an author snapshot.
        let Some(author) = first.author() else {
            warn!("most recent post carries no author");
            return Stage::Resolved(Resolution::Unavailable);
        };

        Stage::FetchingMentions { author, timeline }
    }

    async fn score(&self, author: Author, timeline: Timeline, mentions: MentionSet) -> Stage {
        let payload = ScorePayload::new(&author, &timeline, &mentions);
        let Some(mut score) = self.scores.request(&payload).await else {
            return Stage::Resolved(Resolution::Unavailable);
        };

        if score.display_scores().is_none() {
            warn!(body = ?score.fields(), "score has no display_scores");
            return Stage::Resolved(Resolution::Unavailable);
        }

        score.set_author(AuthorIdentity::from(&author));

        let record = AccountRecord {
            author: self.shape.include_author.then_some(author),
            timeline: self.shape.include_timeline.then_some(timeline),
            mentions: self.shape.include_mentions.then_some(mentions),
            score,
        };
        Stage::Resolved(Resolution::Resolved(record))
    }
}
