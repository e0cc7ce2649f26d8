use itertools::Itertools;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::model::{AccountQuery, AccountRecord, Resolution};
use crate::pipeline::AccountPipeline;
use crate::progress::{ProgressEvent, ProgressSink};

/// Runs a list of handles through an [`AccountPipeline`], one at a time.
///
/// Accounts are never processed concurrently: each run finishes before the
/// next one starts so the rate limit holds across the whole batch.
pub struct BatchRunner<'a> {
    pipeline: &'a AccountPipeline<'a>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(pipeline: &'a AccountPipeline<'a>) -> Self {
        Self { pipeline }
    }

    /// Score every handle in order and return the records that resolved,
    /// in input order.
    ///
    /// `cancel` is checked before each account; once it fires the records
    /// gathered so far are returned.
    #[instrument(skip_all, fields(handles = handles.len()))]
    pub async fn run<S>(
        &self,
        handles: &[S],
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Vec<AccountRecord>
    where
        S: AsRef<str>,
    {
        info!(handles = %handles.iter().map(|h| h.as_ref()).join(", "), "starting batch");
        let mut records = Vec::new();

        for (index, handle) in handles.iter().map(|h| h.as_ref()).enumerate() {
            if cancel.is_cancelled() {
                let remaining = handles.len() - index;
                warn!(remaining, "batch cancelled");
                progress.report(&ProgressEvent::Cancelled { remaining });
                break;
            }

            progress.report(&ProgressEvent::Starting { handle });
            match self.score_handle(handle).await {
                Resolution::Resolved(record) => {
                    progress.report(&ProgressEvent::Scored {
                        handle,
                        summary: record.summary(),
                    });
                    records.push(record);
                }
                Resolution::Unavailable => progress.report(&ProgressEvent::NoScore { handle }),
            }
        }

        info!(
            scored = records.len(),
            attempted = handles.len(),
            "batch finished"
        );
        records
    }

    async fn score_handle(&self, handle: &str) -> Resolution {
        match AccountQuery::by_handle(handle) {
            Ok(query) => self.pipeline.run(&query).await,
            Err(e) => {
                warn!(handle, error = %e, "skipping invalid handle");
                Resolution::Unavailable
            }
        }
    }
}
