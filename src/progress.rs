use std::fmt::{Display, Formatter};

use tracing::info;

/// Per-account progress reported while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent<'a> {
    /// The pipeline is about to run for `handle`.
    Starting { handle: &'a str },
    /// `handle` resolved to a record; `summary` is its headline score.
    Scored { handle: &'a str, summary: String },
    /// `handle` could not be scored and is left out of the results.
    NoScore { handle: &'a str },
    /// The batch was cancelled with `remaining` accounts not attempted.
    Cancelled { remaining: usize },
}

impl Display for ProgressEvent<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressEvent::Starting { handle } => write!(f, "Awaiting score for {handle}"),
            ProgressEvent::Scored { handle, summary } => write!(f, "{handle} is a {summary}"),
            ProgressEvent::NoScore { handle } => write!(f, "No score found for {handle}"),
            ProgressEvent::Cancelled { remaining } => {
                write!(f, "Batch cancelled, {remaining} accounts skipped")
            }
        }
    }
}

/// Receives progress events from a batch run.
///
/// Implemented for any `Fn(&ProgressEvent)` closure.
pub trait ProgressSink: Send + Sync {
    fn report(&self, event: &ProgressEvent<'_>);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent<'_>) + Send + Sync,
{
    fn report(&self, event: &ProgressEvent<'_>) {
        self(event)
    }
}

/// Writes progress lines to the `tracing` subscriber at info level.
#[derive(Debug, Clone, Copy)]
pub struct LogProgress {
    enabled: bool,
}

impl LogProgress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl ProgressSink for LogProgress {
    fn report(&self, event: &ProgressEvent<'_>) {
        if self.enabled {
            info!("{event}");
        }
    }
}
