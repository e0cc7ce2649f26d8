//! Fetch a Twitter account's recent activity and score it with Botometer.
//!
//! For each account the pipeline fetches the timeline, then the mentions,
//! then submits both to the scoring service. Failures never abort a batch:
//! an account either resolves to an [`AccountRecord`] or is skipped.

pub use client::BotScoreClient;
pub use config::{BotScoreConfig, Credentials};
pub use error::{BotScoreError, Result};
pub use model::*;
pub use progress::{LogProgress, ProgressEvent, ProgressSink};

pub mod api;
mod client;
mod config;
mod error;
mod model;
pub mod pipeline;
mod progress;
#[cfg(test)]
pub(crate) mod testing;
