//! The per-account scoring pipeline and the batch runner built on it.

mod account;
mod batch;
mod invoker;
mod mentions;
mod score;
mod timeline;

pub use account::{AccountPipeline, OutputShape};
pub use batch::BatchRunner;
pub use invoker::RateLimitedInvoker;
pub use mentions::MentionsFetcher;
pub use score::ScoreRequester;
pub use timeline::TimelineFetcher;
