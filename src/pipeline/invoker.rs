use std::future::Future;
use std::time::Duration;

use tracing::trace;

use crate::error::{BotScoreError, Result};

/// Runs network calls behind a fixed pre-call delay and an optional deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateLimitedInvoker {
    delay: Duration,
    timeout: Option<Duration>,
}

impl RateLimitedInvoker {
    /// A zero `delay` means calls start immediately.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            timeout: None,
        }
    }

    /// Bound every call by `timeout`; `None` lets calls run indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the delay, then run `call` and return its result unchanged.
    ///
    /// The delay is paid before every call, including ones that go on to fail.
    /// A call exceeding the timeout fails with [`BotScoreError::Timeout`].
    pub async fn invoke<T, F, Fut>(&self, call: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if !self.delay.is_zero() {
            trace!(delay = ?self.delay, "rate limit delay");
            tokio::time::sleep(self.delay).await;
        }

        match self.timeout {
            Some(after) => tokio::time::timeout(after, call())
                .await
                .map_err(|_| BotScoreError::Timeout { after })?,
            None => call().await,
        }
    }
}
