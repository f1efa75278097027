//! Conditional polling with a deadline.
//!
//! A single cooperative loop: fetch, report, test the condition, then check
//! the deadline and sleep. The last sleep is cut short at the deadline. A
//! fetch that is in flight when the deadline passes is allowed to finish and
//! its value is still tested; no fetch is started at or after the deadline.

use std::fmt::Display;
use std::future::Future;

use tokio::time::{sleep, Duration, Instant};
use tracing::{debug, warn};

use crate::error::Retryable;
use crate::infrastructure::config::WatcherConfig;

/// Outcome of one polling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult<T, E> {
    /// The condition held for this value.
    Satisfied(T),
    /// The deadline passed; carries the last value fetched, if any.
    TimedOut(Option<T>),
    /// A fetch failed with a non-retryable error.
    Failed(E),
}

/// Polls a data source until a condition holds or a deadline passes.
#[derive(Debug, Clone, Copy)]
pub struct ConditionalAwaiter {
    polling_interval: Duration,
    timeout: Duration,
}

impl ConditionalAwaiter {
    #[must_use]
    pub fn new(config: WatcherConfig) -> Self {
        Self {
            polling_interval: config.polling_interval(),
            timeout: config.timeout(),
        }
    }

    #[must_use]
    pub fn polling_interval(&self) -> Duration {
        self.polling_interval
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Poll `fetch` until `is_satisfied` holds for a fetched value.
    ///
    /// Retryable fetch errors are logged and swallowed; any other error ends
    /// the run with [`PollResult::Failed`].
    pub async fn poll<T, E, F, Fut, S, O>(
        &self,
        is_satisfied: S,
        mut fetch: F,
        mut on_fetched: O,
    ) -> PollResult<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        S: Fn(&T) -> bool,
        O: FnMut(&T),
        E: Retryable + Display,
    {
        let deadline = Instant::now() + self.timeout;
        let mut last = None;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match fetch().await {
                Ok(value) => {
                    on_fetched(&value);
                    if is_satisfied(&value) {
                        debug!(attempt, "Condition satisfied");
                        return PollResult::Satisfied(value);
                    }
                    last = Some(value);
                }
                Err(e) if e.is_retryable() => {
                    debug!(attempt, error = %e, "Expected error while polling, will retry");
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Unexpected error while polling");
                    return PollResult::Failed(e);
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return self.timed_out(attempt, last);
            }

            sleep(self.polling_interval.min(deadline - now)).await;
            if Instant::now() >= deadline {
                return self.timed_out(attempt, last);
            }
        }
    }

    fn timed_out<T, E>(&self, attempts: u32, last: Option<T>) -> PollResult<T, E> {
        warn!(
            attempts,
            timeout_ms = self.timeout.as_millis(),
            "Condition not reached before deadline"
        );
        PollResult::TimedOut(last)
    }

    /// Like [`poll`](Self::poll), surfacing a missed deadline as the error
    /// built by `create_error` from the last fetched value.
    ///
    /// # Errors
    ///
    /// Returns the first non-retryable fetch error, or `create_error(last)`
    /// when the condition was never observed before the deadline.
    pub async fn await_conditionally<T, E, F, Fut, S, O, C>(
        &self,
        is_satisfied: S,
        fetch: F,
        on_fetched: O,
        create_error: C,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        S: Fn(&T) -> bool,
        O: FnMut(&T),
        E: Retryable + Display,
        C: FnOnce(Option<T>) -> E,
    {
        match self.poll(is_satisfied, fetch, on_fetched).await {
            PollResult::Satisfied(value) => Ok(value),
            PollResult::TimedOut(last) => Err(create_error(last)),
            PollResult::Failed(e) => Err(e),
        }
    }
}

impl Default for ConditionalAwaiter {
    fn default() -> Self {
        Self::new(WatcherConfig::default())
    }
}
