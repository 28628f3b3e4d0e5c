//! Retry loop: run a closure until its value is accepted or attempts run out.

use std::fmt;
use std::time::Duration;

use tracing::Level;

use super::config::Config;
use super::error::RetryExhausted;
use super::events::{self, RetryLogger, TracingLogger};
use super::outcome::Outcome;
use super::sleep::{Sleeper, ThreadSleeper};

/// Runs `operation` until it returns a value accepted by the config's
/// predicate, sleeping the calling thread between attempts and logging
/// through `tracing`.
pub fn execute<T, E, F>(config: &Config<T>, operation: F) -> Outcome<T>
where
    F: FnMut() -> Result<T, E>,
    E: fmt::Display,
{
    execute_with(config, &ThreadSleeper, &TracingLogger, operation)
}

/// Like [`execute`] but returns the value directly, or [`RetryExhausted`].
pub fn run<T, E, F>(config: &Config<T>, operation: F) -> Result<T, RetryExhausted>
where
    F: FnMut() -> Result<T, E>,
    E: fmt::Display,
{
    execute(config, operation).get()
}

/// [`execute`] with an injected sleeper and logger.
///
/// Every error returned by `operation` is treated as retryable. Values the
/// predicate rejects count against the budget exactly like errors. No wait
/// follows the final attempt.
pub fn execute_with<T, E, F, S, L>(
    config: &Config<T>,
    sleeper: &S,
    logger: &L,
    mut operation: F,
) -> Outcome<T>
where
    F: FnMut() -> Result<T, E>,
    E: fmt::Display,
    S: Sleeper + ?Sized,
    L: RetryLogger + ?Sized,
{
    let mut tracker = AttemptTracker::new(config, logger);
    while tracker.has_budget() {
        if let Some(value) = tracker.settle(operation()) {
            return Outcome::Success(value);
        }
        if let Some(wait) = tracker.next_wait() {
            sleeper.sleep(wait);
        }
    }
    Outcome::Failure(tracker.exhausted())
}

/// [`run`] with an injected sleeper and logger.
pub fn run_with<T, E, F, S, L>(
    config: &Config<T>,
    sleeper: &S,
    logger: &L,
    operation: F,
) -> Result<T, RetryExhausted>
where
    F: FnMut() -> Result<T, E>,
    E: fmt::Display,
    S: Sleeper + ?Sized,
    L: RetryLogger + ?Sized,
{
    execute_with(config, sleeper, logger, operation).get()
}

/// Per-call bookkeeping shared by the blocking and async loops.
pub(super) struct AttemptTracker<'a, T, L: ?Sized> {
    config: &'a Config<T>,
    logger: &'a L,
    attempted: u32,
    last_error: Option<String>,
}

impl<'a, T, L: RetryLogger + ?Sized> AttemptTracker<'a, T, L> {
    pub(super) fn new(config: &'a Config<T>, logger: &'a L) -> Self {
        Self {
            config,
            logger,
            attempted: 0,
            last_error: None,
        }
    }

    pub(super) fn has_budget(&self) -> bool {
        self.attempted < self.config.attempts()
    }

    /// Classify one attempt. Returns the value only if the predicate accepts it.
    pub(super) fn settle<E: fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) if self.config.accepts(&value) => Some(value),
            Ok(_) => {
                self.logger.log(Level::INFO, events::PREDICATE_FAILED);
                None
            }
            Err(e) => {
                let rendered = e.to_string();
                self.logger.log(Level::ERROR, &events::block_failed(&rendered));
                self.last_error = Some(rendered);
                None
            }
        }
    }

    /// Count the failed attempt and return the wait before the next one, or
    /// `None` if that was the last permitted attempt.
    pub(super) fn next_wait(&mut self) -> Option<Duration> {
        self.attempted += 1;
        if !self.has_budget() {
            return None;
        }
        let wait = self.config.delay_for(self.attempted);
        tracing::debug!(
            target: events::LOG_TARGET,
            attempt = self.attempted,
            ?wait,
            "waiting before next attempt"
        );
        Some(wait)
    }

    pub(super) fn exhausted(self) -> RetryExhausted {
        let err = RetryExhausted::new(self.config.attempts(), self.last_error);
        self.logger.log(Level::ERROR, &err.to_string());
        err
    }
}
