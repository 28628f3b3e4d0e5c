//! Async retry loop: same attempt semantics as [`super::run`], but waits on a
//! timer instead of blocking the thread.

use std::fmt;
use std::future::Future;

use super::config::Config;
use super::error::RetryExhausted;
use super::events::{RetryLogger, TracingLogger};
use super::outcome::Outcome;
use super::run::AttemptTracker;
use super::sleep::{AsyncSleeper, TokioSleeper};

/// Awaits `operation()` until its value is accepted, waiting on a tokio timer
/// between attempts.
pub async fn execute_async<T, E, F, Fut>(config: &Config<T>, operation: F) -> Outcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    execute_async_with(config, &TokioSleeper, &TracingLogger, operation).await
}

/// Like [`execute_async`] but returns the value directly, or [`RetryExhausted`].
pub async fn run_async<T, E, F, Fut>(config: &Config<T>, operation: F) -> Result<T, RetryExhausted>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    execute_async(config, operation).await.get()
}

/// [`execute_async`] with an injected sleeper and logger.
pub async fn execute_async_with<T, E, F, Fut, S, L>(
    config: &Config<T>,
    sleeper: &S,
    logger: &L,
    mut operation: F,
) -> Outcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
    S: AsyncSleeper,
    L: RetryLogger + ?Sized,
{
    let mut tracker = AttemptTracker::new(config, logger);
    while tracker.has_budget() {
        if let Some(value) = tracker.settle(operation().await) {
            return Outcome::Success(value);
        }
        if let Some(wait) = tracker.next_wait() {
            sleeper.sleep(wait).await;
        }
    }
    Outcome::Failure(tracker.exhausted())
}

/// [`run_async`] with an injected sleeper and logger.
pub async fn run_async_with<T, E, F, Fut, S, L>(
    config: &Config<T>,
    sleeper: &S,
    logger: &L,
    operation: F,
) -> Result<T, RetryExhausted>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
    S: AsyncSleeper,
    L: RetryLogger + ?Sized,
{
    execute_async_with(config, sleeper, logger, operation)
        .await
        .get()
}
