//! Error types surfaced by the retry engine.

use std::ops::Deref;

use thiserror::Error;

/// The single terminal failure: every permitted attempt failed or was
/// rejected by the success predicate.
///
/// The most recent operation error, if any, is the `source()`, so an
/// `anyhow` `{:#}` chain shows why the run failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Retry, max attempts reached: {attempts}.")]
pub struct RetryExhausted {
    /// Configured attempt budget.
    pub attempts: u32,
    /// Most recent error returned by the operation. `None` when every
    /// attempt was rejected by the predicate.
    #[source]
    pub last_error: Option<LastError>,
}

impl RetryExhausted {
    pub fn new(attempts: u32, last_error: Option<String>) -> Self {
        Self {
            attempts,
            last_error: last_error.map(LastError),
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Rendered error from an attempt. Operation errors only need `Display`, so
/// the text is kept rather than the original value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("last error: {0}")]
pub struct LastError(String);

impl Deref for LastError {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

/// Caller contract violations detected before the loop starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `attempts` must be at least 1.
    #[error("attempts must be at least 1 (got 0)")]
    ZeroAttempts,
}
