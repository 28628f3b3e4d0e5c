//! Logging capability consumed by the retry loop.

use tracing::Level;

/// Target used for the loop's events by [`TracingLogger`].
pub const LOG_TARGET: &str = "retry";

/// Accepts a level and a message. The loop emits three kinds of message:
/// a failed block (ERROR), a rejected value (INFO) and exhaustion (ERROR).
pub trait RetryLogger {
    fn log(&self, level: Level, message: &str);
}

/// Forwards to `tracing` under the `retry` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl RetryLogger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        // `tracing` macros need a constant level.
        match level {
            Level::ERROR => tracing::error!(target: LOG_TARGET, "{}", message),
            Level::WARN => tracing::warn!(target: LOG_TARGET, "{}", message),
            Level::INFO => tracing::info!(target: LOG_TARGET, "{}", message),
            Level::DEBUG => tracing::debug!(target: LOG_TARGET, "{}", message),
            _ => tracing::trace!(target: LOG_TARGET, "{}", message),
        }
    }
}

impl<L: RetryLogger + ?Sized> RetryLogger for &L {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message)
    }
}

pub(crate) fn block_failed(error: &str) -> String {
    format!("Block failed with {}.", error)
}

pub(crate) const PREDICATE_FAILED: &str = "Predicate failed.";
