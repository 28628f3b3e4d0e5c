use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use super::error::ConfigError;
use crate::backoff::{self, BackoffStrategy};

/// Default maximum number of attempts (including the first).
pub const DEFAULT_ATTEMPTS: u32 = 10;
/// Default base delay between attempts.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// The retrying configuration for operations producing `T`.
///
/// Built with [`Config::new`] and the `with_*` setters; fixed for the duration
/// of an `execute` call. Cloning shares the predicate.
pub struct Config<T> {
    attempts: NonZeroU32,
    delay: Duration,
    backoff: BackoffStrategy,
    predicate: Predicate<T>,
}

impl<T> Config<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of attempts. Zero is rejected.
    pub fn with_attempts(mut self, attempts: u32) -> Result<Self, ConfigError> {
        self.attempts = NonZeroU32::new(attempts).ok_or(ConfigError::ZeroAttempts)?;
        Ok(self)
    }

    /// Set the base delay between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Set how a returned value is judged successful. Values rejected here
    /// are retried like errors.
    pub fn with_predicate<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicate = Arc::new(predicate);
        self
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.get()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn backoff(&self) -> BackoffStrategy {
        self.backoff
    }

    /// Whether `value` counts as success.
    pub fn accepts(&self, value: &T) -> bool {
        (self.predicate)(value)
    }

    /// Wait after `attempted` failed attempts.
    pub fn delay_for(&self, attempted: u32) -> Duration {
        backoff::delay(attempted, self.delay, self.backoff)
    }
}

impl<T> Default for Config<T> {
    fn default() -> Self {
        Self {
            attempts: NonZeroU32::new(DEFAULT_ATTEMPTS).unwrap_or(NonZeroU32::MIN),
            delay: DEFAULT_DELAY,
            backoff: BackoffStrategy::None,
            predicate: Arc::new(|_| true),
        }
    }
}

impl<T> Clone for Config<T> {
    fn clone(&self) -> Self {
        Self {
            attempts: self.attempts,
            delay: self.delay,
            backoff: self.backoff,
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Config<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("attempts", &self.attempts)
            .field("delay", &self.delay)
            .field("backoff", &self.backoff)
            .field("predicate", &"<predicate>")
            .finish()
    }
}
