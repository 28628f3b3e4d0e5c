//! Backoff policy: how the base delay grows with each failed attempt.
//!
//! Pure arithmetic over `Duration`; no state, no I/O. The retry loop asks this
//! module for the wait after attempt `n` and the CLI uses it to print a
//! schedule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Ways to extend the base delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffStrategy {
    /// Use the base delay unchanged.
    #[default]
    None,
    /// Multiply the base delay by the attempt number (linear growth).
    #[serde(alias = "linear")]
    AttemptMultiple,
    /// Multiply the base delay by the Fibonacci number of the attempt.
    Fibonacci,
}

impl BackoffStrategy {
    /// Delay to wait after `attempt` failed attempts (1-based).
    pub fn delay(self, attempt: u32, base: Duration) -> Duration {
        delay(attempt, base, self)
    }

    fn as_str(self) -> &'static str {
        match self {
            BackoffStrategy::None => "none",
            BackoffStrategy::AttemptMultiple => "attempt_multiple",
            BackoffStrategy::Fibonacci => "fibonacci",
        }
    }
}

impl fmt::Display for BackoffStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a backoff name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown backoff strategy {0:?} (expected none, attempt_multiple or fibonacci)")]
pub struct ParseBackoffError(String);

impl FromStr for BackoffStrategy {
    type Err = ParseBackoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" => Ok(BackoffStrategy::None),
            "attempt_multiple" | "linear" => Ok(BackoffStrategy::AttemptMultiple),
            "fibonacci" => Ok(BackoffStrategy::Fibonacci),
            _ => Err(ParseBackoffError(s.to_string())),
        }
    }
}

/// Compute the wait after `attempt` failed attempts.
///
/// `attempt` is 1-based. Growth is applied to the nanosecond count so no
/// sub-millisecond precision is lost; results beyond `Duration::MAX` saturate.
pub fn delay(attempt: u32, base: Duration, strategy: BackoffStrategy) -> Duration {
    match strategy {
        BackoffStrategy::None => base,
        BackoffStrategy::AttemptMultiple => scale(base, u64::from(attempt)),
        BackoffStrategy::Fibonacci => scale(base, fibonacci(attempt)),
    }
}

/// Waits a run would perform if every attempt failed: one entry per retry,
/// so `attempts - 1` entries. Lazy, so callers can `take` from huge budgets.
pub fn schedule(
    attempts: u32,
    base: Duration,
    strategy: BackoffStrategy,
) -> impl Iterator<Item = Duration> {
    (1..attempts).map(move |n| delay(n, base, strategy))
}

/// The `n`th Fibonacci number (`fib(0) = 0`, `fib(1) = 1`), computed
/// iteratively. Saturates at `u64::MAX`.
pub fn fibonacci(n: u32) -> u64 {
    let (mut first, mut second) = (0u64, 1u64);
    for _ in 0..n {
        if first == u64::MAX {
            break;
        }
        let next = first.saturating_add(second);
        first = second;
        second = next;
    }
    first
}

fn scale(base: Duration, factor: u64) -> Duration {
    let nanos = base.as_nanos().saturating_mul(u128::from(factor));
    let secs = nanos / NANOS_PER_SEC;
    if secs > u128::from(u64::MAX) {
        return Duration::MAX;
    }
    // Remainder is < 1e9 so it fits in u32.
    Duration::new(secs as u64, (nanos % NANOS_PER_SEC) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_returns_base_for_every_attempt() {
        let base = Duration::from_secs(1);
        for n in 1..=20 {
            assert_eq!(delay(n, base, BackoffStrategy::None), base);
        }
    }

    #[test]
    fn attempt_multiple_grows_linearly() {
        let base = Duration::from_millis(250);
        for n in 1..=20 {
            assert_eq!(delay(n, base, BackoffStrategy::AttemptMultiple), base * n);
        }
        assert_eq!(
            delay(10, Duration::from_secs(1), BackoffStrategy::AttemptMultiple),
            Duration::from_secs(10)
        );
        assert_eq!(
            BackoffStrategy::AttemptMultiple.delay(10, Duration::from_secs(60)),
            Duration::from_secs(600)
        );
    }

    #[test]
    fn fibonacci_backoff_uses_sequence() {
        assert_eq!(
            delay(9, Duration::from_secs(60), BackoffStrategy::Fibonacci),
            Duration::from_secs(34 * 60)
        );
        assert_eq!(
            delay(1, Duration::from_millis(100), BackoffStrategy::Fibonacci),
            Duration::from_millis(100)
        );
    }

    #[test]
    fn sub_millisecond_precision_is_kept() {
        let base = Duration::from_nanos(1_500);
        assert_eq!(
            delay(3, base, BackoffStrategy::AttemptMultiple),
            Duration::from_nanos(4_500)
        );
        let base = Duration::new(1, 999_999_999);
        assert_eq!(
            delay(2, base, BackoffStrategy::AttemptMultiple),
            Duration::new(3, 999_999_998)
        );
    }

    #[test]
    fn huge_attempts_saturate() {
        let d = delay(200, Duration::from_secs(u64::MAX / 2), BackoffStrategy::Fibonacci);
        assert_eq!(d, Duration::MAX);
    }

    #[test]
    fn fibonacci_sequence() {
        assert_eq!(fibonacci(0), 0);
        assert_eq!(fibonacci(1), 1);
        assert_eq!(fibonacci(2), 1);
        assert_eq!(fibonacci(9), 34);
        assert_eq!(fibonacci(10), 55);
        assert_eq!(fibonacci(93), 12_200_160_415_121_876_738);
        assert_eq!(fibonacci(200), u64::MAX);
    }

    #[test]
    fn saturated_fibonacci_stops_early() {
        let start = std::time::Instant::now();
        assert_eq!(fibonacci(u32::MAX), u64::MAX);
        assert_eq!(
            delay(u32::MAX, Duration::from_millis(1), BackoffStrategy::Fibonacci),
            Duration::from_millis(u64::MAX)
        );
        // Looping all u32::MAX steps would take seconds.
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn schedule_has_one_wait_per_retry() {
        let s: Vec<_> = schedule(5, Duration::from_secs(1), BackoffStrategy::Fibonacci).collect();
        assert_eq!(
            s,
            vec![
                Duration::from_secs(1),
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(3),
            ]
        );
        assert_eq!(schedule(1, Duration::from_secs(1), BackoffStrategy::None).count(), 0);
        assert_eq!(
            schedule(u32::MAX, Duration::from_secs(1), BackoffStrategy::None).size_hint(),
            ((u32::MAX - 1) as usize, Some((u32::MAX - 1) as usize))
        );
    }

    #[test]
    fn parse_and_display_names() {
        assert_eq!("none".parse::<BackoffStrategy>(), Ok(BackoffStrategy::None));
        assert_eq!(
            "attempt-multiple".parse::<BackoffStrategy>(),
            Ok(BackoffStrategy::AttemptMultiple)
        );
        assert_eq!(
            "linear".parse::<BackoffStrategy>(),
            Ok(BackoffStrategy::AttemptMultiple)
        );
        assert_eq!(
            "Fibonacci".parse::<BackoffStrategy>(),
            Ok(BackoffStrategy::Fibonacci)
        );
        assert!("exponential".parse::<BackoffStrategy>().is_err());
        assert_eq!(BackoffStrategy::AttemptMultiple.to_string(), "attempt_multiple");
    }
}
