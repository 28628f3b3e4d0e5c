//! Waiting between attempts.
//!
//! The loop never sleeps directly; it goes through one of these traits so
//! callers (and tests) decide how time passes.

use std::future::Future;
use std::time::Duration;

/// Blocking wait used by [`execute`](super::execute) and friends.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Blocks the calling thread only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// Non-blocking wait used by [`execute_async`](super::execute_async).
pub trait AsyncSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Awaits a tokio timer; other tasks keep running while a retry waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl AsyncSleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
