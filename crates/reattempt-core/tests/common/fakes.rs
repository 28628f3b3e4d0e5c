//! Test doubles: a clock that records waits instead of sleeping and a logger
//! that keeps every event.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use reattempt_core::retry::{AsyncSleeper, RetryLogger, Sleeper};
use tracing::Level;

#[derive(Default)]
pub struct FakeClock {
    waits: Mutex<Vec<Duration>>,
}

impl FakeClock {
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }

    pub fn elapsed(&self) -> Duration {
        self.waits().iter().sum()
    }
}

impl Sleeper for FakeClock {
    fn sleep(&self, duration: Duration) {
        self.waits.lock().unwrap().push(duration);
    }
}

impl AsyncSleeper for FakeClock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        self.waits.lock().unwrap().push(duration);
        std::future::ready(())
    }
}

#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<(Level, String)>>,
}

impl MemoryLogger {
    pub fn events(&self) -> Vec<(Level, String)> {
        self.events.lock().unwrap().clone()
    }

    pub fn count_at(&self, level: Level) -> usize {
        self.events().iter().filter(|(l, _)| *l == level).count()
    }
}

impl RetryLogger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        self.events.lock().unwrap().push((level, message.to_string()));
    }
}
