pub mod backoff;
pub mod config;
pub mod logging;
pub mod retry;

pub use backoff::BackoffStrategy;
pub use retry::{execute, run, Config, Outcome, RetryExhausted};
