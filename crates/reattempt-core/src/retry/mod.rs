//! Retry engine.
//!
//! Invokes an operation until it returns a value the configured predicate
//! accepts, waiting between attempts according to the backoff strategy. Any
//! error the operation returns is retried; after the attempt budget is spent
//! the caller gets a single [`RetryExhausted`]. Error categories are not
//! distinguished, and there is no deadline or cancellation beyond the budget.

mod config;
mod error;
mod events;
mod outcome;
mod run;
mod run_async;
mod sleep;

pub use config::{Config, DEFAULT_ATTEMPTS, DEFAULT_DELAY};
pub use error::{ConfigError, LastError, RetryExhausted};
pub use events::{RetryLogger, TracingLogger, LOG_TARGET};
pub use outcome::Outcome;
pub use run::{execute, execute_with, run, run_with};
pub use run_async::{execute_async, execute_async_with, run_async, run_async_with};
pub use sleep::{AsyncSleeper, Sleeper, ThreadSleeper, TokioSleeper};
