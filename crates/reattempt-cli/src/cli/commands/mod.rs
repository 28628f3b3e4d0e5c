//! CLI command handlers, one per file.

mod completions;
mod exec;
mod schedule;
mod show_config;

pub use completions::run_completions;
pub use exec::run_exec;
pub use schedule::run_schedule;
pub use show_config::run_show_config;

#[cfg(test)]
pub(crate) use exec::{check_exit, stdout_matches};
#[cfg(test)]
pub(crate) use schedule::{schedule_rows, MAX_ROWS};
