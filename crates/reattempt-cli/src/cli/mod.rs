//! CLI for the reattempt retry runner.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use reattempt_core::backoff::BackoffStrategy;
use reattempt_core::config::{self, ReattemptConfig, RetrySettings};

use commands::{run_completions, run_exec, run_schedule, run_show_config};

/// Top-level CLI for reattempt.
#[derive(Debug, Parser)]
#[command(name = "reattempt")]
#[command(about = "reattempt: run a command until it succeeds, with backoff", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Retry overrides shared by commands; unset flags fall back to config.toml.
#[derive(Debug, Clone, Default, Args)]
pub struct RetryArgs {
    /// Maximum number of attempts, including the first.
    #[arg(long, value_name = "N")]
    pub attempts: Option<u32>,

    /// Base delay between attempts in milliseconds.
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Backoff strategy: none, attempt_multiple (alias linear) or fibonacci.
    #[arg(long, value_name = "STRATEGY")]
    pub backoff: Option<BackoffStrategy>,
}

impl RetryArgs {
    /// Apply the flags that were given on top of `base`.
    pub fn apply(&self, base: RetrySettings) -> RetrySettings {
        RetrySettings {
            attempts: self.attempts.unwrap_or(base.attempts),
            delay_ms: self.delay_ms.unwrap_or(base.delay_ms),
            backoff: self.backoff.unwrap_or(base.backoff),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run a command, retrying until it exits successfully.
    Exec {
        #[command(flatten)]
        retry: RetryArgs,

        /// Also require stdout to contain this text before accepting a run.
        #[arg(long, value_name = "TEXT")]
        until_stdout: Option<String>,

        /// Program and arguments (put them after `--`).
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Print the wait before each retry if every attempt failed.
    Schedule {
        #[command(flatten)]
        retry: RetryArgs,

        /// Print as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show the config file path and effective retry settings.
    Config,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        cli.command.run(config::load_or_init).await
    }

    /// Dispatch the command. `load_config` is only called by commands that
    /// read settings, so `completions` never touches config.toml.
    pub async fn run<F>(self, load_config: F) -> Result<()>
    where
        F: FnOnce() -> Result<ReattemptConfig>,
    {
        let load = || -> Result<ReattemptConfig> {
            let cfg = load_config()?;
            tracing::debug!("loaded config: {:?}", cfg);
            Ok(cfg)
        };

        match self {
            CliCommand::Exec {
                retry,
                until_stdout,
                command,
            } => {
                let settings = retry.apply(load()?.retry_settings());
                run_exec(settings, until_stdout.as_deref(), &command).await?
            }
            CliCommand::Schedule { retry, json } => {
                run_schedule(retry.apply(load()?.retry_settings()), json)?
            }
            CliCommand::Config => run_show_config(&load()?)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
