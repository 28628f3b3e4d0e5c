//! `reattempt exec` – run a program through the async retry loop.

use anyhow::{anyhow, Context, Result};
use reattempt_core::config::RetrySettings;
use reattempt_core::retry;
use std::io::Write;
use std::process::{Output, Stdio};
use tokio::process::Command;

/// Bytes of stderr kept when a run exits non-zero.
const STDERR_TAIL: usize = 512;

/// Run `command` until it exits 0 (and, if given, its stdout contains
/// `until_stdout`), then print its stdout.
pub async fn run_exec(
    settings: RetrySettings,
    until_stdout: Option<&str>,
    command: &[String],
) -> Result<()> {
    let (program, args) = command.split_first().context("no command given")?;
    let needle = until_stdout.map(str::to_owned);
    let cfg = settings
        .to_config::<Output>()?
        .with_predicate(move |out: &Output| stdout_matches(out, needle.as_deref()));

    tracing::info!(
        program = %program,
        attempts = settings.attempts,
        backoff = %settings.backoff,
        "running command with retries"
    );

    let output = retry::run_async(&cfg, || {
        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null());
        async move {
            let mut cmd = cmd;
            // Engine renders errors with `Display`, so keep the cause in one message.
            let out = cmd
                .output()
                .await
                .map_err(|e| anyhow!("failed to start `{}`: {}", program, e))?;
            tracing::debug!(status = %out.status, "command finished");
            check_exit(out)
        }
    })
    .await
    .with_context(|| format!("`{}` never succeeded", program))?;

    std::io::stdout().write_all(&output.stdout)?;
    Ok(())
}

/// Turn a non-zero exit into an attempt error carrying the status and the
/// tail of stderr.
pub(crate) fn check_exit(out: Output) -> Result<Output> {
    if out.status.success() {
        return Ok(out);
    }
    let stderr = String::from_utf8_lossy(&out.stderr);
    let stderr = stderr.trim_end();
    if stderr.is_empty() {
        return Err(anyhow!("{}", out.status));
    }
    let start = stderr.len().saturating_sub(STDERR_TAIL);
    let start = (start..stderr.len())
        .find(|&i| stderr.is_char_boundary(i))
        .unwrap_or(stderr.len());
    Err(anyhow!("{}: {}", out.status, &stderr[start..]))
}

/// Stdout contains `needle` when one is given.
pub(crate) fn stdout_matches(out: &Output, needle: Option<&str>) -> bool {
    match needle {
        Some(n) => String::from_utf8_lossy(&out.stdout).contains(n),
        None => true,
    }
}
