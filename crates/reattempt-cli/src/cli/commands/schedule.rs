//! `reattempt schedule` – show the backoff a failing run would go through.

use anyhow::Result;
use reattempt_core::backoff;
use reattempt_core::config::RetrySettings;
use serde::Serialize;
use std::time::Duration;

/// Most rows printed; larger budgets are summarised.
pub(crate) const MAX_ROWS: usize = 1000;

/// One wait between two attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ScheduledWait {
    /// Number of failed attempts before this wait.
    pub after_attempt: u32,
    pub wait_ms: u64,
    /// Time spent waiting so far, including this wait.
    pub total_ms: u64,
}

/// The first `MAX_ROWS` waits. Rejects settings the engine would reject.
pub(crate) fn schedule_rows(settings: &RetrySettings) -> Result<Vec<ScheduledWait>> {
    settings.to_config::<()>()?;
    let mut total = Duration::ZERO;
    let rows = backoff::schedule(settings.attempts, settings.delay(), settings.backoff)
        .zip(1u32..)
        .take(MAX_ROWS)
        .map(|(wait, after_attempt)| {
            total = total.saturating_add(wait);
            ScheduledWait {
                after_attempt,
                wait_ms: millis(wait),
                total_ms: millis(total),
            }
        })
        .collect();
    Ok(rows)
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

pub fn run_schedule(settings: RetrySettings, json: bool) -> Result<()> {
    let rows = schedule_rows(&settings)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    println!(
        "{} attempts, base delay {}ms, backoff {}",
        settings.attempts, settings.delay_ms, settings.backoff
    );
    if rows.is_empty() {
        println!("No retries.");
        return Ok(());
    }
    println!("{:<8} {:<12} {}", "AFTER", "WAIT_MS", "TOTAL_MS");
    for r in &rows {
        println!("{:<8} {:<12} {}", r.after_attempt, r.wait_ms, r.total_ms);
    }
    let retries = settings.attempts.saturating_sub(1) as usize;
    if retries > rows.len() {
        println!("... {} more not shown", retries - rows.len());
    }
    Ok(())
}
