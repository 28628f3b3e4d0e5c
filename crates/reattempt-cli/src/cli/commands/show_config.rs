//! `reattempt config` – show where settings come from and what they resolve to.

use anyhow::Result;
use reattempt_core::config::{self, ReattemptConfig};

pub fn run_show_config(cfg: &ReattemptConfig) -> Result<()> {
    let path = config::config_path()?;
    println!("# {}", path.display());
    let effective = ReattemptConfig {
        retry: Some(cfg.retry_settings()),
    };
    print!("{}", toml::to_string_pretty(&effective)?);
    Ok(())
}
