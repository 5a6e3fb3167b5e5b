//! `feedtail config` – show where the config lives and what it says.

use anyhow::Result;
use feedtail_core::config::{self, FeedtailConfig};
use std::path::Path;

pub fn run_config(cfg: &FeedtailConfig, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    println!("# {}", path.display());
    print!("{}", cfg.to_toml()?);
    Ok(())
}
