//! `feedtail inspect` – fetch the feed tail and report links.

use anyhow::{Context, Result};
use feedtail_core::config::FeedtailConfig;
use feedtail_core::inspect;
use feedtail_core::report;

pub fn run_inspect(cfg: &FeedtailConfig, json: bool) -> Result<()> {
    let choice = cfg.strategy();
    if !json {
        println!("--- CONNECTING TO {} ---", cfg.url);
    }
    let inspection = inspect::inspect(cfg, choice)
        .with_context(|| format!("inspect {}", cfg.url))?;
    if json {
        println!("{}", report::render_json(&inspection)?);
    } else {
        print!("{}", report::render_text(&inspection, cfg.snippet_chars));
    }
    Ok(())
}
