//! `feedtail extract <path>` – offline link extraction from a saved feed.

use anyhow::Result;
use feedtail_core::config::FeedtailConfig;
use feedtail_core::inspect::{self, Inspection};
use feedtail_core::report;
use std::path::Path;

pub fn run_extract(cfg: &FeedtailConfig, path: &Path, json: bool) -> Result<()> {
    let inspection = Inspection::Report(inspect::inspect_file(path, cfg)?);
    if json {
        println!("{}", report::render_json(&inspection)?);
    } else {
        print!("{}", report::render_text(&inspection, cfg.snippet_chars));
    }
    Ok(())
}
