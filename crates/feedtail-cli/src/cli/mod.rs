//! CLI for the feedtail RSS tail inspector.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use feedtail_core::config::{self, FeedtailConfig};
use feedtail_core::fetch::StrategyChoice;
use std::path::PathBuf;

use commands::{run_config, run_extract, run_inspect};

/// Top-level CLI for feedtail.
#[derive(Debug, Parser)]
#[command(name = "feedtail")]
#[command(about = "Fetch the tail of an RSS feed and extract dated calendar links", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/feedtail/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides shared by commands that read a tail.
#[derive(Debug, Clone, Default, Args)]
pub struct TailArgs {
    /// Keep at most this many trailing bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_tail_bytes: Option<usize>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch the feed tail and report the links found in it.
    Inspect {
        /// Feed URL (defaults to the configured one).
        #[arg(long, env = "FEEDTAIL_URL")]
        url: Option<String>,

        /// auto, range, range-compressed or stream.
        #[arg(long, value_name = "STRATEGY")]
        strategy: Option<StrategyChoice>,

        #[command(flatten)]
        tail: TailArgs,
    },

    /// Run the link extractor on the tail of a local file.
    Extract {
        /// Path to a saved feed.
        path: PathBuf,

        #[command(flatten)]
        tail: TailArgs,
    },

    /// Show the config file path and the effective configuration.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Inspect {
                url,
                strategy,
                tail,
            } => {
                let cfg = apply_overrides(cfg, url, strategy, &tail);
                cfg.validate()?;
                run_inspect(&cfg, tail.json)?;
            }
            CliCommand::Extract { path, tail } => {
                let cfg = apply_overrides(cfg, None, None, &tail);
                run_extract(&cfg, &path, tail.json)?;
            }
            CliCommand::Config => run_config(&cfg, cli.config.as_deref())?,
        }

        Ok(())
    }
}

pub(crate) fn load_config(path: Option<&std::path::Path>) -> Result<FeedtailConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

/// Applies command-line values on top of the file configuration.
pub(crate) fn apply_overrides(
    mut cfg: FeedtailConfig,
    url: Option<String>,
    strategy: Option<StrategyChoice>,
    tail: &TailArgs,
) -> FeedtailConfig {
    if let Some(url) = url {
        cfg.url = url;
    }
    if let Some(strategy) = strategy {
        cfg.strategy = Some(strategy);
    }
    if let Some(k) = tail.max_tail_bytes {
        cfg.max_tail_bytes = k;
    }
    cfg
}

#[cfg(test)]
mod tests;
