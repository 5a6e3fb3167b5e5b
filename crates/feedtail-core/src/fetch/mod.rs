//! Tail fetcher.
//!
//! Obtains at most the last `max_tail_bytes` of a remote document using one of
//! the [`TailStrategy`] variants. `Auto` tries a range request first and falls
//! back to streaming through a rolling buffer when the server ignores ranges.
//! Runs in the current thread; there is no retry.

mod strategy;
mod transfer;

pub use strategy::{StatusAction, StrategyChoice, TailStrategy};

use serde::Serialize;
use std::time::Duration;

use crate::config::FeedtailConfig;
use crate::decode;
use crate::error::FetchError;

/// Per-request settings, usually derived from [`FeedtailConfig`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub max_tail_bytes: usize,
    pub chunk_size: usize,
    pub connect_timeout: Duration,
    /// Longest allowed gap without received bytes.
    pub read_timeout: Duration,
    pub max_transfer: Duration,
    pub user_agent: String,
}

impl From<&FeedtailConfig> for FetchOptions {
    fn from(cfg: &FeedtailConfig) -> Self {
        Self {
            max_tail_bytes: cfg.max_tail_bytes,
            chunk_size: cfg.chunk_size,
            connect_timeout: cfg.connect_timeout(),
            read_timeout: cfg.read_timeout(),
            max_transfer: cfg.max_transfer(),
            user_agent: cfg.user_agent.clone(),
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&FeedtailConfig::default())
    }
}

/// Tail obtained by one fetch.
#[derive(Debug, Clone, Serialize)]
pub struct FetchResult {
    pub status: u32,
    pub strategy: TailStrategy,
    /// Retained bytes, at most `max_tail_bytes`.
    #[serde(skip)]
    pub tail: Vec<u8>,
    /// Body bytes received, including those trimmed from the front.
    pub total_bytes_seen: u64,
    pub server_honored_range: bool,
    /// A range request was ignored first and this tail came from streaming.
    pub fell_back: bool,
}

impl FetchResult {
    /// Tail decoded as UTF-8, malformed sequences replaced.
    pub fn text(&self) -> String {
        decode::decode_lossy(&self.tail)
    }
}

/// Range request answered with the whole document; nothing was kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeIgnored {
    pub status: u32,
    pub strategy: TailStrategy,
    /// Body bytes accepted before the abort (zero unless the server misbehaves).
    pub bytes_consumed: u64,
}

#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Tail(FetchResult),
    /// Warning outcome, not an error.
    RangeIgnored(RangeIgnored),
}

/// Runs exactly one strategy against `url`.
pub fn fetch_tail(
    url: &str,
    strategy: TailStrategy,
    opts: &FetchOptions,
) -> Result<FetchOutcome, FetchError> {
    tracing::info!(url, %strategy, max_tail_bytes = opts.max_tail_bytes, "fetching tail");
    transfer::perform(url, strategy, opts)
}

/// Runs the selected strategy; `Auto` falls back from `Range` to `Stream`.
///
/// Only an ignored range triggers the fallback. Network errors and unexpected
/// statuses end the run.
pub fn fetch(
    url: &str,
    choice: StrategyChoice,
    opts: &FetchOptions,
) -> Result<FetchOutcome, FetchError> {
    if let Some(strategy) = choice.fixed() {
        return fetch_tail(url, strategy, opts);
    }
    match fetch_tail(url, TailStrategy::Range, opts)? {
        FetchOutcome::RangeIgnored(ignored) => {
            tracing::info!(
                url,
                status = ignored.status,
                "range ignored; falling back to streaming rolling buffer"
            );
            match fetch_tail(url, TailStrategy::Stream, opts)? {
                FetchOutcome::Tail(mut result) => {
                    result.fell_back = true;
                    Ok(FetchOutcome::Tail(result))
                }
                other => Ok(other),
            }
        }
        tail => Ok(tail),
    }
}
