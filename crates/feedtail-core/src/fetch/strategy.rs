//! Tail acquisition strategies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A concrete way of obtaining the tail of a remote document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TailStrategy {
    /// `Range: bytes=-K` with `Accept-Encoding: identity`.
    Range,
    /// `Range: bytes=-K`, compression left to negotiation.
    RangeCompressed,
    /// Plain GET, whole body streamed through a rolling buffer.
    Stream,
}

impl TailStrategy {
    /// True if the request carries a `Range` header.
    pub fn requests_range(self) -> bool {
        matches!(self, TailStrategy::Range | TailStrategy::RangeCompressed)
    }

    /// What to do with a response carrying `status` under this strategy.
    pub fn status_action(self, status: u32) -> StatusAction {
        match (self.requests_range(), status) {
            (true, 206) => StatusAction::Keep,
            (true, 200) => StatusAction::RangeIgnored,
            (false, 200 | 206) => StatusAction::Keep,
            _ => StatusAction::Unexpected,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TailStrategy::Range => "range",
            TailStrategy::RangeCompressed => "range-compressed",
            TailStrategy::Stream => "stream",
        }
    }
}

impl fmt::Display for TailStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision for a response status, taken before any body byte is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    /// Body is (or ends with) the tail we want.
    Keep,
    /// Server sent the whole document to a range request; abort.
    RangeIgnored,
    /// Any other status; abort and report.
    Unexpected,
}

/// Strategy as selected by config or CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyChoice {
    /// Range first, streaming fallback when the range is ignored.
    #[default]
    Auto,
    Range,
    RangeCompressed,
    Stream,
}

impl StrategyChoice {
    /// The single strategy to run, or `None` for `Auto`.
    pub fn fixed(self) -> Option<TailStrategy> {
        match self {
            StrategyChoice::Auto => None,
            StrategyChoice::Range => Some(TailStrategy::Range),
            StrategyChoice::RangeCompressed => Some(TailStrategy::RangeCompressed),
            StrategyChoice::Stream => Some(TailStrategy::Stream),
        }
    }
}

impl FromStr for StrategyChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(StrategyChoice::Auto),
            "range" => Ok(StrategyChoice::Range),
            "range-compressed" => Ok(StrategyChoice::RangeCompressed),
            "stream" => Ok(StrategyChoice::Stream),
            other => Err(format!(
                "unknown strategy {other:?} (expected auto, range, range-compressed or stream)"
            )),
        }
    }
}
