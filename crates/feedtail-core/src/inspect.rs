//! Fetch a tail, scan it for links, and package the findings.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::FeedtailConfig;
use crate::decode;
use crate::error::FetchError;
use crate::extract::{self, LinkReport};
use crate::fetch::{self, FetchOptions, FetchOutcome, FetchResult, RangeIgnored, StrategyChoice};
use crate::tail_buffer::TailBuffer;

/// Where the tail came from and how it was obtained.
#[derive(Debug, Clone, Serialize)]
pub struct Source {
    /// URL or local path.
    pub location: String,
    /// HTTP status; `None` for local files.
    pub status: Option<u32>,
    pub strategy: Option<fetch::TailStrategy>,
    pub server_honored_range: bool,
    pub fell_back: bool,
    pub total_bytes_seen: u64,
    pub tail_bytes: usize,
}

/// Everything shown to the user for one run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source: Source,
    /// Last `snippet_chars` characters of the decoded tail.
    pub snippet: String,
    /// `<title>` found in the tail, if any.
    pub title: Option<String>,
    pub links: LinkReport,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Inspection {
    Report(Report),
    /// Range request answered with 200 and no fallback was allowed.
    RangeIgnored(RangeIgnored),
}

/// Builds a report from already-decoded tail text.
pub fn report_from_text(source: Source, text: &str, snippet_chars: usize) -> Report {
    Report {
        snippet: decode::tail_chars(text, snippet_chars).to_string(),
        title: decode::title_hint(text),
        links: extract::extract_links(text),
        source,
    }
}

fn report_from_fetch(url: &str, result: &FetchResult, snippet_chars: usize) -> Report {
    let source = Source {
        location: url.to_string(),
        status: Some(result.status),
        strategy: Some(result.strategy),
        server_honored_range: result.server_honored_range,
        fell_back: result.fell_back,
        total_bytes_seen: result.total_bytes_seen,
        tail_bytes: result.tail.len(),
    };
    report_from_text(source, &result.text(), snippet_chars)
}

/// Fetches the configured feed tail with `choice` and extracts links from it.
pub fn inspect(cfg: &FeedtailConfig, choice: StrategyChoice) -> Result<Inspection, FetchError> {
    let opts = FetchOptions::from(cfg);
    match fetch::fetch(&cfg.url, choice, &opts)? {
        FetchOutcome::Tail(result) => {
            let report = report_from_fetch(&cfg.url, &result, cfg.snippet_chars);
            tracing::info!(
                dated = report.links.dated.len(),
                current_week = report.links.current_week_reference,
                "links extracted"
            );
            Ok(Inspection::Report(report))
        }
        FetchOutcome::RangeIgnored(ignored) => Ok(Inspection::RangeIgnored(ignored)),
    }
}

/// Reads the last `max_tail_bytes` of a local file through the rolling
/// buffer and extracts links from it.
pub fn inspect_file(path: &Path, cfg: &FeedtailConfig) -> Result<Report> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut tail = TailBuffer::new(cfg.max_tail_bytes);
    let mut buf = vec![0u8; cfg.chunk_size.max(1)];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        tail.push(&buf[..n]);
    }
    let source = Source {
        location: path.display().to_string(),
        status: None,
        strategy: None,
        server_honored_range: false,
        fell_back: false,
        total_bytes_seen: tail.total_seen(),
        tail_bytes: tail.len(),
    };
    let text = decode::decode_lossy(&tail.into_bytes());
    Ok(report_from_text(source, &text, cfg.snippet_chars))
}
