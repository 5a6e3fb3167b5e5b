//! One HTTP GET through libcurl for a given strategy.
//!
//! The status line is captured in the header callback; the write callback
//! decides per chunk whether to keep the body, so a 200 answer to a range
//! request is aborted before a single body byte lands in the buffer.

use std::cell::{Cell, RefCell};
use std::str;

use super::strategy::{StatusAction, TailStrategy};
use super::{FetchOptions, FetchOutcome, FetchResult, RangeIgnored};
use crate::error::FetchError;
use crate::tail_buffer::TailBuffer;

pub(super) fn perform(
    url: &str,
    strategy: TailStrategy,
    opts: &FetchOptions,
) -> Result<FetchOutcome, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(opts.connect_timeout)?;
    // Read timeout: abort once nothing has arrived for `read_timeout`.
    easy.low_speed_limit(1)?;
    easy.low_speed_time(opts.read_timeout)?;
    easy.timeout(opts.max_transfer)?;

    let mut list = curl::easy::List::new();
    match strategy {
        TailStrategy::Range => {
            easy.range(&format!("-{}", opts.max_tail_bytes))?;
            // A compressed partial body cannot be decoded without its prefix.
            list.append("Accept-Encoding: identity")?;
        }
        TailStrategy::RangeCompressed => {
            easy.range(&format!("-{}", opts.max_tail_bytes))?;
            easy.accept_encoding("")?; // every encoding libcurl can decode
        }
        TailStrategy::Stream => {
            easy.buffer_size(opts.chunk_size)?;
        }
    }
    easy.http_headers(list)?;

    let status = Cell::new(0u32);
    let refused = Cell::new(None::<StatusAction>);
    let tail = RefCell::new(TailBuffer::new(opts.max_tail_bytes));

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Some(code) = str::from_utf8(data).ok().and_then(parse_status_line) {
                status.set(code);
            }
            true
        })?;
        transfer.write_function(|data| {
            match strategy.status_action(status.get()) {
                StatusAction::Keep => {
                    tail.borrow_mut().push(data);
                    Ok(data.len())
                }
                action => {
                    refused.set(Some(action));
                    Ok(0) // abort transfer
                }
            }
        })?;
        transfer.perform()
    };

    if let Err(e) = performed {
        if !(e.is_write_error() && refused.get().is_some()) {
            tracing::warn!(url, %strategy, "GET failed: {}", e);
            return Err(FetchError::Network(e));
        }
    }

    let code = match easy.response_code()? {
        0 => status.get(),
        c => c,
    };
    let tail = tail.into_inner();
    tracing::debug!(
        url,
        %strategy,
        status = code,
        kept = tail.len(),
        seen = tail.total_seen(),
        "GET finished"
    );

    match strategy.status_action(code) {
        StatusAction::Keep => {
            let total_bytes_seen = tail.total_seen();
            Ok(FetchOutcome::Tail(FetchResult {
                status: code,
                strategy,
                server_honored_range: code == 206,
                total_bytes_seen,
                tail: tail.into_bytes(),
                fell_back: false,
            }))
        }
        StatusAction::RangeIgnored => {
            tracing::warn!(url, %strategy, "server ignored Range header; transfer aborted");
            Ok(FetchOutcome::RangeIgnored(RangeIgnored {
                status: code,
                strategy,
                bytes_consumed: tail.total_seen(),
            }))
        }
        StatusAction::Unexpected => Err(FetchError::UnexpectedStatus(code)),
    }
}

/// Parses `HTTP/1.1 206 Partial Content` (or `HTTP/2 200`) into its code.
pub(super) fn parse_status_line(line: &str) -> Option<u32> {
    let mut parts = line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
}
