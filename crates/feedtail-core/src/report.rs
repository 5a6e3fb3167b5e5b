//! Console and JSON rendering of an [`Inspection`].

use std::fmt::Write;

use crate::inspect::{Inspection, Report};

/// Human-readable report, one section per finding.
pub fn render_text(inspection: &Inspection, snippet_chars: usize) -> String {
    match inspection {
        Inspection::Report(report) => render_report(report, snippet_chars),
        Inspection::RangeIgnored(ignored) => format!(
            "HTTP Status Code: {}\n\
             WARNING: server ignored the Range header and would send the whole file ({} strategy).\n   \
             Transfer aborted after {} body bytes; no title or links to check.\n",
            ignored.status, ignored.strategy, ignored.bytes_consumed
        ),
    }
}

fn render_report(report: &Report, snippet_chars: usize) -> String {
    let mut out = String::new();
    let src = &report.source;

    let _ = writeln!(out, "--- {} ---", src.location);
    if let Some(status) = src.status {
        let _ = writeln!(out, "HTTP Status Code: {}", status);
    }
    if let Some(strategy) = src.strategy {
        let how = if src.fell_back {
            "range ignored, fell back to streaming"
        } else if src.server_honored_range {
            "server honored range"
        } else {
            "full body streamed"
        };
        let _ = writeln!(out, "Strategy: {} ({})", strategy, how);
    }
    let _ = writeln!(
        out,
        "Tail bytes: {} of {} received",
        src.tail_bytes, src.total_bytes_seen
    );
    if let Some(title) = &report.title {
        let _ = writeln!(out, "Title: {}", title);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "--- RAW TAIL CONTENT (LAST {} CHARS) ---", snippet_chars);
    let _ = writeln!(out, "{}", report.snippet);
    let _ = writeln!(out, "------------------------------------------");
    let _ = writeln!(out);

    let _ = writeln!(out, "--- EXTRACTING LINKS ---");
    let dated = &report.links.dated;
    if dated.is_empty() {
        let _ = writeln!(out, "NO TARGET URLS FOUND in the tail.");
    } else {
        let _ = writeln!(out, "FOUND {} TARGET URLS:", dated.len());
        for link in dated {
            let _ = writeln!(out, "   -> {}", link);
        }
    }
    if report.links.current_week_reference {
        let _ = writeln!(
            out,
            "Note: standard 'Default.aspx' reference found (current week)."
        );
    }
    out
}

/// Pretty JSON of the same data.
pub fn render_json(inspection: &Inspection) -> serde_json::Result<String> {
    serde_json::to_string_pretty(inspection)
}
