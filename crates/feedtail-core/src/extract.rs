//! Link extraction from decoded tail text.
//!
//! Looks for dated floor-calendar links (`Default.aspx?date=...`) and for the
//! weaker dateless "current week" reference. Absence of matches is a normal
//! result, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

static DATED_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"href=["'](https?://docs\.house\.gov/floor/Default\.aspx\?date=[0-9-]+)["']"#)
        .unwrap()
});

const CALENDAR_PAGE: &str = "Default.aspx";
const DATE_PARAM: &str = "date=";

/// Links found in one tail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    /// Unique dated calendar URLs, sorted.
    pub dated: Vec<String>,
    /// `Default.aspx` appears and `date=` appears nowhere in the tail.
    pub current_week_reference: bool,
}

impl LinkReport {
    pub fn is_empty(&self) -> bool {
        self.dated.is_empty() && !self.current_week_reference
    }
}

/// Scans `text` for dated calendar links and the current-week reference.
///
/// A tail holding both a dated link and a dateless one reports only the
/// dated link: any `date=` suppresses the current-week signal.
pub fn extract_links(text: &str) -> LinkReport {
    let dated: BTreeSet<String> = DATED_LINK_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    let current_week_reference = text.contains(CALENDAR_PAGE) && !text.contains(DATE_PARAM);

    LinkReport {
        dated: dated.into_iter().collect(),
        current_week_reference,
    }
}
