//! Lenient text decoding of tail bytes.
//!
//! A tail cut can start or end in the middle of a multi-byte character, so
//! invalid UTF-8 is replaced with U+FFFD instead of failing the run.

use once_cell::sync::Lazy;
use regex::Regex;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());

/// Decodes bytes as UTF-8, replacing malformed sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Returns the last `max_chars` characters of `text` (human-readable snippet).
pub fn tail_chars(text: &str, max_chars: usize) -> &str {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }
    let skip = count - max_chars;
    match text.char_indices().nth(skip) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

/// First `<title>` text found in the chunk, trimmed. Sanity-check hint only.
pub fn title_hint(text: &str) -> Option<String> {
    TITLE_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_leading_character_is_replaced() {
        // "é" is 0xC3 0xA9; a tail cut leaves only the continuation byte.
        let bytes = [0xA9, b'<', b'a', b'>'];
        let text = decode_lossy(&bytes);
        assert_eq!(text, "\u{FFFD}<a>");
    }

    #[test]
    fn truncated_trailing_character_is_replaced() {
        let bytes = [b'o', b'k', 0xE2, 0x82];
        let text = decode_lossy(&bytes);
        assert!(text.starts_with("ok"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn valid_utf8_passes_through() {
        assert_eq!(decode_lossy("Résumé".as_bytes()), "Résumé");
    }

    #[test]
    fn tail_chars_counts_characters_not_bytes() {
        assert_eq!(tail_chars("abcdé", 2), "dé");
        assert_eq!(tail_chars("abc", 10), "abc");
        assert_eq!(tail_chars("abc", 0), "");
    }

    #[test]
    fn title_hint_found_case_insensitive() {
        let text = "<rss><channel><TITLE>\n Bills This Week </TITLE></channel>";
        assert_eq!(title_hint(text).as_deref(), Some("Bills This Week"));
    }

    #[test]
    fn title_hint_absent() {
        assert!(title_hint("<item><link>x</link></item>").is_none());
        assert!(title_hint("<title></title>").is_none());
    }
}
