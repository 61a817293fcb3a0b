//! Transcript normalization
//!
//! Produces the canonical string every later stage matches against:
//! NFC-composed, format characters (ZWJ, ZWNJ, ZWSP, BOM) removed,
//! punctuation replaced by spaces, whitespace collapsed and trimmed.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static FORMAT_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Cf}+").unwrap());

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{P}").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a raw transcript
///
/// `None` and empty input both yield an empty string. The result is a fixed
/// point: normalizing it again returns it unchanged.
///
/// # Examples
/// ```
/// use voice_bill_text_processing::normalize;
/// assert_eq!(normalize(Some("  2 dosa,  3 vadai!! ")), "2 dosa 3 vadai");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(text) if !text.is_empty() => text,
        _ => return String::new(),
    };

    let composed: String = raw.nfc().collect();
    let without_format = FORMAT_CHARS.replace_all(&composed, "");
    let without_punct = PUNCTUATION.replace_all(&without_format, " ");
    WHITESPACE
        .replace_all(&without_punct, " ")
        .trim()
        .to_string()
}

/// NFC-compose a pattern or lexicon entry so it lines up with normalized text
pub(crate) fn compose(text: &str) -> String {
    text.nfc().collect()
}
