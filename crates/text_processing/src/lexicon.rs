//! Quantity lexicon
//!
//! Number words in standard Tamil, colloquial Tamil, transliterated Tanglish
//! and English, plus a few unit words (dozen, kilo) and Arabic/Tamil digits.
//!
//! Words are sorted longest-first before being compiled into the lookup
//! regexes so a longer word is never shadowed by a shorter one sharing a
//! prefix or suffix ("பதினொன்று" vs "ஒன்று", "half dozen" vs "dozen").

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

use crate::error::{compile, Result};
use crate::normalizer::compose;
use crate::span::MatchSpan;

/// Built-in number words (word -> value)
const BUILTIN_NUMBER_WORDS: &[(&str, u32)] = &[
    // Standard Tamil
    ("ஒன்று", 1),
    ("இரண்டு", 2),
    ("மூன்று", 3),
    ("நான்கு", 4),
    ("ஐந்து", 5),
    ("ஆறு", 6),
    ("ஏழு", 7),
    ("எட்டு", 8),
    ("ஒன்பது", 9),
    ("பத்து", 10),
    ("பதினொன்று", 11),
    ("பன்னிரண்டு", 12),
    ("பதினைந்து", 15),
    ("இருபது", 20),
    // Colloquial Tamil
    ("ஒரு", 1),
    ("ஒண்ணு", 1),
    ("ஒன்னு", 1),
    ("ரெண்டு", 2),
    ("இரெண்டு", 2),
    ("மூணு", 3),
    ("மூனு", 3),
    ("நாலு", 4),
    ("அஞ்சு", 5),
    ("பதினொண்ணு", 11),
    ("பன்னெண்டு", 12),
    // Transliterated
    ("onnu", 1),
    ("oru", 1),
    ("ondru", 1),
    ("rendu", 2),
    ("randu", 2),
    ("irandu", 2),
    ("moonu", 3),
    ("munu", 3),
    ("moonru", 3),
    ("naalu", 4),
    ("nalu", 4),
    ("anju", 5),
    ("ainthu", 5),
    ("aaru", 6),
    ("ezhu", 7),
    ("yezhu", 7),
    ("ettu", 8),
    ("yettu", 8),
    ("onbathu", 9),
    ("ombodhu", 9),
    ("pathu", 10),
    ("patthu", 10),
    ("pannendu", 12),
    ("irupathu", 20),
    // English
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("fifteen", 15),
    ("twenty", 20),
    // Units
    ("dozen", 12),
    ("half dozen", 6),
    ("டஜன்", 12),
    ("அரை டஜன்", 6),
    ("kg", 1),
    ("kilo", 1),
    ("கிலோ", 1),
];

/// Currency markers that turn a trailing digit run into a price mention
const CURRENCY_MARKERS: &[&str] = &[
    "ரூபாய்", "ரூபா", "ரூ", "rupees", "rupee", "rupai", "rubai", "roobai", "rs", "₹",
];

static DIGITS_BEFORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9௦-௯]+)\s*$").unwrap());

static DIGITS_AFTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([0-9௦-௯]+)").unwrap());

/// Number-word and digit recognizer
///
/// Immutable once built; share it by reference.
#[derive(Debug, Clone)]
pub struct QuantityLexicon {
    words: HashMap<String, u32>,
    longest_first: Vec<String>,
    word_before: Regex,
    word_after: Regex,
    currency_after: Regex,
}

impl Default for QuantityLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl QuantityLexicon {
    /// Lexicon with only the built-in words
    pub fn builtin() -> Self {
        Self::with_extra_words(&BTreeMap::new())
            .expect("built-in number words are escaped and always compile")
    }

    /// Lexicon with configured words merged over the built-ins
    pub fn with_extra_words(extra: &BTreeMap<String, u32>) -> Result<Self> {
        let mut words: HashMap<String, u32> = BUILTIN_NUMBER_WORDS
            .iter()
            .map(|(word, value)| (compose(word), *value))
            .collect();

        for (word, value) in extra {
            let word = compose(word.trim());
            if word.is_empty() || *value == 0 {
                tracing::warn!(word = %word, value, "Ignoring invalid extra number word");
                continue;
            }
            words.insert(word, *value);
        }

        let mut longest_first: Vec<String> = words.keys().cloned().collect();
        longest_first.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });

        let alternation = longest_first
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");

        let currency_alternation = CURRENCY_MARKERS
            .iter()
            .map(|w| regex::escape(&compose(w)))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            word_before: compile("number words (before)", &format!(r"(?i)(?:{})\s*$", alternation))?,
            word_after: compile("number words (after)", &format!(r"(?i)^\s*(?:{})", alternation))?,
            currency_after: compile(
                "currency markers",
                &format!(r"(?i)^\s*(?:{})(?:\s|$)", currency_alternation),
            )?,
            words,
            longest_first,
        })
    }

    /// Exact lookup, retrying lowercase for Latin-script words
    pub fn lookup(&self, word: &str) -> Option<u32> {
        self.words
            .get(word)
            .or_else(|| self.words.get(&word.to_lowercase()))
            .copied()
    }

    /// All words, longest first
    pub fn words_longest_first(&self) -> &[String] {
        &self.longest_first
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Digit run ending (modulo whitespace) exactly at `end`, starting at or after `window_start`
    pub fn digits_ending_at(&self, text: &str, window_start: usize, end: usize) -> Option<(MatchSpan, u32)> {
        let caps = DIGITS_BEFORE.captures(&text[window_start..end])?;
        let m = caps.get(1)?;
        let span = MatchSpan::new(window_start + m.start(), window_start + m.end());

        // A run cut by the window edge is part of a longer number
        if prev_char(text, span.start).is_some_and(is_digit) {
            return None;
        }

        Some((span, parse_digits(m.as_str())?))
    }

    /// Number word ending (modulo whitespace) exactly at `end`, starting at or after `window_start`
    pub fn word_ending_at(&self, text: &str, window_start: usize, end: usize) -> Option<(MatchSpan, u32)> {
        let m = self.word_before.find(&text[window_start..end])?;
        let word = m.as_str().trim_end();
        let span = MatchSpan::new(window_start + m.start(), window_start + m.start() + word.len());

        if !is_boundary(prev_char(text, span.start)) {
            return None;
        }

        Some((span, self.lookup(word)?))
    }

    /// Digit run starting (modulo whitespace) exactly at `start`, ending at or before `window_end`
    pub fn digits_starting_at(&self, text: &str, start: usize, window_end: usize) -> Option<(MatchSpan, u32)> {
        let caps = DIGITS_AFTER.captures(&text[start..])?;
        let m = caps.get(1)?;
        let span = MatchSpan::new(start + m.start(), start + m.end());

        if span.end > window_end {
            return None;
        }

        Some((span, parse_digits(m.as_str())?))
    }

    /// Number word starting (modulo whitespace) exactly at `start`, ending at or before `window_end`
    pub fn word_starting_at(&self, text: &str, start: usize, window_end: usize) -> Option<(MatchSpan, u32)> {
        let m = self.word_after.find(&text[start..])?;
        let leading_ws = m.as_str().len() - m.as_str().trim_start().len();
        let span = MatchSpan::new(start + m.start() + leading_ws, start + m.end());

        if span.end > window_end || !is_boundary(text[span.end..].chars().next()) {
            return None;
        }

        Some((span, self.lookup(span.slice(text))?))
    }

    /// Whether a currency marker follows `pos` (the digits before it are a price)
    pub fn is_price_marker_at(&self, text: &str, pos: usize) -> bool {
        self.currency_after.is_match(&text[pos..])
    }
}

/// Parse an ASCII or Tamil digit run; zero and overflow are not quantities
pub fn parse_digits(digits: &str) -> Option<u32> {
    let mut value: u32 = 0;
    for c in digits.chars() {
        let digit = match c {
            '0'..='9' => c as u32 - '0' as u32,
            '\u{0BE6}'..='\u{0BEF}' => c as u32 - 0x0BE6,
            _ => return None,
        };
        value = value.checked_mul(10)?.checked_add(digit)?;
    }
    (value > 0).then_some(value)
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || ('\u{0BE6}'..='\u{0BEF}').contains(&c)
}

fn prev_char(text: &str, pos: usize) -> Option<char> {
    text[..pos].chars().next_back()
}

/// Words must be delimited by whitespace or the text edge
fn is_boundary(c: Option<char>) -> bool {
    c.map_or(true, |c| c.is_whitespace() || c.is_ascii_punctuation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_scripts() {
        let lexicon = QuantityLexicon::builtin();
        assert_eq!(lexicon.lookup("ரெண்டு"), Some(2));
        assert_eq!(lexicon.lookup("இரண்டு"), Some(2));
        assert_eq!(lexicon.lookup("மூணு"), Some(3));
        assert_eq!(lexicon.lookup("moonu"), Some(3));
        assert_eq!(lexicon.lookup("Three"), Some(3));
        assert_eq!(lexicon.lookup("dozen"), Some(12));
        assert_eq!(lexicon.lookup("அரை டஜன்"), Some(6));
        assert_eq!(lexicon.lookup("dosa"), None);
    }

    #[test]
    fn test_longest_first_ordering() {
        let lexicon = QuantityLexicon::builtin();
        let words = lexicon.words_longest_first();
        for pair in words.windows(2) {
            assert!(pair[0].chars().count() >= pair[1].chars().count());
        }
        let eleven = words.iter().position(|w| w == "பதினொன்று").unwrap();
        let one = words.iter().position(|w| w == "ஒன்று").unwrap();
        assert!(eleven < one);
    }

    #[test]
    fn test_extra_words_override() {
        let mut extra = BTreeMap::new();
        extra.insert("rendey".to_string(), 2);
        extra.insert("one".to_string(), 11);
        let lexicon = QuantityLexicon::with_extra_words(&extra).unwrap();
        assert_eq!(lexicon.lookup("rendey"), Some(2));
        assert_eq!(lexicon.lookup("one"), Some(11));
    }

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits("12"), Some(12));
        assert_eq!(parse_digits("௩"), Some(3));
        assert_eq!(parse_digits("0"), None);
        assert_eq!(parse_digits("99999999999"), None);
    }

    #[test]
    fn test_word_ending_at_prefers_longest() {
        let lexicon = QuantityLexicon::builtin();
        let text = "half dozen idli";
        let end = text.find("idli").unwrap();
        let (span, value) = lexicon.word_ending_at(text, 0, end).unwrap();
        assert_eq!(value, 6);
        assert_eq!(span.slice(text), "half dozen");
    }

    #[test]
    fn test_word_ending_at_requires_boundary() {
        let lexicon = QuantityLexicon::builtin();
        // "someone" ends in "one" but is not a number word
        let text = "someone tea";
        let end = text.find("tea").unwrap();
        assert!(lexicon.word_ending_at(text, 0, end).is_none());
    }

    #[test]
    fn test_digits_ending_at_window_edge() {
        let lexicon = QuantityLexicon::builtin();
        let text = "1234 dosa";
        let end = text.find("dosa").unwrap();
        // Window starting inside the run would truncate "1234"
        assert!(lexicon.digits_ending_at(text, 2, end).is_none());
        let (span, value) = lexicon.digits_ending_at(text, 0, end).unwrap();
        assert_eq!(value, 1234);
        assert_eq!(span, MatchSpan::new(0, 4));
    }

    #[test]
    fn test_after_side() {
        let lexicon = QuantityLexicon::builtin();
        let text = "dosa 3 vadai rendu";
        let start = "dosa".len();
        let (span, value) = lexicon.digits_starting_at(text, start, text.len()).unwrap();
        assert_eq!(value, 3);
        assert_eq!(span.slice(text), "3");

        let vadai_end = text.find("vadai").unwrap() + "vadai".len();
        let (span, value) = lexicon.word_starting_at(text, vadai_end, text.len()).unwrap();
        assert_eq!(value, 2);
        assert_eq!(span.slice(text), "rendu");
    }

    #[test]
    fn test_after_word_requires_boundary() {
        let lexicon = QuantityLexicon::builtin();
        let text = "tea onex";
        assert!(lexicon.word_starting_at(text, 3, text.len()).is_none());
    }

    #[test]
    fn test_price_marker() {
        let lexicon = QuantityLexicon::builtin();
        let text = "கம்பி 50 ரூபாய் மூணு";
        let after_digits = text.find("50").unwrap() + 2;
        assert!(lexicon.is_price_marker_at(text, after_digits));

        let text = "dosa 2 rs";
        assert!(lexicon.is_price_marker_at(text, 6));
        assert!(!lexicon.is_price_marker_at("dosa 2 idli", 6));
    }
}
