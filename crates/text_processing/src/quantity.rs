//! Quantity association
//!
//! For each accepted alias match, find the quantity that belongs to it by
//! looking at a bounded window before and after the match. Candidates are
//! tried in a fixed priority order:
//!
//! 1. digits right before the match
//! 2. number word right before the match
//! 3. digits right after the match (unless followed by a currency marker)
//! 4. number word right after the match
//!
//! The first candidate whose span is still unclaimed wins and is claimed.
//! With no candidate the quantity defaults to 1 and nothing is consumed.

use serde::Serialize;

use voice_bill_config::ParserConfig;

use crate::lexicon::QuantityLexicon;
use crate::span::{window_end, window_start, ConsumedSpans, MatchSpan};

/// Quantity attributed to one alias match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuantityMatch {
    pub quantity: u32,
    /// `None` when the quantity defaulted to 1
    pub span: Option<MatchSpan>,
}

impl QuantityMatch {
    pub fn defaulted() -> Self {
        Self {
            quantity: 1,
            span: None,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        self.span.is_none()
    }
}

/// Search window sizes, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityWindows {
    pub lookbehind_chars: usize,
    pub lookahead_chars: usize,
}

impl Default for QuantityWindows {
    fn default() -> Self {
        Self::from(&ParserConfig::default())
    }
}

impl From<&ParserConfig> for QuantityWindows {
    fn from(config: &ParserConfig) -> Self {
        Self {
            lookbehind_chars: config.quantity_lookbehind_chars,
            lookahead_chars: config.quantity_lookahead_chars,
        }
    }
}

/// Find and claim the quantity for the alias match at `alias`
pub fn associate_quantity(
    text: &str,
    alias: MatchSpan,
    consumed: &mut ConsumedSpans,
    lexicon: &QuantityLexicon,
    windows: QuantityWindows,
) -> QuantityMatch {
    let before = window_start(text, alias.start, windows.lookbehind_chars);
    let after = window_end(text, alias.end, windows.lookahead_chars);

    // A digit run after the item followed by a currency marker is its price
    // ("செருப்பு 200 ரூ"), so the after-digits candidate skips it
    let after_digits = lexicon
        .digits_starting_at(text, alias.end, after)
        .filter(|(span, _)| !lexicon.is_price_marker_at(text, span.end));

    let candidates = [
        lexicon.digits_ending_at(text, before, alias.start),
        lexicon.word_ending_at(text, before, alias.start),
        after_digits,
        lexicon.word_starting_at(text, alias.end, after),
    ];

    for (span, quantity) in candidates.into_iter().flatten() {
        if consumed.claim(span) {
            return QuantityMatch {
                quantity,
                span: Some(span),
            };
        }
        tracing::trace!(
            candidate = span.slice(text),
            "Quantity already attributed to another item"
        );
    }

    QuantityMatch::defaulted()
}
