//! Match spans and consumed-span bookkeeping
//!
//! Offsets are byte offsets into the normalized text and always fall on
//! `char` boundaries.

use serde::Serialize;

/// A `[start, end)` range of normalized text attributed to one token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} after end {}", start, end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Half-open overlap test
    pub fn overlaps(&self, other: &MatchSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Slice of `text` covered by this span
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Byte offset `chars` characters before `pos`, clamped to the start of `text`
pub fn window_start(text: &str, pos: usize, chars: usize) -> usize {
    if chars == 0 {
        return pos;
    }
    text[..pos]
        .char_indices()
        .rev()
        .nth(chars - 1)
        .map_or(0, |(i, _)| i)
}

/// Byte offset `chars` characters after `pos`, clamped to the end of `text`
pub fn window_end(text: &str, pos: usize, chars: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(chars)
        .map_or(text.len(), |(i, _)| pos + i)
}

/// Quantity spans already attributed to an item during one parse call
///
/// A spoken order is a few dozen tokens, so a linear scan is enough.
#[derive(Debug, Default)]
pub struct ConsumedSpans {
    spans: Vec<MatchSpan>,
}

impl ConsumedSpans {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `span` overlaps anything already claimed
    pub fn is_free(&self, span: &MatchSpan) -> bool {
        !self.spans.iter().any(|used| used.overlaps(span))
    }

    /// Claim `span`; returns false (and claims nothing) if it overlaps a claimed span
    pub fn claim(&mut self, span: MatchSpan) -> bool {
        if !self.is_free(&span) {
            return false;
        }
        self.spans.push(span);
        true
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchSpan> {
        self.spans.iter()
    }
}
