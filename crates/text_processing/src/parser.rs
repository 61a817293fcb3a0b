//! Deterministic order parsing engine
//!
//! Ties the stages together:
//! raw text → normalize → alias scan (table order) → quantity association →
//! aggregation → resolution against the caller's catalog.

use once_cell::sync::Lazy;
use serde::Serialize;

use voice_bill_config::ParserConfig;
use voice_bill_core::{CatalogItem, OrderLine, OrderParser};

use crate::aggregator::OrderAggregator;
use crate::aliases::{AliasKey, AliasTable};
use crate::error::{Result, TextProcessingError};
use crate::lexicon::QuantityLexicon;
use crate::normalizer::normalize;
use crate::quantity::{associate_quantity, QuantityMatch, QuantityWindows};
use crate::resolver::MenuResolver;
use crate::span::{ConsumedSpans, MatchSpan};

static DEFAULT_PARSER: Lazy<TanglishOrderParser> = Lazy::new(TanglishOrderParser::default);

/// Parse a transcript with the default engine
///
/// # Examples
/// ```
/// use voice_bill_config::restaurant_menu;
/// use voice_bill_text_processing::parse_order;
///
/// let lines = parse_order(Some("ரெண்டு தோசை, 3 vadai"), &restaurant_menu());
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[0].item_name, "Plain Dosa");
/// assert_eq!(lines[0].quantity, 2);
/// ```
pub fn parse_order(raw_text: Option<&str>, catalog: &[CatalogItem]) -> Vec<OrderLine> {
    DEFAULT_PARSER.parse(raw_text, catalog)
}

/// One accepted alias match and the quantity attributed to it
#[derive(Debug, Clone, Serialize)]
pub struct AliasMatch {
    pub key: AliasKey,
    pub span: MatchSpan,
    pub text: String,
    pub quantity: QuantityMatch,
}

/// Full trace of one parse call
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    pub normalized: String,
    pub matches: Vec<AliasMatch>,
    pub lines: Vec<OrderLine>,
}

impl ParseOutcome {
    fn empty() -> Self {
        Self {
            normalized: String::new(),
            matches: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Quantity spans claimed during the call, in claim order
    pub fn quantity_spans(&self) -> impl Iterator<Item = MatchSpan> + '_ {
        self.matches.iter().filter_map(|m| m.quantity.span)
    }
}

/// Regex-and-lexicon order parser
///
/// Built once from [`ParserConfig`] and immutable afterwards; share it via
/// `Arc`. Every call owns its consumed-span set and aggregator.
#[derive(Debug, Clone)]
pub struct TanglishOrderParser {
    lexicon: QuantityLexicon,
    aliases: AliasTable,
    resolver: MenuResolver,
    windows: QuantityWindows,
}

impl Default for TanglishOrderParser {
    fn default() -> Self {
        Self {
            lexicon: QuantityLexicon::builtin(),
            aliases: AliasTable::builtin(),
            resolver: MenuResolver::default(),
            windows: QuantityWindows::default(),
        }
    }
}

impl TanglishOrderParser {
    /// Build an engine from configuration
    pub fn from_config(config: &ParserConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| TextProcessingError::Config(e.to_string()))?;

        let parser = Self {
            lexicon: QuantityLexicon::with_extra_words(&config.extra_number_words)?,
            aliases: AliasTable::new(config.qualifier_window_chars)?,
            resolver: MenuResolver::new()?,
            windows: QuantityWindows::from(config),
        };

        tracing::info!(
            number_words = parser.lexicon.len(),
            aliases = parser.aliases.entries().len(),
            qualifier_window = config.qualifier_window_chars,
            lookbehind = config.quantity_lookbehind_chars,
            lookahead = config.quantity_lookahead_chars,
            "Order parser ready"
        );

        Ok(parser)
    }

    pub fn lexicon(&self) -> &QuantityLexicon {
        &self.lexicon
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Parse into priced order lines
    pub fn parse(&self, raw_text: Option<&str>, catalog: &[CatalogItem]) -> Vec<OrderLine> {
        self.parse_detailed(raw_text, catalog).lines
    }

    /// Parse and keep the intermediate matches
    pub fn parse_detailed(&self, raw_text: Option<&str>, catalog: &[CatalogItem]) -> ParseOutcome {
        let normalized = normalize(raw_text);
        if normalized.is_empty() {
            return ParseOutcome::empty();
        }

        let mut consumed = ConsumedSpans::new();
        let mut aggregator = OrderAggregator::new();
        let mut matches = Vec::new();

        for entry in self.aliases.entries() {
            for span in self.aliases.find_matches(entry, &normalized) {
                let quantity = associate_quantity(
                    &normalized,
                    span,
                    &mut consumed,
                    &self.lexicon,
                    self.windows,
                );

                tracing::debug!(
                    alias = %entry.key,
                    matched = span.slice(&normalized),
                    quantity = quantity.quantity,
                    defaulted = quantity.is_defaulted(),
                    "Alias matched"
                );

                aggregator.add(entry.key, quantity.quantity);
                matches.push(AliasMatch {
                    key: entry.key,
                    span,
                    text: span.slice(&normalized).to_string(),
                    quantity,
                });
            }
        }

        let lines = aggregator.into_lines(&self.resolver, catalog);

        ParseOutcome {
            normalized,
            matches,
            lines,
        }
    }
}

impl OrderParser for TanglishOrderParser {
    fn parse(&self, raw_text: Option<&str>, catalog: &[CatalogItem]) -> Vec<OrderLine> {
        TanglishOrderParser::parse(self, raw_text, catalog)
    }
}
