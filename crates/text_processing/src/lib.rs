//! Deterministic Tamil/Tanglish order parsing
//!
//! This crate turns noisy spoken-order transcripts into priced order lines
//! without any model call:
//! - **Normalizer**: NFC, format-character removal, punctuation and whitespace cleanup
//! - **Quantity Lexicon**: Tamil, colloquial Tamil, Tanglish and English number words
//! - **Alias Table**: per-item recognizers with qualifier exclusion
//! - **Quantity Association**: windowed quantity search with consumed-span tracking
//! - **Menu Resolver**: alias to catalog entry by name or include/exclude rules
//! - **Order Aggregator**: per-item quantity sums priced against the catalog
//!
//! # Example
//!
//! ```
//! use voice_bill_config::shop_catalog;
//! use voice_bill_text_processing::TanglishOrderParser;
//!
//! let parser = TanglishOrderParser::default();
//! let lines = parser.parse(Some("மூணு செருப்பு 200 ரூ"), &shop_catalog());
//!
//! assert_eq!(lines[0].item_name, "Shoes");
//! assert_eq!(lines[0].quantity, 3);
//! assert_eq!(lines[0].total_price, Some(600.0));
//! ```

pub mod aggregator;
pub mod aliases;
pub mod lexicon;
pub mod normalizer;
pub mod quantity;
pub mod resolver;
pub mod span;

mod error;
mod parser;

pub use error::{Result, TextProcessingError};
pub use parser::{parse_order, AliasMatch, ParseOutcome, TanglishOrderParser};

// Re-export key types
pub use aggregator::OrderAggregator;
pub use aliases::{AliasEntry, AliasKey, AliasTable};
pub use lexicon::QuantityLexicon;
pub use normalizer::normalize;
pub use quantity::{associate_quantity, QuantityMatch, QuantityWindows};
pub use resolver::{MenuResolver, ResolveRule};
pub use span::{ConsumedSpans, MatchSpan};
