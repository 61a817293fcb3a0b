//! Pluggable parser and fallback interfaces

use async_trait::async_trait;

use crate::{CatalogItem, OrderLine, Result};

/// Deterministic order parser interface
///
/// Implementations must be pure functions of `(raw_text, catalog)`: no
/// shared mutable state between calls, no I/O, no failure. Input that cannot
/// be understood yields an empty list.
pub trait OrderParser: Send + Sync + 'static {
    /// Parse a raw transcript into order lines priced against `catalog`
    ///
    /// `None` models a missing transcript and behaves like an empty string.
    fn parse(&self, raw_text: Option<&str>, catalog: &[CatalogItem]) -> Vec<OrderLine>;
}

/// Fallback biller invoked only when the deterministic parser yields nothing
///
/// Implementations:
/// - `DisabledFallback` - always returns no lines
/// - `HttpFallback` - delegates to an external billing endpoint
#[async_trait]
pub trait FallbackBiller: Send + Sync + 'static {
    /// Produce order lines for a transcript the deterministic parser could not read
    async fn bill(&self, text: &str, catalog: &[CatalogItem]) -> Result<Vec<OrderLine>>;

    /// Check if the fallback is enabled
    fn is_enabled(&self) -> bool;

    /// Name for logging and metrics labels
    fn name(&self) -> &'static str;
}
