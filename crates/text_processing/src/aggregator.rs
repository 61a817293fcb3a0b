//! Order aggregation
//!
//! Sums quantities per alias key in first-seen order, then resolves each key
//! against the catalog and prices it. Keys the catalog does not carry are
//! dropped without error.

use voice_bill_core::{CatalogItem, OrderLine};

use crate::aliases::AliasKey;
use crate::resolver::MenuResolver;

#[derive(Debug, Default)]
pub struct OrderAggregator {
    quantities: Vec<(AliasKey, u32)>,
}

impl OrderAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` to `key`, saturating
    pub fn add(&mut self, key: AliasKey, quantity: u32) {
        match self.quantities.iter_mut().find(|(k, _)| *k == key) {
            Some((_, total)) => *total = total.saturating_add(quantity),
            None => self.quantities.push((key, quantity)),
        }
    }

    pub fn quantity(&self, key: AliasKey) -> Option<u32> {
        self.quantities
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, q)| *q)
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Resolve and price every accumulated key
    pub fn into_lines(self, resolver: &MenuResolver, catalog: &[CatalogItem]) -> Vec<OrderLine> {
        self.quantities
            .into_iter()
            .filter_map(|(key, quantity)| match resolver.resolve(key, catalog) {
                Some(item) => Some(OrderLine::priced(item, quantity)),
                None => {
                    tracing::debug!(alias = %key, quantity, "Alias not on the catalog, dropped");
                    None
                }
            })
            .collect()
    }
}
