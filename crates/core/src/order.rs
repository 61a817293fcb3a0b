//! Order output types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CatalogItem;

/// One billed line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item_name: String,
    /// Always at least 1
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub total_price: Option<f64>,
}

impl OrderLine {
    /// Create a priced line from a catalog entry
    pub fn priced(item: &CatalogItem, quantity: u32) -> Self {
        Self {
            item_name: item.name.clone(),
            quantity,
            unit_price: Some(item.unit_price),
            total_price: Some(item.unit_price * f64::from(quantity)),
        }
    }

    /// Create a line whose price is unknown
    pub fn unpriced(item_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_name: item_name.into(),
            quantity,
            unit_price: None,
            total_price: None,
        }
    }
}

/// Where the lines of a bill came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillSource {
    /// Regex-and-lexicon parser
    Deterministic,
    /// External fallback biller
    Fallback,
}

impl BillSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillSource::Deterministic => "deterministic",
            BillSource::Fallback => "fallback",
        }
    }
}

/// A complete bill
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub bill_id: Uuid,
    pub items: Vec<OrderLine>,
    /// Sum of line totals; unpriced lines count as zero
    pub total: f64,
    pub source: BillSource,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    pub fn from_lines(items: Vec<OrderLine>, source: BillSource) -> Self {
        let total: f64 = items.iter().filter_map(|line| line.total_price).sum();
        Self {
            bill_id: Uuid::new_v4(),
            items,
            total,
            source,
            created_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
