//! Menu catalog types
//!
//! A catalog is the list of sellable items supplied by the caller at parse
//! time. Whether it comes from a static seed or a YAML file is irrelevant to
//! the parser; it is read-only for the duration of a parse call.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{Error, Result};

/// Item category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tiffin,
    Parotta,
    Rice,
    Beverage,
    Snacks,
    Textile,
    Footwear,
    Hardware,
    #[default]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tiffin => "tiffin",
            Category::Parotta => "parotta",
            Category::Rice => "rice",
            Category::Beverage => "beverage",
            Category::Snacks => "snacks",
            Category::Textile => "textile",
            Category::Footwear => "footwear",
            Category::Hardware => "hardware",
            Category::Other => "other",
        }
    }
}

/// A sellable catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Canonical English display name, unique within a catalog
    pub name: String,
    /// Display name in Tamil script
    #[serde(default, alias = "localName", skip_serializing_if = "Option::is_none")]
    pub local_name: Option<String>,
    /// Price per unit
    #[serde(alias = "unitPrice")]
    pub unit_price: f64,
    /// Display unit ("piece", "plate", "pair", ...)
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub category: Category,
}

fn default_unit() -> String {
    "piece".to_string()
}

impl CatalogItem {
    pub fn new(name: impl Into<String>, unit_price: f64, category: Category) -> Self {
        Self {
            name: name.into(),
            local_name: None,
            unit_price,
            unit: default_unit(),
            category,
        }
    }

    /// Builder: set the Tamil display name
    pub fn with_local_name(mut self, local_name: impl Into<String>) -> Self {
        self.local_name = Some(local_name.into());
        self
    }

    /// Builder: set the display unit
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Names the resolver may test predicates against
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.local_name.as_deref())
    }
}

/// Validate a catalog before it is handed to the parser
///
/// Rejects empty names, negative or non-finite prices and names that collide
/// case-insensitively.
pub fn validate_catalog(items: &[CatalogItem]) -> Result<()> {
    let mut seen = HashSet::new();

    for item in items {
        let name = item.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidCatalog("item with empty name".to_string()));
        }
        if !item.unit_price.is_finite() || item.unit_price < 0.0 {
            return Err(Error::InvalidCatalog(format!(
                "{}: unit price must be a non-negative number, got {}",
                name, item.unit_price
            )));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(Error::InvalidCatalog(format!("duplicate item name: {}", name)));
        }
    }

    Ok(())
}
