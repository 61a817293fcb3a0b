//! Menu catalog configuration
//!
//! The catalog comes from one of two places:
//! - a YAML file (`menu.catalog_path`) with an `items` list, or
//! - a built-in seed (`menu.preset`): the restaurant menu, the fixed shop
//!   catalog, or both combined.

use serde::{Deserialize, Serialize};
use std::path::Path;

use voice_bill_core::{validate_catalog, CatalogItem, Category};

use crate::ConfigError;

/// Built-in catalog seeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MenuPreset {
    /// South Indian restaurant menu
    #[default]
    Restaurant,
    /// Fixed general-store catalog
    Shop,
    /// Restaurant menu followed by the shop catalog
    Combined,
}

/// Menu configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MenuConfig {
    #[serde(default)]
    pub preset: MenuPreset,

    /// YAML catalog file; takes precedence over `preset` when set
    #[serde(default)]
    pub catalog_path: Option<String>,
}

/// On-disk catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuFile {
    pub items: Vec<CatalogItem>,
}

impl MenuConfig {
    /// Load and validate the configured catalog
    pub fn load_catalog(&self) -> Result<Vec<CatalogItem>, ConfigError> {
        let items = match &self.catalog_path {
            Some(path) => load_catalog_file(path)?,
            None => preset_catalog(self.preset),
        };

        validate_catalog(&items).map_err(|e| ConfigError::InvalidValue {
            field: "menu".to_string(),
            message: e.to_string(),
        })?;

        tracing::info!(
            items = items.len(),
            source = self.catalog_path.as_deref().unwrap_or("preset"),
            "Loaded menu catalog"
        );
        Ok(items)
    }
}

/// Load a catalog from a YAML file
pub fn load_catalog_file<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogItem>, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("Failed to read menu file: {}", e)))?;

    let menu: MenuFile = serde_yaml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("Failed to parse menu file: {}", e)))?;

    Ok(menu.items)
}

/// Built-in catalog for a preset
pub fn preset_catalog(preset: MenuPreset) -> Vec<CatalogItem> {
    match preset {
        MenuPreset::Restaurant => restaurant_menu(),
        MenuPreset::Shop => shop_catalog(),
        MenuPreset::Combined => {
            let mut items = restaurant_menu();
            items.extend(shop_catalog());
            items
        }
    }
}

/// Seed menu for a South Indian restaurant
///
/// No Egg Biryani: the parser recognizes it, this menu does not stock it.
pub fn restaurant_menu() -> Vec<CatalogItem> {
    use Category::*;

    vec![
        CatalogItem::new("Idli", 10.0, Tiffin).with_local_name("இட்லி"),
        CatalogItem::new("Vada", 12.0, Tiffin).with_local_name("வடை"),
        CatalogItem::new("Plain Dosa", 40.0, Tiffin)
            .with_local_name("தோசை")
            .with_unit("plate"),
        CatalogItem::new("Masala Dosa", 60.0, Tiffin)
            .with_local_name("மசாலா தோசை")
            .with_unit("plate"),
        CatalogItem::new("Onion Dosa", 55.0, Tiffin)
            .with_local_name("வெங்காய தோசை")
            .with_unit("plate"),
        CatalogItem::new("Rava Dosa", 60.0, Tiffin)
            .with_local_name("ரவா தோசை")
            .with_unit("plate"),
        CatalogItem::new("Ghee Roast", 70.0, Tiffin)
            .with_local_name("நெய் ரோஸ்ட்")
            .with_unit("plate"),
        CatalogItem::new("Pongal", 45.0, Tiffin)
            .with_local_name("பொங்கல்")
            .with_unit("plate"),
        CatalogItem::new("Poori", 40.0, Tiffin)
            .with_local_name("பூரி")
            .with_unit("plate"),
        CatalogItem::new("Parotta", 15.0, Parotta).with_local_name("பரோட்டா"),
        CatalogItem::new("Veg Kothu Parotta", 80.0, Parotta)
            .with_local_name("கொத்து பரோட்டா")
            .with_unit("plate"),
        CatalogItem::new("Egg Kothu Parotta", 100.0, Parotta)
            .with_local_name("முட்டை கொத்து பரோட்டா")
            .with_unit("plate"),
        CatalogItem::new("Chicken Kothu Parotta", 130.0, Parotta)
            .with_local_name("சிக்கன் கொத்து பரோட்டா")
            .with_unit("plate"),
        CatalogItem::new("Mutton Kothu Parotta", 160.0, Parotta)
            .with_local_name("மட்டன் கொத்து பரோட்டா")
            .with_unit("plate"),
        CatalogItem::new("Meals", 100.0, Rice)
            .with_local_name("சாப்பாடு")
            .with_unit("plate"),
        CatalogItem::new("Veg Biryani", 120.0, Rice)
            .with_local_name("வெஜ் பிரியாணி")
            .with_unit("plate"),
        CatalogItem::new("Chicken Biryani", 180.0, Rice)
            .with_local_name("சிக்கன் பிரியாணி")
            .with_unit("plate"),
        CatalogItem::new("Mutton Biryani", 250.0, Rice)
            .with_local_name("மட்டன் பிரியாணி")
            .with_unit("plate"),
        CatalogItem::new("Omelette", 25.0, Snacks).with_local_name("ஆம்லெட்"),
        CatalogItem::new("Tea", 15.0, Beverage)
            .with_local_name("டீ")
            .with_unit("cup"),
        CatalogItem::new("Coffee", 20.0, Beverage)
            .with_local_name("காபி")
            .with_unit("cup"),
    ]
}

/// Seed catalog for the fixed-price general store
pub fn shop_catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("Red Wires", 50.0, Category::Hardware)
            .with_local_name("சிவப்பு கம்பி")
            .with_unit("bundle"),
        CatalogItem::new("Shoes", 200.0, Category::Footwear)
            .with_local_name("செருப்பு")
            .with_unit("pair"),
        CatalogItem::new("Saree", 500.0, Category::Textile).with_local_name("சேலை"),
    ]
}
