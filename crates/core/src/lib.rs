//! Core traits and types for the voice billing service
//!
//! This crate provides foundational types used across all other crates:
//! - Catalog types (`CatalogItem`, `Category`)
//! - Order output types (`OrderLine`, `Bill`)
//! - Pluggable parser and fallback traits
//! - Error types

pub mod catalog;
pub mod error;
pub mod order;
pub mod traits;

pub use catalog::{validate_catalog, CatalogItem, Category};
pub use error::{Error, Result};
pub use order::{Bill, BillSource, OrderLine};
pub use traits::{FallbackBiller, OrderParser};
