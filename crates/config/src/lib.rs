//! Configuration management for the voice billing service
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, `config/{env}`)
//! - Environment variables (VOICE_BILL_ prefix, `__` separator)
//! - YAML menu catalogs or built-in seed menus

pub mod constants;
pub mod menu;
pub mod parser;
pub mod settings;

pub use menu::{
    load_catalog_file, preset_catalog, restaurant_menu, shop_catalog, MenuConfig, MenuFile,
    MenuPreset,
};
pub use parser::ParserConfig;
pub use settings::{
    load_settings, load_settings_from, FallbackConfig, ObservabilityConfig, RuntimeEnvironment,
    ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
