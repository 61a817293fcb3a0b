//! Order parser configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::windows;
use crate::ConfigError;

/// Tunables for the deterministic order parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Characters before a match checked for a conflicting qualifier word
    #[serde(default = "default_qualifier_window")]
    pub qualifier_window_chars: usize,

    /// Characters before a match searched for a quantity
    #[serde(default = "default_lookbehind")]
    pub quantity_lookbehind_chars: usize,

    /// Characters after a match searched for a quantity
    #[serde(default = "default_lookahead")]
    pub quantity_lookahead_chars: usize,

    /// Additional number words (word -> value), merged over the built-in lexicon
    #[serde(default)]
    pub extra_number_words: BTreeMap<String, u32>,
}

fn default_qualifier_window() -> usize {
    windows::QUALIFIER_WINDOW_CHARS
}

fn default_lookbehind() -> usize {
    windows::QUANTITY_LOOKBEHIND_CHARS
}

fn default_lookahead() -> usize {
    windows::QUANTITY_LOOKAHEAD_CHARS
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            qualifier_window_chars: default_qualifier_window(),
            quantity_lookbehind_chars: default_lookbehind(),
            quantity_lookahead_chars: default_lookahead(),
            extra_number_words: BTreeMap::new(),
        }
    }
}

impl ParserConfig {
    /// Validate window bounds and extra lexicon entries
    pub fn validate(&self) -> Result<(), ConfigError> {
        let window_fields = [
            ("parser.qualifier_window_chars", self.qualifier_window_chars),
            ("parser.quantity_lookbehind_chars", self.quantity_lookbehind_chars),
            ("parser.quantity_lookahead_chars", self.quantity_lookahead_chars),
        ];

        for (field, value) in window_fields {
            if value == 0 || value > windows::MAX_WINDOW_CHARS {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!(
                        "Must be between 1 and {}, got {}",
                        windows::MAX_WINDOW_CHARS,
                        value
                    ),
                });
            }
        }

        for (word, value) in &self.extra_number_words {
            if word.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "parser.extra_number_words".to_string(),
                    message: "Number word cannot be empty".to_string(),
                });
            }
            if *value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("parser.extra_number_words.{}", word),
                    message: "Quantity must be at least 1".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_windows() {
        let config = ParserConfig::default();
        assert_eq!(config.qualifier_window_chars, 14);
        assert_eq!(config.quantity_lookbehind_chars, 14);
        assert_eq!(config.quantity_lookahead_chars, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = ParserConfig {
            quantity_lookahead_chars: 0,
            ..ParserConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversized_window_rejected() {
        let config = ParserConfig {
            qualifier_window_chars: 500,
            ..ParserConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_quantity_word_rejected() {
        let mut config = ParserConfig::default();
        config.extra_number_words.insert("zilch".to_string(), 0);
        assert!(config.validate().is_err());
    }
}
