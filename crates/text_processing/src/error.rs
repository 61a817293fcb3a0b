//! Text processing errors
//!
//! Parsing itself never fails; these cover building an engine from
//! configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextProcessingError {
    #[error("Invalid pattern for {context}: {source}")]
    Pattern {
        context: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<voice_bill_config::ConfigError> for TextProcessingError {
    fn from(err: voice_bill_config::ConfigError) -> Self {
        TextProcessingError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TextProcessingError>;

/// Compile a pattern, attaching context to the error
pub(crate) fn compile(context: &str, pattern: &str) -> Result<regex::Regex> {
    regex::Regex::new(pattern).map_err(|source| TextProcessingError::Pattern {
        context: context.to_string(),
        source,
    })
}
