//! Error types shared across crates

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Fallback biller error: {0}")]
    Fallback(String),
}

pub type Result<T> = std::result::Result<T, Error>;
