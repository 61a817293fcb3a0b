//! Voice Bill Server
//!
//! HTTP endpoints around the deterministic Tamil/Tanglish order parser.

pub mod fallback;
pub mod http;
pub mod metrics;
pub mod state;

pub use fallback::{build_fallback, DisabledFallback, HttpFallback};
pub use http::create_router;
pub use metrics::{init_metrics, record_bill, record_parse_latency, record_unparsed};
pub use state::{AppState, Snapshot};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Could not understand the order")]
    Unparsed,

    #[error("Fallback biller failed: {0}")]
    Fallback(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<voice_bill_core::Error> for ServerError {
    fn from(err: voice_bill_core::Error) -> Self {
        match err {
            voice_bill_core::Error::Fallback(msg) => ServerError::Fallback(msg),
            voice_bill_core::Error::InvalidCatalog(msg) => ServerError::Config(msg),
        }
    }
}

impl From<voice_bill_config::ConfigError> for ServerError {
    fn from(err: voice_bill_config::ConfigError) -> Self {
        ServerError::Config(err.to_string())
    }
}

impl From<voice_bill_text_processing::TextProcessingError> for ServerError {
    fn from(err: voice_bill_text_processing::TextProcessingError) -> Self {
        ServerError::Config(err.to_string())
    }
}

impl From<&ServerError> for StatusCode {
    fn from(err: &ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Unparsed => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Fallback(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
