//! HTTP Endpoints
//!
//! REST API for the billing service.

use std::time::{Duration, Instant};

use axum::{
    extract::{Json, State},
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use voice_bill_core::{Bill, BillSource, CatalogItem};
use voice_bill_text_processing::ParseOutcome;

use crate::metrics::{metrics_handler, record_bill, record_parse_latency, record_unparsed};
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let snapshot = state.snapshot();
    let server = &snapshot.settings.server;
    let cors_layer = build_cors_layer(&server.cors_origins, server.cors_enabled);
    let timeout = Duration::from_secs(server.timeout_seconds);

    Router::new()
        // Billing
        .route("/api/bill", post(create_bill))
        .route("/api/parse", post(parse_text))
        .route("/api/menu", get(get_menu))
        // Health check
        .route("/health", get(health_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        // Admin endpoints
        .route("/admin/reload-config", post(reload_config))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Transcript request body
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl TextRequest {
    fn required_text(&self) -> Result<&str, ServerError> {
        self.text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ServerError::InvalidRequest("text is required".to_string()))
    }
}

/// Bill a spoken order
///
/// POST /api/bill
///
/// Deterministic parse first; the fallback biller only sees transcripts the
/// parser could not read at all.
async fn create_bill(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Result<Json<Bill>, ServerError> {
    let text = request.required_text()?;
    let snapshot = state.snapshot();
    let catalog = snapshot.catalog.as_slice();

    let start = Instant::now();
    let lines = snapshot.parser.parse(Some(text), catalog);
    record_parse_latency(start.elapsed());

    let (lines, source) = if lines.is_empty() {
        let fallback = &snapshot.fallback;
        if fallback.is_enabled() {
            tracing::info!(fallback = fallback.name(), "Parser found no items, using fallback");
            (fallback.bill(text, catalog).await?, BillSource::Fallback)
        } else {
            (lines, BillSource::Deterministic)
        }
    } else {
        (lines, BillSource::Deterministic)
    };

    if lines.is_empty() {
        record_unparsed();
        tracing::info!(text_len = text.chars().count(), "Order not understood");
        return Err(ServerError::Unparsed);
    }

    let bill = Bill::from_lines(lines, source);
    record_bill(source, bill.items.len());
    tracing::info!(
        bill_id = %bill.bill_id,
        source = source.as_str(),
        items = bill.items.len(),
        total = bill.total,
        "Bill created"
    );

    Ok(Json(bill))
}

/// Parse diagnostics
///
/// POST /api/parse
async fn parse_text(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Json<ParseOutcome> {
    let snapshot = state.snapshot();
    let outcome = snapshot
        .parser
        .parse_detailed(request.text.as_deref(), &snapshot.catalog);
    Json(outcome)
}

/// Current catalog
///
/// GET /api/menu
async fn get_menu(State(state): State<AppState>) -> Json<Vec<CatalogItem>> {
    Json(state.catalog().as_ref().clone())
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.snapshot();
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "catalog_items": snapshot.catalog.len(),
        "fallback": snapshot.fallback.name(),
    }))
}

/// Config reload endpoint
///
/// POST /admin/reload-config
///
/// Reloads settings and the catalog from disk and rebuilds the parser.
/// CORS, timeout and listen address are only applied at startup.
async fn reload_config(State(state): State<AppState>) -> impl IntoResponse {
    match state.reload_config() {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "message": "Configuration reloaded successfully",
                "catalog_items": state.catalog().len(),
            })),
        ),
        Err(e) => {
            tracing::error!("Config reload failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "error",
                    "message": e.to_string(),
                })),
            )
        }
    }
}
