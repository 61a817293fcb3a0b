//! Fallback billers
//!
//! Consulted only when the deterministic parser yields no lines:
//! - `DisabledFallback` - the default, never produces lines
//! - `HttpFallback` - POSTs `{text, catalog}` to an external biller and
//!   expects `{items: [OrderLine]}` back

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use voice_bill_config::FallbackConfig;
use voice_bill_core::{CatalogItem, Error, FallbackBiller, OrderLine, Result};

/// Build the fallback described by `config`
pub fn build_fallback(config: &FallbackConfig) -> Arc<dyn FallbackBiller> {
    match config.active_endpoint() {
        Some(endpoint) => match HttpFallback::new(endpoint, Duration::from_millis(config.timeout_ms)) {
            Ok(fallback) => {
                tracing::info!(endpoint, "HTTP fallback biller enabled");
                Arc::new(fallback)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to build HTTP fallback, disabling it");
                Arc::new(DisabledFallback)
            }
        },
        None => Arc::new(DisabledFallback),
    }
}

/// Fallback that never produces lines
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledFallback;

#[async_trait]
impl FallbackBiller for DisabledFallback {
    async fn bill(&self, _text: &str, _catalog: &[CatalogItem]) -> Result<Vec<OrderLine>> {
        Ok(Vec::new())
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

#[derive(Serialize)]
struct FallbackRequest<'a> {
    text: &'a str,
    catalog: &'a [CatalogItem],
}

#[derive(Deserialize)]
struct FallbackResponse {
    #[serde(default)]
    items: Vec<OrderLine>,
}

/// Fallback delegating to an external billing endpoint
#[derive(Debug, Clone)]
pub struct HttpFallback {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFallback {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Fallback(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl FallbackBiller for HttpFallback {
    async fn bill(&self, text: &str, catalog: &[CatalogItem]) -> Result<Vec<OrderLine>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&FallbackRequest { text, catalog })
            .send()
            .await
            .map_err(|e| Error::Fallback(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fallback(format!("Endpoint returned {}", status)));
        }

        let body: FallbackResponse = response
            .json()
            .await
            .map_err(|e| Error::Fallback(format!("Invalid response body: {}", e)))?;

        Ok(reprice(body.items, catalog))
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Trust catalog prices over the external biller's; drop empty lines
pub fn reprice(lines: Vec<OrderLine>, catalog: &[CatalogItem]) -> Vec<OrderLine> {
    lines
        .into_iter()
        .filter(|line| line.quantity > 0)
        .map(|line| match catalog.iter().find(|item| item.name == line.item_name) {
            Some(item) => OrderLine::priced(item, line.quantity),
            None => line,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_bill_config::shop_catalog;

    #[tokio::test]
    async fn test_disabled_fallback() {
        let fallback = DisabledFallback;
        assert!(!fallback.is_enabled());
        assert!(fallback.bill("anything", &shop_catalog()).await.unwrap().is_empty());
    }

    #[test]
    fn test_reprice_uses_catalog() {
        let lines = vec![
            OrderLine {
                item_name: "Shoes".to_string(),
                quantity: 2,
                unit_price: Some(1.0),
                total_price: Some(2.0),
            },
            OrderLine::unpriced("Umbrella", 1),
            OrderLine::unpriced("Saree", 0),
        ];

        let repriced = reprice(lines, &shop_catalog());
        assert_eq!(repriced.len(), 2);
        assert_eq!(repriced[0].unit_price, Some(200.0));
        assert_eq!(repriced[0].total_price, Some(400.0));
        assert_eq!(repriced[1].item_name, "Umbrella");
        assert_eq!(repriced[1].total_price, None);
    }

    #[test]
    fn test_build_fallback_from_config() {
        let disabled = build_fallback(&FallbackConfig::default());
        assert_eq!(disabled.name(), "disabled");

        let config = FallbackConfig {
            enabled: true,
            endpoint: Some("http://127.0.0.1:9/bill".to_string()),
            timeout_ms: 100,
        };
        let http = build_fallback(&config);
        assert_eq!(http.name(), "http");
        assert!(http.is_enabled());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let fallback = HttpFallback::new("http://127.0.0.1:9/bill", Duration::from_millis(200)).unwrap();
        let result = fallback.bill("something", &shop_catalog()).await;
        assert!(matches!(result, Err(Error::Fallback(_))));
    }
}
