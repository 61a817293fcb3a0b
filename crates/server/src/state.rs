//! Application State
//!
//! Shared state across all handlers. Settings, catalog, parser and fallback
//! live together in one [`Snapshot`] behind a single `RwLock`, so a reload
//! swaps all of them at once. Handlers hold the read lock only long enough
//! to clone the `Arc`.

use parking_lot::RwLock;
use std::sync::Arc;

use voice_bill_config::{load_settings_from, Settings};
use voice_bill_core::{CatalogItem, FallbackBiller};
use voice_bill_text_processing::TanglishOrderParser;

use crate::fallback::build_fallback;
use crate::ServerError;

/// Everything one request needs, built from a single settings load
#[derive(Clone)]
pub struct Snapshot {
    pub settings: Settings,
    pub catalog: Arc<Vec<CatalogItem>>,
    /// Parser built from `settings.parser`
    pub parser: Arc<TanglishOrderParser>,
    /// Fallback biller built from `settings.fallback`
    pub fallback: Arc<dyn FallbackBiller>,
}

impl Snapshot {
    fn build(settings: Settings, catalog: Vec<CatalogItem>) -> Result<Self, ServerError> {
        let parser = TanglishOrderParser::from_config(&settings.parser)?;
        let fallback = build_fallback(&settings.fallback);

        Ok(Self {
            settings,
            catalog: Arc::new(catalog),
            parser: Arc::new(parser),
            fallback,
        })
    }
}

/// Application state
#[derive(Clone)]
pub struct AppState {
    snapshot: Arc<RwLock<Arc<Snapshot>>>,
    /// Config directory for reload
    config_dir: String,
    /// Environment name for reload
    env: Option<String>,
}

impl AppState {
    /// Build state from settings, loading the configured catalog
    pub fn new(config: Settings) -> Result<Self, ServerError> {
        let catalog = config.menu.load_catalog()?;
        Self::with_catalog(config, catalog)
    }

    /// Build state with an explicit catalog
    pub fn with_catalog(config: Settings, catalog: Vec<CatalogItem>) -> Result<Self, ServerError> {
        let snapshot = Snapshot::build(config, catalog)?;

        Ok(Self {
            snapshot: Arc::new(RwLock::new(Arc::new(snapshot))),
            config_dir: "config".to_string(),
            env: None,
        })
    }

    /// Set where `reload_config` reads settings from
    pub fn with_reload_source(mut self, config_dir: impl Into<String>, env: Option<String>) -> Self {
        self.config_dir = config_dir.into();
        self.env = env;
        self
    }

    /// Replace the fallback biller
    pub fn with_fallback(self, fallback: Arc<dyn FallbackBiller>) -> Self {
        {
            let mut guard = self.snapshot.write();
            let mut snapshot = guard.as_ref().clone();
            snapshot.fallback = fallback;
            *guard = Arc::new(snapshot);
        }
        self
    }

    /// Current snapshot; stays consistent for as long as it is held
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    pub fn catalog(&self) -> Arc<Vec<CatalogItem>> {
        self.snapshot().catalog.clone()
    }

    pub fn fallback(&self) -> Arc<dyn FallbackBiller> {
        self.snapshot().fallback.clone()
    }

    /// Reload settings, catalog, parser and fallback from disk
    ///
    /// Everything is rebuilt before the swap, so a bad file leaves the
    /// running state untouched. CORS and the listen address only apply
    /// at startup.
    pub fn reload_config(&self) -> Result<(), ServerError> {
        let settings = load_settings_from(&self.config_dir, self.env.as_deref())?;
        let catalog = settings.menu.load_catalog()?;
        let snapshot = Snapshot::build(settings, catalog)?;

        *self.snapshot.write() = Arc::new(snapshot);

        tracing::info!("Configuration reloaded successfully");
        Ok(())
    }
}
