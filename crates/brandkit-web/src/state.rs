//! Application state.

use anyhow::Context;
use brandkit_codegen::DesignEngine;
use brandkit_core::analytics::Analytics;
use brandkit_core::design::{open_store, DesignStore};
use brandkit_core::BrandkitConfig;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DesignStore>,
    pub engine: Arc<DesignEngine>,
    pub analytics: Arc<Analytics>,
    pub config: Arc<BrandkitConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DesignStore>, engine: DesignEngine, config: BrandkitConfig) -> Self {
        Self {
            store,
            engine: Arc::new(engine),
            analytics: Arc::new(Analytics::default()),
            config: Arc::new(config),
        }
    }

    /// Build the state described by `config`, connecting to Redis when it is
    /// the configured backend.
    pub async fn from_config(config: BrandkitConfig) -> anyhow::Result<Self> {
        let store = open_store(&config)
            .await
            .with_context(|| format!("Failed to open {:?} storage", config.storage))?;
        let engine = DesignEngine::from_config(&config).context("Failed to build design engine")?;
        Ok(Self::new(store, engine, config))
    }
}
