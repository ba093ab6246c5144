//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor. It is immutable
//! once built; requests share nothing else.

use std::sync::Arc;

use crate::config::Config;
use crate::engine::EngineInvoker;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Engine invoker built from the engine configuration
    invoker: EngineInvoker,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Self {
        let invoker = EngineInvoker::from_config(&config.engine);
        Self {
            inner: Arc::new(AppStateInner { invoker, config }),
        }
    }

    /// Get a reference to the engine invoker
    pub fn invoker(&self) -> &EngineInvoker {
        &self.inner.invoker
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
