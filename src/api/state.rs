use std::collections::HashSet;
use std::sync::Arc;

use crate::config::Config;
use crate::engine::{Engine, ModelCache};
use crate::models::{Catalog, ItemId};

/// Shared application state
///
/// The catalog is read-only for the lifetime of the server; handlers borrow
/// it per request and recommenders return their own copies of items.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub engine: Arc<Engine>,
    pub default_history: Arc<HashSet<ItemId>>,
}

impl AppState {
    /// Creates state around an already loaded catalog
    pub fn new(catalog: Catalog, engine: Engine) -> Self {
        Self {
            catalog: Arc::new(catalog),
            engine: Arc::new(engine),
            default_history: Arc::new(HashSet::new()),
        }
    }

    /// History used when a request does not carry one
    pub fn with_default_history(mut self, history: HashSet<ItemId>) -> Self {
        self.default_history = Arc::new(history);
        self
    }

    /// Loads the catalog and builds the engine from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = Catalog::from_json_path(&config.catalog_path)?;

        let mut engine = Engine::new(config.engine_settings(), config.stop_words());
        if config.cache_model {
            engine = engine.with_model_cache(Arc::new(ModelCache::new()));
        }

        Ok(Self::new(catalog, engine).with_default_history(config.default_history()))
    }
}
