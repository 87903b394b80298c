use std::sync::Arc;

use openshelf_config::AppConfig;
use openshelf_db::BookStore;

/// Shared application state accessible from all request handlers.
pub struct AppState {
    pub config: AppConfig,
    pub store: BookStore,
}

impl AppState {
    pub fn new(config: AppConfig, store: BookStore) -> Self {
        Self { config, store }
    }
}

pub type SharedState = Arc<AppState>;
