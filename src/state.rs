use std::sync::Arc;

use crate::auth::SessionKeys;
use crate::config::AppConfig;
use crate::database::Store;

/// Process-wide handles shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
    pub keys: SessionKeys,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: AppConfig, keys: SessionKeys) -> Self {
        Self {
            store,
            config: Arc::new(config),
            keys,
        }
    }
}
