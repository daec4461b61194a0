use std::sync::Arc;

use newsboard_core::CachedDataStore;

#[derive(Clone)]
pub struct AppState {
    /// The single dataset store shared by all handlers.
    pub store: Arc<CachedDataStore>,
}

impl AppState {
    pub fn new(store: CachedDataStore) -> Self {
        Self { store: Arc::new(store) }
    }
}
