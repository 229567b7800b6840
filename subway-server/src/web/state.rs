//! Application state for the web layer.

use std::sync::Arc;

use crate::store::SubwayStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Station and line registry
    pub store: Arc<SubwayStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: SubwayStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
