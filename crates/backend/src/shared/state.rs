use std::sync::Arc;

use super::config::ExplorerSettings;
use super::explorer::SessionStore;
use crate::usecases::u501_load_dataset::{progress_tracker::ProgressTracker, LoadExecutor};

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub loader: Arc<LoadExecutor>,
}

impl AppState {
    pub fn new(settings: &ExplorerSettings) -> Self {
        let store = Arc::new(SessionStore::new(settings.search_debounce()));
        let loader = Arc::new(LoadExecutor::new(
            Arc::clone(&store),
            Arc::new(ProgressTracker::new()),
        ));
        Self { store, loader }
    }
}
