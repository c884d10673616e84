//! Application state shared across handlers

use std::sync::Arc;

use common::repositories::DataManager;
use omdb::MovieLookup;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub data_manager: Arc<dyn DataManager>,
    pub lookup: Arc<dyn MovieLookup>,
}
