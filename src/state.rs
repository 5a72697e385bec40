use std::sync::Arc;

use crate::config::AppConfig;
use crate::fetch::PageFetcher;
use crate::store::DocumentStore;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub config: AppConfig,
}
