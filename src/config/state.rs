// Application state module
// Immutable per-process state shared by every request

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::types::Config;
use crate::content::ContentStore;
use crate::images::ImageResolver;
use crate::lookup::LookupEngine;
use crate::routing::RouteTable;

/// Application state
pub struct AppState {
    pub config: Config,
    pub engine: LookupEngine,
    pub routes: RouteTable,
    pub uploads_dir: PathBuf,

    // Cached config values for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: &Config, store: Arc<dyn ContentStore>) -> Self {
        let images = ImageResolver::new(&config.content.backend_url, &config.content.uploads_path);
        let routes =
            RouteTable::content_routes(&config.content.api_mounts, &config.content.uploads_path);

        Self {
            config: config.clone(),
            engine: LookupEngine::new(store, images),
            routes,
            uploads_dir: PathBuf::from(&config.content.uploads_dir),
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
        }
    }

    pub fn access_log_enabled(&self) -> bool {
        self.cached_access_log.load(Ordering::Relaxed)
    }
}
