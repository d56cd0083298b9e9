pub mod config;
pub mod extractors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;
pub mod structs;
pub mod utils;

use std::sync::Arc;

use config::Config;
use store::Store;
use utils::timeline_cache::{MemoryTimelineCache, TimelineCache};

pub struct AppState {
    pub store: Store,
    pub timeline_cache: Arc<dyn TimelineCache>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store,
            timeline_cache: Arc::new(MemoryTimelineCache::new()),
            config,
        }
    }

    pub fn with_timeline_cache(mut self, timeline_cache: Arc<dyn TimelineCache>) -> Self {
        self.timeline_cache = timeline_cache;
        self
    }
}
