//! Shared application state handed to every handler.

use crate::video_service::VideoService;
use migboard_config::Config;
use migboard_data::{MigrationTable, TableStore};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for the HTTP endpoints.
#[derive(Clone)]
pub struct AppState {
    /// Current migration table.
    pub store: Arc<TableStore>,
    /// Loaded configuration.
    pub config: Arc<Config>,
    /// Video rendering and lookup.
    pub video: Arc<VideoService>,
    /// Process start, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Creates state serving `table` with the default video backends.
    pub fn new(config: Config, table: MigrationTable) -> Self {
        let video = VideoService::from_config(&config);
        Self::with_video(config, table, video)
    }

    /// Creates state with an explicit video service.
    pub fn with_video(config: Config, table: MigrationTable, video: VideoService) -> Self {
        Self {
            store: Arc::new(TableStore::new(table)),
            config: Arc::new(config),
            video: Arc::new(video),
            started_at: Instant::now(),
        }
    }
}
