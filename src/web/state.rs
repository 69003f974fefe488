// Shared router state

use std::sync::Arc;

use crate::downloader::tools::ToolManager;
use crate::downloader::{AppConfig, Downloader};

/// Everything a handler needs, built once at startup.
pub struct AppContext {
    pub config: AppConfig,
    pub downloader: Downloader,
    pub tools: ToolManager,
}

impl AppContext {
    /// Context backed by the real yt-dlp and ffmpeg programs.
    pub fn new(config: AppConfig) -> Self {
        let downloader = Downloader::with_tools(&config.tools);
        Self::with_downloader(config, downloader)
    }

    pub fn with_downloader(config: AppConfig, downloader: Downloader) -> Self {
        let tools = ToolManager::new(config.tools.clone());
        Self {
            config,
            downloader,
            tools,
        }
    }
}

pub type AppState = Arc<AppContext>;
