// Downloader module - request validation, yt-dlp orchestration and post-processing

pub mod backends;
pub mod collect;
pub mod config;
pub mod errors;
pub mod limits;
pub mod models;
pub mod options;
pub mod orchestrator;
pub mod subtitles;
pub mod tools;
pub mod traits;
pub mod utils;

pub use config::{AppConfig, DemoLimits, ToolPaths};
pub use errors::DownloadError;
pub use models::{DownloadRequest, ExtractMode, FetchResult, SubtitleMode};
pub use options::{build_options, DownloadOptions, PostProcessor};
pub use orchestrator::Downloader;
pub use traits::{MediaExtractor, Transcoder};
