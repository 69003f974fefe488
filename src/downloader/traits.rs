// Seams to the external tools

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

use super::errors::DownloadError;
use super::models::ExtractMode;
use super::options::DownloadOptions;

/// The media extractor (yt-dlp).
///
/// Returns the raw info record yt-dlp produced for `url`: a single video
/// object, or a playlist object with `entries`.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    /// Name of the extractor (for logging)
    fn name(&self) -> &'static str;

    async fn extract_info(
        &self,
        url: &str,
        options: &DownloadOptions,
        mode: ExtractMode,
    ) -> Result<Value, DownloadError>;
}

/// The media transcoder (ffmpeg), as far as this crate uses it.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Render `subtitle` into the picture of `video`, writing `output`.
    async fn burn_subtitles(
        &self,
        video: &Path,
        subtitle: &Path,
        output: &Path,
    ) -> Result<(), DownloadError>;
}
