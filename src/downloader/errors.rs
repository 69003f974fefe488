// Error types for the fetch pipeline

use thiserror::Error;

/// Every failure a fetch can surface to the user.
///
/// The `Display` text is the message shown in the UI, so variants carry
/// whatever context the message needs and nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    /// The form was submitted without a link
    #[error("A video URL is required.")]
    MissingUrl,

    /// ffmpeg could not be located
    #[error("ffmpeg is required but was not found on PATH. Install ffmpeg and retry.")]
    MissingTranscoder,

    /// A playlist entry is longer than the demo limit
    #[error("Blocked in demo mode: {title} exceeds {minutes} minutes.")]
    PlaylistItemTooLong { title: String, minutes: u64 },

    /// A single video is longer than the demo limit
    #[error("Blocked in demo mode: videos over {minutes} minutes are disabled.")]
    VideoTooLong { minutes: u64 },

    /// The metadata-only pass failed
    #[error("Could not read media info: {0}")]
    Preview(String),

    /// The download pass failed (wraps whatever yt-dlp reported)
    #[error("Download failed: {0}")]
    Extraction(String),

    /// The download pass finished without producing anything
    #[error("No files were downloaded.")]
    NoFiles,

    /// Burn mode was requested but no sidecar subtitle exists
    #[error("Subtitle file not found to burn for {0}")]
    SubtitleNotFound(String),

    /// ffmpeg exited non-zero while burning subtitles
    #[error("Failed to burn subtitles: {0}")]
    BurnFailed(String),

    /// Local filesystem or process plumbing failed
    #[error("{0}")]
    Io(String),
}

impl DownloadError {
    pub(crate) fn io(context: &str, err: std::io::Error) -> Self {
        Self::Io(format!("{}: {}", context, err))
    }
}
