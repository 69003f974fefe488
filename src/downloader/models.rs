// Common data models for the downloader

use std::fmt;
use std::path::PathBuf;

/// How subtitles are handled for video downloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtitleMode {
    /// No subtitles
    #[default]
    Off,
    /// Soft subtitles muxed as a selectable track
    Embed,
    /// Hard subtitles rendered into the picture by ffmpeg
    Burn,
}

impl SubtitleMode {
    pub fn is_on(&self) -> bool {
        !matches!(self, Self::Off)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Embed => "embed",
            Self::Burn => "burn",
        }
    }

    /// Parse a form value; anything unknown means no subtitles.
    pub fn from_form(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "embed" => Self::Embed,
            "burn" => Self::Burn,
            _ => Self::Off,
        }
    }
}

impl fmt::Display for SubtitleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single fetch as submitted by the user
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    /// Destination folder as typed; `~` is expanded at fetch time
    pub output_dir: String,
    pub audio_only: bool,
    pub playlist: bool,
    /// Embed cover art and tags (audio only)
    pub album_mode: bool,
    pub subtitle_mode: SubtitleMode,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, output_dir: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            output_dir: output_dir.into(),
            audio_only: false,
            playlist: false,
            album_mode: false,
            subtitle_mode: SubtitleMode::Off,
        }
    }

    pub fn audio(mut self, audio_only: bool) -> Self {
        self.audio_only = audio_only;
        self
    }

    pub fn playlist(mut self, playlist: bool) -> Self {
        self.playlist = playlist;
        self
    }

    pub fn album_mode(mut self, enabled: bool) -> Self {
        self.album_mode = enabled;
        self
    }

    pub fn subtitles(mut self, mode: SubtitleMode) -> Self {
        self.subtitle_mode = mode;
        self
    }

    /// Subtitles only apply to video downloads
    pub fn wants_subtitles(&self) -> bool {
        !self.audio_only && self.subtitle_mode.is_on()
    }

    pub fn wants_burn(&self) -> bool {
        !self.audio_only && self.subtitle_mode == SubtitleMode::Burn
    }
}

/// Files produced by one fetch, in the order yt-dlp reported them
pub type FetchResult = Vec<PathBuf>;

/// Which pass of yt-dlp to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Metadata only, nothing is written
    Preview,
    /// Full download with post-processing
    Download,
}

impl fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preview => write!(f, "preview"),
            Self::Download => write!(f, "download"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtitle_mode_from_form() {
        assert_eq!(SubtitleMode::from_form("embed"), SubtitleMode::Embed);
        assert_eq!(SubtitleMode::from_form(" Burn "), SubtitleMode::Burn);
        assert_eq!(SubtitleMode::from_form("off"), SubtitleMode::Off);
        assert_eq!(SubtitleMode::from_form("whatever"), SubtitleMode::Off);
    }

    #[test]
    fn test_audio_ignores_subtitles() {
        let req = DownloadRequest::new("u", "/tmp")
            .audio(true)
            .subtitles(SubtitleMode::Burn);
        assert!(!req.wants_subtitles());
        assert!(!req.wants_burn());

        let req = req.audio(false);
        assert!(req.wants_subtitles());
        assert!(req.wants_burn());
    }
}
