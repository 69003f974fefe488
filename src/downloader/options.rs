// Options builder - maps a request onto yt-dlp configuration
//
// `build_options` is pure: the same request and limits always produce the same
// options. `DownloadOptions::to_args` is the only place that knows yt-dlp's
// flag vocabulary.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::config::DemoLimits;
use super::models::SubtitleMode;

pub const AUDIO_CODEC: &str = "mp3";
pub const AUDIO_QUALITY_KBPS: u32 = 192;
pub const VIDEO_CONTAINER: &str = "mp4";
pub const SUBTITLE_FORMAT: &str = "srt";

const SINGLE_TEMPLATE: &str = "%(title)s.%(ext)s";
const PLAYLIST_TEMPLATE: &str = "%(playlist_title)s/%(playlist_index)02d - %(title)s.%(ext)s";

/// Post-processing steps, in the order yt-dlp should run them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "key")]
pub enum PostProcessor {
    ExtractAudio { codec: String, quality: u32 },
    EmbedThumbnail,
    AddMetadata,
    ConvertSubtitles { format: String },
    EmbedSubtitles,
    ConvertVideo { format: String },
}

impl PostProcessor {
    pub fn is_subtitle_step(&self) -> bool {
        matches!(self, Self::ConvertSubtitles { .. } | Self::EmbedSubtitles)
    }

    fn push_args(&self, args: &mut Vec<String>) {
        match self {
            Self::ExtractAudio { codec, quality } => {
                args.push("--extract-audio".to_string());
                args.push("--audio-format".to_string());
                args.push(codec.clone());
                args.push("--audio-quality".to_string());
                args.push(format!("{}K", quality));
            }
            Self::EmbedThumbnail => args.push("--embed-thumbnail".to_string()),
            Self::AddMetadata => args.push("--embed-metadata".to_string()),
            Self::ConvertSubtitles { format } => {
                args.push("--convert-subs".to_string());
                args.push(format.clone());
            }
            Self::EmbedSubtitles => args.push("--embed-subs".to_string()),
            Self::ConvertVideo { format } => {
                args.push("--recode-video".to_string());
                args.push(format.clone());
            }
        }
    }
}

/// Subtitle download settings (video only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleOptions {
    pub write_manual: bool,
    pub write_automatic: bool,
    pub embed: bool,
    pub languages: Vec<String>,
    pub format: String,
}

impl SubtitleOptions {
    fn for_mode(mode: SubtitleMode) -> Self {
        Self {
            write_manual: true,
            write_automatic: true,
            embed: mode == SubtitleMode::Embed,
            // Empty entries are not representable on the command line.
            languages: ["en", "en.*", "en-US", "en-GB", "und"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            format: "srt/best".to_string(),
        }
    }
}

/// Everything yt-dlp needs for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadOptions {
    pub format: String,
    pub output_template: PathBuf,
    pub no_playlist: bool,
    pub quiet: bool,
    pub no_warnings: bool,
    pub merge_output_format: String,
    pub postprocessors: Vec<PostProcessor>,
    /// Keep going when one playlist entry fails
    pub ignore_errors: bool,
    pub write_thumbnail: bool,
    pub playlist_end: Option<u32>,
    pub subtitles: Option<SubtitleOptions>,
    /// Where yt-dlp should find ffmpeg
    pub ffmpeg_location: Option<PathBuf>,
}

/// Format selector: best audio, or best video capped at `max_height` plus best audio
pub fn format_spec(audio_only: bool, max_height: u32) -> String {
    if audio_only {
        "bestaudio/best".to_string()
    } else {
        format!(
            "bestvideo[height<={h}]+bestaudio/best[height<={h}]",
            h = max_height
        )
    }
}

/// Build the yt-dlp configuration for a request.
pub fn build_options(
    target_dir: &Path,
    audio_only: bool,
    playlist: bool,
    album_mode: bool,
    subtitle_mode: SubtitleMode,
    limits: &DemoLimits,
) -> DownloadOptions {
    let template = if playlist { PLAYLIST_TEMPLATE } else { SINGLE_TEMPLATE };

    let mut postprocessors = Vec::new();
    if audio_only {
        postprocessors.push(PostProcessor::ExtractAudio {
            codec: AUDIO_CODEC.to_string(),
            quality: AUDIO_QUALITY_KBPS,
        });
        if album_mode {
            postprocessors.push(PostProcessor::EmbedThumbnail);
            postprocessors.push(PostProcessor::AddMetadata);
        }
    } else {
        if subtitle_mode.is_on() {
            postprocessors.push(PostProcessor::ConvertSubtitles {
                format: SUBTITLE_FORMAT.to_string(),
            });
            if subtitle_mode == SubtitleMode::Embed {
                postprocessors.push(PostProcessor::EmbedSubtitles);
            }
        }
        postprocessors.push(PostProcessor::ConvertVideo {
            format: VIDEO_CONTAINER.to_string(),
        });
    }

    let subtitles = (!audio_only && subtitle_mode.is_on()).then(|| SubtitleOptions::for_mode(subtitle_mode));

    DownloadOptions {
        format: format_spec(audio_only, limits.max_video_height),
        output_template: target_dir.join(template),
        no_playlist: !playlist,
        quiet: true,
        no_warnings: true,
        merge_output_format: if audio_only { AUDIO_CODEC } else { VIDEO_CONTAINER }.to_string(),
        postprocessors,
        ignore_errors: true,
        write_thumbnail: audio_only && album_mode,
        playlist_end: (limits.enabled && playlist).then_some(limits.max_playlist_items),
        subtitles,
        ffmpeg_location: None,
    }
}

impl DownloadOptions {
    pub fn with_ffmpeg_location(mut self, path: Option<PathBuf>) -> Self {
        self.ffmpeg_location = path;
        self
    }

    pub fn is_audio(&self) -> bool {
        self.postprocessors
            .iter()
            .any(|p| matches!(p, PostProcessor::ExtractAudio { .. }))
    }

    /// Extension of the files this configuration ends up producing
    pub fn final_extension(&self) -> &str {
        self.postprocessors
            .iter()
            .rev()
            .find_map(|p| match p {
                PostProcessor::ExtractAudio { codec, .. } => Some(codec.as_str()),
                PostProcessor::ConvertVideo { format } => Some(format.as_str()),
                _ => None,
            })
            .unwrap_or(&self.merge_output_format)
    }

    /// Render as yt-dlp command-line flags (without the URL).
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            self.format.clone(),
            "-o".to_string(),
            self.output_template.to_string_lossy().to_string(),
        ];

        args.push(if self.no_playlist { "--no-playlist" } else { "--yes-playlist" }.to_string());
        if self.quiet {
            args.push("--quiet".to_string());
        }
        if self.no_warnings {
            args.push("--no-warnings".to_string());
        }
        // yt-dlp only accepts real containers here; audio never merges anyway.
        if !self.is_audio() {
            args.push("--merge-output-format".to_string());
            args.push(self.merge_output_format.clone());
        }
        if self.ignore_errors {
            args.push("--ignore-errors".to_string());
        }
        if self.write_thumbnail {
            args.push("--write-thumbnail".to_string());
        }
        if let Some(end) = self.playlist_end {
            args.push("--playlist-end".to_string());
            args.push(end.to_string());
        }
        if let Some(subs) = &self.subtitles {
            if subs.write_manual {
                args.push("--write-subs".to_string());
            }
            if subs.write_automatic {
                args.push("--write-auto-subs".to_string());
            }
            args.push("--sub-langs".to_string());
            args.push(subs.languages.join(","));
            args.push("--sub-format".to_string());
            args.push(subs.format.clone());
        }
        if let Some(ffmpeg) = &self.ffmpeg_location {
            args.push("--ffmpeg-location".to_string());
            args.push(ffmpeg.to_string_lossy().to_string());
        }
        for step in &self.postprocessors {
            step.push_args(&mut args);
        }

        args
    }
}
