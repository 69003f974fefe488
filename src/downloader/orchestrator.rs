// Orchestrator - one request from validation to finished files

use std::path::PathBuf;
use std::sync::Arc;

use super::collect::collect_filepaths;
use super::config::{DemoLimits, ToolPaths};
use super::errors::DownloadError;
use super::limits::enforce_demo_limits;
use super::models::{DownloadRequest, ExtractMode, FetchResult};
use super::options::build_options;
use super::subtitles::burn_all;
use super::tools;
use super::traits::{MediaExtractor, Transcoder};
use super::utils::expand_home;

pub struct Downloader {
    extractor: Arc<dyn MediaExtractor>,
    transcoder: Arc<dyn Transcoder>,
    /// ffmpeg name or path, checked before every fetch
    ffmpeg_program: String,
}

impl Downloader {
    pub fn new(
        extractor: Arc<dyn MediaExtractor>,
        transcoder: Arc<dyn Transcoder>,
        ffmpeg_program: impl Into<String>,
    ) -> Self {
        Self {
            extractor,
            transcoder,
            ffmpeg_program: ffmpeg_program.into(),
        }
    }

    /// Wire up the real yt-dlp and ffmpeg backends.
    pub fn with_tools(paths: &ToolPaths) -> Self {
        Self::new(
            Arc::new(super::backends::YtDlpCli::new(paths.ytdlp.clone())),
            Arc::new(super::backends::FfmpegTranscoder::new(paths.ffmpeg.clone())),
            paths.ffmpeg.clone(),
        )
    }

    /// Download one video and return its file.
    pub async fn download_video(
        &self,
        request: &DownloadRequest,
        limits: &DemoLimits,
    ) -> Result<PathBuf, DownloadError> {
        let single = DownloadRequest {
            playlist: false,
            ..request.clone()
        };
        let files = self.fetch(&single, limits).await?;
        files.into_iter().next().ok_or(DownloadError::NoFiles)
    }

    /// Download a whole playlist (capped in demo mode) and return every file.
    pub async fn download_playlist(
        &self,
        request: &DownloadRequest,
        limits: &DemoLimits,
    ) -> Result<FetchResult, DownloadError> {
        let playlist = DownloadRequest {
            playlist: true,
            ..request.clone()
        };
        self.fetch(&playlist, limits).await
    }

    /// Run the full pipeline for `request`.
    pub async fn fetch(
        &self,
        request: &DownloadRequest,
        limits: &DemoLimits,
    ) -> Result<FetchResult, DownloadError> {
        let url = request.url.trim();
        if url.is_empty() {
            return Err(DownloadError::MissingUrl);
        }

        let ffmpeg = tools::locate(&self.ffmpeg_program).ok_or(DownloadError::MissingTranscoder)?;

        let target_dir = prepare_target_dir(&request.output_dir)?;
        tracing::info!(
            %url,
            dir = %target_dir.display(),
            audio_only = request.audio_only,
            playlist = request.playlist,
            subtitles = %request.subtitle_mode,
            "starting fetch"
        );

        let options = build_options(
            &target_dir,
            request.audio_only,
            request.playlist,
            request.album_mode && request.audio_only,
            request.subtitle_mode,
            limits,
        )
        .with_ffmpeg_location(Some(ffmpeg));

        // Preview first so limits are enforced before anything is fetched.
        let preview = self
            .extractor
            .extract_info(url, &options, ExtractMode::Preview)
            .await?;
        enforce_demo_limits(&preview, request, limits)?;

        let info = self
            .extractor
            .extract_info(url, &options, ExtractMode::Download)
            .await
            .map_err(|e| match e {
                DownloadError::Extraction(_) => e,
                other => DownloadError::Extraction(other.to_string()),
            })?;

        let files = collect_filepaths(&info, options.final_extension());
        if files.is_empty() {
            return Err(DownloadError::NoFiles);
        }
        tracing::info!(count = files.len(), extractor = self.extractor.name(), "download finished");

        if request.wants_burn() {
            return burn_all(&files, self.transcoder.as_ref()).await;
        }

        Ok(files)
    }
}

/// Expand, create and canonicalize the destination folder.
fn prepare_target_dir(raw: &str) -> Result<PathBuf, DownloadError> {
    let dir = expand_home(raw);
    std::fs::create_dir_all(&dir)
        .map_err(|e| DownloadError::io(&format!("Failed to create {}", dir.display()), e))?;
    dir.canonicalize()
        .map_err(|e| DownloadError::io(&format!("Failed to resolve {}", dir.display()), e))
}
