// ffmpeg backend - hard-burns subtitles into a video

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::downloader::errors::DownloadError;
use crate::downloader::subtitles::subtitles_filter;
use crate::downloader::tools;
use crate::downloader::traits::Transcoder;
use crate::downloader::utils::{run_captured, truncate_chars};

const MAX_ERROR_CHARS: usize = 500;

pub struct FfmpegTranscoder {
    program: String,
}

impl FfmpegTranscoder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Re-encode the video with the subtitle overlay; audio is copied as-is.
    pub fn build_args(video: &Path, subtitle: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-hide_banner".into(),
            "-loglevel".into(),
            "error".into(),
            "-y".into(),
            "-i".into(),
            video.as_os_str().to_owned(),
            "-vf".into(),
            subtitles_filter(subtitle).into(),
            "-c:a".into(),
            "copy".into(),
            output.as_os_str().to_owned(),
        ]
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn burn_subtitles(
        &self,
        video: &Path,
        subtitle: &Path,
        output: &Path,
    ) -> Result<(), DownloadError> {
        let program = tools::locate(&self.program).unwrap_or_else(|| PathBuf::from(&self.program));
        let args = Self::build_args(video, subtitle, output);

        let result = run_captured(&program, &args)
            .await
            .map_err(DownloadError::BurnFailed)?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let stderr = stderr.trim();
            tracing::warn!(status = ?result.status, video = %video.display(), "ffmpeg failed");
            return Err(DownloadError::BurnFailed(
                truncate_chars(stderr, MAX_ERROR_CHARS).to_string(),
            ));
        }

        tracing::info!(output = %output.display(), "subtitles burned");
        Ok(())
    }
}
