//! In-memory stand-ins for yt-dlp and ffmpeg.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tubefetch_lib::downloader::{
    DownloadError, DownloadOptions, Downloader, ExtractMode, MediaExtractor, Transcoder,
};

/// Answers the preview pass and the download pass with canned records.
pub struct FakeExtractor {
    preview: Result<Value, DownloadError>,
    download: Result<Value, DownloadError>,
    calls: Mutex<Vec<ExtractMode>>,
}

impl FakeExtractor {
    pub fn new(preview: Value, download: Value) -> Arc<Self> {
        Self::with_results(Ok(preview), Ok(download))
    }

    pub fn with_results(
        preview: Result<Value, DownloadError>,
        download: Result<Value, DownloadError>,
    ) -> Arc<Self> {
        Arc::new(Self {
            preview,
            download,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<ExtractMode> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaExtractor for FakeExtractor {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn extract_info(
        &self,
        _url: &str,
        _options: &DownloadOptions,
        mode: ExtractMode,
    ) -> Result<Value, DownloadError> {
        self.calls.lock().unwrap().push(mode);
        match mode {
            ExtractMode::Preview => self.preview.clone(),
            ExtractMode::Download => self.download.clone(),
        }
    }
}

/// Writes a placeholder output file instead of running ffmpeg.
#[derive(Default)]
pub struct FakeTranscoder {
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl FakeTranscoder {
    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transcoder for FakeTranscoder {
    async fn burn_subtitles(
        &self,
        video: &Path,
        subtitle: &Path,
        output: &Path,
    ) -> Result<(), DownloadError> {
        self.calls
            .lock()
            .unwrap()
            .push((video.to_path_buf(), subtitle.to_path_buf()));
        std::fs::write(output, b"burned").map_err(|e| DownloadError::BurnFailed(e.to_string()))
    }
}

/// An executable that is guaranteed to exist, standing in for ffmpeg.
pub fn present_ffmpeg() -> String {
    std::env::current_exe()
        .unwrap()
        .to_string_lossy()
        .to_string()
}

pub const ABSENT_FFMPEG: &str = "tubefetch-test-no-such-ffmpeg";

pub fn downloader(extractor: Arc<FakeExtractor>, transcoder: Arc<FakeTranscoder>) -> Downloader {
    Downloader::new(extractor, transcoder, present_ffmpeg())
}

/// Minimal form encoding for test bodies
pub fn form_encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(value: &str) -> String {
    let mut out = String::new();
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
