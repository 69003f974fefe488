// yt-dlp backend - runs the native binary and reads its JSON info record
//
// Both passes use `--dump-single-json`; the preview adds `--skip-download`,
// the real pass adds `--no-simulate` so the record reflects the files on disk.

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

use crate::downloader::errors::DownloadError;
use crate::downloader::models::ExtractMode;
use crate::downloader::options::DownloadOptions;
use crate::downloader::tools;
use crate::downloader::traits::MediaExtractor;
use crate::downloader::utils::{last_line, run_captured, truncate_chars};

const MAX_ERROR_CHARS: usize = 500;

pub struct YtDlpCli {
    program: String,
}

impl YtDlpCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn resolve(&self) -> PathBuf {
        tools::locate(&self.program).unwrap_or_else(|| PathBuf::from(&self.program))
    }

    pub fn build_args(url: &str, options: &DownloadOptions, mode: ExtractMode) -> Vec<String> {
        let mut args = options.to_args();
        args.push("--dump-single-json".to_string());
        match mode {
            ExtractMode::Preview => args.push("--skip-download".to_string()),
            ExtractMode::Download => args.push("--no-simulate".to_string()),
        }
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }
}

/// The info record from yt-dlp's stdout, if it printed one
pub fn parse_info(stdout: &[u8]) -> Option<Value> {
    let text = String::from_utf8_lossy(stdout);
    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| line.starts_with('{'))
        .and_then(|line| serde_json::from_str::<Value>(line).ok())
        .filter(|v| v.is_object())
}

/// Short failure reason from yt-dlp's stderr
pub fn summarize_stderr(stderr: &str) -> String {
    let important: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with("ERROR:"))
        .take(2)
        .collect();

    let summary = if important.is_empty() {
        last_line(stderr).to_string()
    } else {
        important.join(" | ")
    };

    if summary.is_empty() {
        "yt-dlp exited without output".to_string()
    } else {
        truncate_chars(&summary, MAX_ERROR_CHARS).to_string()
    }
}

#[async_trait]
impl MediaExtractor for YtDlpCli {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn extract_info(
        &self,
        url: &str,
        options: &DownloadOptions,
        mode: ExtractMode,
    ) -> Result<Value, DownloadError> {
        let program = self.resolve();
        let args = Self::build_args(url, options, mode);
        tracing::debug!(%mode, program = %program.display(), args = %args.join(" "), "running yt-dlp");

        let output = run_captured(&program, &args).await.map_err(|e| match mode {
            ExtractMode::Preview => DownloadError::Preview(e),
            ExtractMode::Download => DownloadError::Extraction(e),
        })?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        // With --ignore-errors yt-dlp exits non-zero when some entries failed
        // but still prints the record for the ones that worked.
        match parse_info(&output.stdout) {
            Some(info) => {
                if !output.status.success() {
                    tracing::warn!(%mode, reason = %summarize_stderr(&stderr), "yt-dlp reported partial failure");
                }
                Ok(info)
            }
            None => {
                let reason = summarize_stderr(&stderr);
                tracing::warn!(%mode, status = ?output.status, %reason, "yt-dlp failed");
                Err(match mode {
                    ExtractMode::Preview => DownloadError::Preview(reason),
                    ExtractMode::Download => DownloadError::Extraction(reason),
                })
            }
        }
    }
}
