use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::config::ToolPaths;
use super::utils::run_captured;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ToolType {
    YtDlp,
    Ffmpeg,
}

impl ToolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolType::YtDlp => "yt-dlp",
            ToolType::Ffmpeg => "ffmpeg",
        }
    }

    fn version_arg(&self) -> &'static str {
        match self {
            ToolType::YtDlp => "--version",
            ToolType::Ffmpeg => "-version", // ffmpeg uses a single dash
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub tool_type: ToolType,
    pub version: Option<String>,
    pub path: Option<String>,
    pub is_available: bool,
}

/// Resolve a program name (searched on PATH) or explicit path to an executable.
pub fn locate(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

pub struct ToolManager {
    paths: ToolPaths,
}

impl ToolManager {
    pub fn new(paths: ToolPaths) -> Self {
        Self { paths }
    }

    fn program(&self, tool_type: ToolType) -> &str {
        match tool_type {
            ToolType::YtDlp => &self.paths.ytdlp,
            ToolType::Ffmpeg => &self.paths.ffmpeg,
        }
    }

    pub fn locate(&self, tool_type: ToolType) -> Option<PathBuf> {
        locate(self.program(tool_type))
    }

    pub async fn get_tool_info(&self, tool_type: ToolType) -> ToolInfo {
        let path = self.locate(tool_type);
        let version = match &path {
            Some(p) => get_version(p, tool_type).await,
            None => None,
        };

        ToolInfo {
            name: tool_type.as_str().to_string(),
            tool_type,
            version,
            is_available: path.is_some(),
            path: path.map(|p| p.to_string_lossy().to_string()),
        }
    }

    pub async fn get_all_tools(&self) -> Vec<ToolInfo> {
        vec![
            self.get_tool_info(ToolType::YtDlp).await,
            self.get_tool_info(ToolType::Ffmpeg).await,
        ]
    }
}

async fn get_version(path: &std::path::Path, tool_type: ToolType) -> Option<String> {
    match run_captured(path, [tool_type.version_arg()]).await {
        Ok(output) if output.status.success() => {
            let out = String::from_utf8_lossy(&output.stdout);
            // ffmpeg prints its build configuration after the first line
            out.lines().next().map(|l| l.trim().to_string()).filter(|l| !l.is_empty())
        }
        Ok(output) => {
            tracing::debug!(tool = tool_type.as_str(), status = ?output.status, "version probe failed");
            None
        }
        Err(e) => {
            tracing::debug!(tool = tool_type.as_str(), error = %e, "version probe failed");
            None
        }
    }
}
