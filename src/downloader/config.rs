// Process configuration read from the environment

use std::net::SocketAddr;

pub const ENV_DEMO_MODE: &str = "TUBEFETCH_DEMO_MODE";
pub const ENV_DEMO_MAX_ITEMS: &str = "TUBEFETCH_DEMO_MAX_ITEMS";
pub const ENV_DEMO_MAX_DURATION: &str = "TUBEFETCH_DEMO_MAX_DURATION";
pub const ENV_MAX_HEIGHT: &str = "TUBEFETCH_MAX_HEIGHT";
pub const ENV_YTDLP: &str = "TUBEFETCH_YTDLP";
pub const ENV_FFMPEG: &str = "TUBEFETCH_FFMPEG";
pub const ENV_ADDR: &str = "TUBEFETCH_ADDR";

/// Limits applied to every request while demo mode is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoLimits {
    pub enabled: bool,
    pub max_playlist_items: u32,
    pub max_duration_secs: u64,
    /// Applies to the format selector even outside demo mode
    pub max_video_height: u32,
}

impl Default for DemoLimits {
    fn default() -> Self {
        Self {
            enabled: true,
            max_playlist_items: 5,
            max_duration_secs: 600,
            max_video_height: 1080,
        }
    }
}

impl DemoLimits {
    /// Limits with demo mode switched off
    pub fn unrestricted() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn max_duration_minutes(&self) -> u64 {
        self.max_duration_secs / 60
    }
}

/// External programs, as names to look up on PATH or explicit paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub ytdlp: String,
    pub ffmpeg: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ytdlp: "yt-dlp".to_string(),
            ffmpeg: "ffmpeg".to_string(),
        }
    }
}

/// Everything the process needs, built once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub limits: DemoLimits,
    pub tools: ToolPaths,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests can inject values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DemoLimits::default();
        let limits = DemoLimits {
            enabled: lookup(ENV_DEMO_MODE).map_or(true, |v| v.trim() != "0"),
            max_playlist_items: parse_or(&lookup, ENV_DEMO_MAX_ITEMS, defaults.max_playlist_items),
            max_duration_secs: parse_or(&lookup, ENV_DEMO_MAX_DURATION, defaults.max_duration_secs),
            max_video_height: parse_or(&lookup, ENV_MAX_HEIGHT, defaults.max_video_height),
        };

        let tool_defaults = ToolPaths::default();
        let tools = ToolPaths {
            ytdlp: non_empty(lookup(ENV_YTDLP)).unwrap_or(tool_defaults.ytdlp),
            ffmpeg: non_empty(lookup(ENV_FFMPEG)).unwrap_or(tool_defaults.ffmpeg),
        };

        let bind_addr = parse_or(&lookup, ENV_ADDR, default_addr());

        Self {
            limits,
            tools,
            bind_addr,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            limits: DemoLimits::default(),
            tools: ToolPaths::default(),
            bind_addr: default_addr(),
        }
    }
}

fn default_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "ignoring malformed setting, using default");
                default
            }
        },
    }
}
