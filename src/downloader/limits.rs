// Demo-mode limits checked against the preview record

use serde_json::Value;

use super::config::DemoLimits;
use super::errors::DownloadError;
use super::models::DownloadRequest;

fn exceeds(duration: Option<f64>, max_secs: u64) -> bool {
    duration.map_or(false, |d| d > max_secs as f64)
}

/// Reject a request whose preview shows media longer than the demo limit.
///
/// Audio-only requests are never duration-checked. Entries with no reported
/// duration pass.
pub fn enforce_demo_limits(
    info: &Value,
    request: &DownloadRequest,
    limits: &DemoLimits,
) -> Result<(), DownloadError> {
    if !limits.enabled || request.audio_only {
        return Ok(());
    }

    let minutes = limits.max_duration_minutes();
    let entries = info["entries"].as_array().filter(|e| !e.is_empty());

    match entries {
        Some(entries) if request.playlist => {
            for entry in entries
                .iter()
                .take(limits.max_playlist_items as usize)
                .filter(|e| !e.is_null())
            {
                if exceeds(entry["duration"].as_f64(), limits.max_duration_secs) {
                    let title = entry["title"].as_str().unwrap_or("video").to_string();
                    tracing::info!(%title, "playlist entry blocked by demo limit");
                    return Err(DownloadError::PlaylistItemTooLong { title, minutes });
                }
            }
        }
        _ => {
            if exceeds(info["duration"].as_f64(), limits.max_duration_secs) {
                return Err(DownloadError::VideoTooLong { minutes });
            }
        }
    }

    Ok(())
}
