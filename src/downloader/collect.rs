// Output path discovery from a yt-dlp info record
//
// Sources are tried in order and the first one that yields any path wins.

use serde_json::Value;
use std::path::PathBuf;

/// Where in the info record to look for produced files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSource {
    /// Top-level `requested_downloads[].filepath`
    RequestedDownloads,
    /// One path per playlist entry
    Entries,
    /// The single filename yt-dlp computed for the record
    Computed,
}

pub const STRATEGIES: [PathSource; 3] = [
    PathSource::RequestedDownloads,
    PathSource::Entries,
    PathSource::Computed,
];

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// `filepath`, else `filename`, of a download or entry record
fn record_path(record: &Value) -> Option<PathBuf> {
    non_empty_str(&record["filepath"])
        .or_else(|| non_empty_str(&record["filename"]))
        .map(PathBuf::from)
}

fn requested_downloads(record: &Value) -> Vec<PathBuf> {
    record["requested_downloads"]
        .as_array()
        .map(|items| items.iter().filter_map(record_path).collect())
        .unwrap_or_default()
}

/// yt-dlp's pre-post-processing name, moved onto the final extension
fn computed_path(record: &Value, final_ext: &str) -> Option<PathBuf> {
    non_empty_str(&record["_filename"]).map(|name| PathBuf::from(name).with_extension(final_ext))
}

impl PathSource {
    pub fn collect(&self, info: &Value, final_ext: &str) -> Vec<PathBuf> {
        match self {
            Self::RequestedDownloads => requested_downloads(info),
            Self::Entries => info["entries"]
                .as_array()
                .map(|entries| {
                    entries
                        .iter()
                        .filter(|e| !e.is_null())
                        .flat_map(|entry| {
                            let downloads = requested_downloads(entry);
                            if downloads.is_empty() {
                                record_path(entry)
                                    .or_else(|| computed_path(entry, final_ext))
                                    .into_iter()
                                    .collect()
                            } else {
                                downloads
                            }
                        })
                        .collect()
                })
                .unwrap_or_default(),
            Self::Computed => record_path(info)
                .or_else(|| computed_path(info, final_ext))
                .into_iter()
                .collect(),
        }
    }
}

/// Paths of every file a download produced, or an empty list if none are known.
pub fn collect_filepaths(info: &Value, final_ext: &str) -> Vec<PathBuf> {
    for source in STRATEGIES {
        let paths = source.collect(info, final_ext);
        if !paths.is_empty() {
            tracing::debug!(?source, count = paths.len(), "collected output paths");
            return paths;
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_requested_downloads_win() {
        let info = json!({
            "requested_downloads": [{"filepath": "/d/Talk.mp4", "filename": "/d/Talk.webm"}],
            "entries": [{"filepath": "/d/other.mp4"}],
            "_filename": "/d/Talk.webm",
        });
        assert_eq!(collect_filepaths(&info, "mp4"), vec![PathBuf::from("/d/Talk.mp4")]);
    }

    #[test]
    fn test_filename_used_when_filepath_missing() {
        let info = json!({"requested_downloads": [{"filename": "/d/a.mp3"}, {}]});
        assert_eq!(collect_filepaths(&info, "mp3"), vec![PathBuf::from("/d/a.mp3")]);
    }

    #[test]
    fn test_playlist_entries() {
        let info = json!({
            "title": "Mix",
            "entries": [
                {"requested_downloads": [{"filepath": "/d/Mix/01 - A.mp3"}]},
                null,
                {"filename": "/d/Mix/02 - B.mp3"},
                {"_filename": "/d/Mix/03 - C.webm"},
            ],
        });
        assert_eq!(
            collect_filepaths(&info, "mp3"),
            vec![
                PathBuf::from("/d/Mix/01 - A.mp3"),
                PathBuf::from("/d/Mix/02 - B.mp3"),
                PathBuf::from("/d/Mix/03 - C.mp3"),
            ]
        );
    }

    #[test]
    fn test_computed_fallback() {
        let info = json!({"title": "Talk", "_filename": "/d/Talk.webm"});
        assert_eq!(collect_filepaths(&info, "mp4"), vec![PathBuf::from("/d/Talk.mp4")]);
        assert_eq!(
            PathSource::Computed.collect(&json!({"filepath": "/d/x.mp4"}), "mp4"),
            vec![PathBuf::from("/d/x.mp4")]
        );
    }

    #[test]
    fn test_nothing_known() {
        assert!(collect_filepaths(&json!({"title": "Ghost", "entries": []}), "mp4").is_empty());
        assert!(collect_filepaths(&json!({"entries": [null]}), "mp4").is_empty());
    }
}
