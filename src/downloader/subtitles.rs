// Hard-subtitle burn-in for downloaded videos

use std::path::{Path, PathBuf};

use super::errors::DownloadError;
use super::traits::Transcoder;

/// Sidecar suffixes yt-dlp leaves next to a video, most specific first
const SUBTITLE_SUFFIXES: [&str; 4] = [".en.srt", ".srt", ".en.vtt", ".vtt"];

const BURNED_MARKER: &str = "subbed";

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Candidate subtitle files for `video`, in lookup order
pub fn subtitle_candidates(video: &Path) -> Vec<PathBuf> {
    let stem = file_stem(video);
    let parent = video.parent().unwrap_or_else(|| Path::new(""));
    SUBTITLE_SUFFIXES
        .iter()
        .map(|suffix| parent.join(format!("{}{}", stem, suffix)))
        .collect()
}

/// First existing subtitle file for `video`
pub fn find_subtitle_file(video: &Path) -> Option<PathBuf> {
    subtitle_candidates(video).into_iter().find(|c| c.is_file())
}

/// `Talk.mp4` -> `Talk.subbed.mp4`, in the same directory
pub fn burned_path(video: &Path) -> PathBuf {
    let stem = file_stem(video);
    let name = match video.extension() {
        Some(ext) => format!("{}.{}.{}", stem, BURNED_MARKER, ext.to_string_lossy()),
        None => format!("{}.{}", stem, BURNED_MARKER),
    };
    video.with_file_name(name)
}

fn escape_chars(input: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        if special.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Escape a path for use as a filter option value inside an ffmpeg filtergraph.
///
/// The option parser and the filtergraph parser each strip one level of
/// escaping, so the value is escaped twice.
pub fn escape_filter_path(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let option_level = escape_chars(&normalized, &['\\', '\'', ':']);
    escape_chars(&option_level, &['\\', '\'', '[', ']', ',', ';'])
}

/// `-vf` argument that renders `subtitle` onto the video stream
pub fn subtitles_filter(subtitle: &Path) -> String {
    format!("subtitles=filename={}", escape_filter_path(subtitle))
}

/// Burn subtitles into every video, returning the new files in the same order.
///
/// Stops at the first video that has no subtitle or fails to transcode.
pub async fn burn_all(
    videos: &[PathBuf],
    transcoder: &dyn Transcoder,
) -> Result<Vec<PathBuf>, DownloadError> {
    let mut burned = Vec::with_capacity(videos.len());
    for video in videos {
        let subtitle = find_subtitle_file(video)
            .ok_or_else(|| DownloadError::SubtitleNotFound(display_name(video)))?;
        let output = burned_path(video);
        tracing::info!(
            video = %video.display(),
            subtitle = %subtitle.display(),
            "burning subtitles"
        );
        transcoder.burn_subtitles(video, &subtitle, &output).await?;
        burned.push(output);
    }
    Ok(burned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTranscoder {
        calls: Mutex<Vec<(PathBuf, PathBuf, PathBuf)>>,
    }

    #[async_trait]
    impl Transcoder for RecordingTranscoder {
        async fn burn_subtitles(
            &self,
            video: &Path,
            subtitle: &Path,
            output: &Path,
        ) -> Result<(), DownloadError> {
            self.calls.lock().unwrap().push((
                video.to_path_buf(),
                subtitle.to_path_buf(),
                output.to_path_buf(),
            ));
            Ok(())
        }
    }

    #[test]
    fn test_candidates_order() {
        let names: Vec<String> = subtitle_candidates(Path::new("/d/Talk.mp4"))
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["/d/Talk.en.srt", "/d/Talk.srt", "/d/Talk.en.vtt", "/d/Talk.vtt"]
        );
    }

    #[test]
    fn test_burned_path() {
        assert_eq!(burned_path(Path::new("/d/Talk.mp4")), PathBuf::from("/d/Talk.subbed.mp4"));
        assert_eq!(
            burned_path(Path::new("/d/01 - Intro.v2.mp4")),
            PathBuf::from("/d/01 - Intro.v2.subbed.mp4")
        );
        assert_eq!(burned_path(Path::new("/d/raw")), PathBuf::from("/d/raw.subbed"));
    }

    #[test]
    fn test_find_prefers_tagged_srt() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("Talk.mp4");
        std::fs::write(&video, b"").unwrap();
        std::fs::write(dir.path().join("Talk.vtt"), b"").unwrap();
        assert_eq!(find_subtitle_file(&video), Some(dir.path().join("Talk.vtt")));

        std::fs::write(dir.path().join("Talk.en.srt"), b"").unwrap();
        assert_eq!(find_subtitle_file(&video), Some(dir.path().join("Talk.en.srt")));
    }

    #[test]
    fn test_escape_filter_path() {
        assert_eq!(escape_filter_path(Path::new("/d/Talk.en.srt")), "/d/Talk.en.srt");
        assert_eq!(
            escape_filter_path(Path::new("/d/It's: a, [b].srt")),
            r"/d/It\\\'s\\: a\, \[b\].srt"
        );
        assert_eq!(
            subtitles_filter(Path::new("/d/Talk.srt")),
            "subtitles=filename=/d/Talk.srt"
        );
    }

    #[tokio::test]
    async fn test_burn_all_uses_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("Talk.mp4");
        std::fs::write(&video, b"").unwrap();
        std::fs::write(dir.path().join("Talk.en.srt"), b"1\n").unwrap();

        let transcoder = RecordingTranscoder::default();
        let out = burn_all(&[video.clone()], &transcoder).await.unwrap();

        assert_eq!(out, vec![dir.path().join("Talk.subbed.mp4")]);
        let calls = transcoder.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, dir.path().join("Talk.en.srt"));
    }

    #[tokio::test]
    async fn test_burn_all_missing_subtitle_names_video() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("Talk.mp4");
        std::fs::write(&video, b"").unwrap();

        let transcoder = RecordingTranscoder::default();
        let err = burn_all(&[video], &transcoder).await.unwrap_err();

        assert_eq!(err, DownloadError::SubtitleNotFound("Talk.mp4".to_string()));
        assert_eq!(err.to_string(), "Subtitle file not found to burn for Talk.mp4");
        assert!(transcoder.calls.lock().unwrap().is_empty());
    }
}
