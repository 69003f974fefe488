// Server-rendered fetch page

use serde::Deserialize;

use crate::downloader::{DemoLimits, DownloadRequest, SubtitleMode};

/// Raw form submission. Unchecked checkboxes are simply absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub output_dir: String,
    /// `audio` or `video`
    #[serde(default)]
    pub format: String,
    /// `playlist` or `single`
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub subtitles: String,
    pub zip: Option<String>,
    pub album: Option<String>,
}

impl FetchForm {
    pub fn with_output_dir(output_dir: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            format: "audio".to_string(),
            mode: "playlist".to_string(),
            subtitles: SubtitleMode::Off.as_str().to_string(),
            zip: Some("on".to_string()),
            album: Some("on".to_string()),
            ..Default::default()
        }
    }

    pub fn is_audio(&self) -> bool {
        self.format == "audio"
    }

    pub fn is_playlist(&self) -> bool {
        self.mode == "playlist"
    }

    pub fn wants_zip(&self) -> bool {
        self.zip.is_some()
    }

    pub fn wants_album(&self) -> bool {
        self.album.is_some()
    }

    /// Subtitle choice only applies to video; album mode only to audio.
    pub fn to_request(&self) -> DownloadRequest {
        let audio = self.is_audio();
        let subtitles = if audio {
            SubtitleMode::Off
        } else {
            SubtitleMode::from_form(&self.subtitles)
        };
        DownloadRequest::new(self.url.trim(), self.output_dir.trim())
            .audio(audio)
            .playlist(self.is_playlist())
            .album_mode(audio && self.wants_album())
            .subtitles(subtitles)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

impl Banner {
    fn render(&self) -> String {
        let (class, text) = match self {
            Banner::Success(text) => ("banner success", text),
            Banner::Error(text) => ("banner error", text),
        };
        format!("<div class=\"{}\">{}</div>", class, html_escape(text))
    }
}

pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn demo_notice(limits: &DemoLimits) -> String {
    if !limits.enabled {
        return String::new();
    }
    format!(
        "<p class=\"notice\">Demo mode: playlists are limited to {} items and videos to {} minutes (max {}p).</p>",
        limits.max_playlist_items,
        limits.max_duration_minutes(),
        limits.max_video_height,
    )
}

fn checked(on: bool) -> &'static str {
    if on {
        " checked"
    } else {
        ""
    }
}

fn radio(name: &str, value: &str, label: &str, current: &str) -> String {
    format!(
        "<label><input type=\"radio\" name=\"{}\" value=\"{}\"{}> {}</label>",
        name,
        value,
        checked(current == value),
        label
    )
}

pub fn render(form: &FetchForm, limits: &DemoLimits, banner: Option<&Banner>) -> String {
    let subtitles = SubtitleMode::from_form(&form.subtitles);
    let subtitle_options: String = [
        (SubtitleMode::Off, "None"),
        (SubtitleMode::Embed, "Embed"),
        (SubtitleMode::Burn, "Burn in"),
    ]
    .iter()
    .map(|(mode, label)| {
        format!(
            "<option value=\"{}\"{}>{}</option>",
            mode.as_str(),
            if *mode == subtitles { " selected" } else { "" },
            label
        )
    })
    .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>TubeFetch</title>
<style>
body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }}
label {{ display: block; margin: .4rem 0; }}
input[type=text] {{ width: 100%; }}
.banner {{ padding: .6rem; margin: 1rem 0; border-radius: 4px; }}
.success {{ background: #e3f6e5; }}
.error {{ background: #fbe3e3; }}
.notice {{ color: #666; }}
</style>
</head>
<body>
<h1>TubeFetch</h1>
{notice}
{banner}
<form method="post" action="/fetch">
<label>Link <input type="text" name="url" value="{url}" placeholder="https://www.youtube.com/watch?v=..."></label>
<label>Save to <input type="text" name="output_dir" value="{output_dir}"></label>
<fieldset><legend>Format</legend>{audio}{video}</fieldset>
<fieldset><legend>Mode</legend>{single}{playlist}</fieldset>
<label><input type="checkbox" name="zip" value="on"{zip}> Zip playlist</label>
<label><input type="checkbox" name="album" value="on"{album}> Album mode (cover art and tags, audio only)</label>
<label>Subtitles (video only) <select name="subtitles">{subtitle_options}</select></label>
<button type="submit">Fetch</button>
</form>
</body>
</html>
"#,
        notice = demo_notice(limits),
        banner = banner.map(Banner::render).unwrap_or_default(),
        url = html_escape(&form.url),
        output_dir = html_escape(&form.output_dir),
        audio = radio("format", "audio", "Audio (mp3)", &form.format),
        video = radio("format", "video", "Video (mp4)", &form.format),
        single = radio("mode", "single", "Single video", &form.mode),
        playlist = radio("mode", "playlist", "Playlist", &form.mode),
        zip = checked(form.wants_zip()),
        album = checked(form.wants_album()),
        subtitle_options = subtitle_options,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#39;y&#39;)&lt;/script&gt;"
        );
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_to_request_ignores_subtitles_for_audio() {
        let form = FetchForm {
            url: "  https://youtu.be/x ".to_string(),
            output_dir: "/d".to_string(),
            format: "audio".to_string(),
            mode: "playlist".to_string(),
            subtitles: "burn".to_string(),
            zip: None,
            album: Some("on".to_string()),
        };
        let req = form.to_request();
        assert_eq!(req.url, "https://youtu.be/x");
        assert!(req.audio_only);
        assert!(req.playlist);
        assert!(req.album_mode);
        assert_eq!(req.subtitle_mode, SubtitleMode::Off);
    }

    #[test]
    fn test_to_request_ignores_album_for_video() {
        let form = FetchForm {
            url: "https://youtu.be/x".to_string(),
            format: "video".to_string(),
            subtitles: "embed".to_string(),
            album: Some("on".to_string()),
            ..FetchForm::with_output_dir("/d")
        };
        let req = form.to_request();
        assert!(!req.audio_only);
        assert!(!req.album_mode);
        assert_eq!(req.subtitle_mode, SubtitleMode::Embed);
    }

    #[test]
    fn test_render_escapes_user_text() {
        let form = FetchForm {
            url: "\"><b>".to_string(),
            ..FetchForm::with_output_dir("/d")
        };
        let banner = Banner::Error("<oops>".to_string());
        let html = render(&form, &DemoLimits::default(), Some(&banner));
        assert!(html.contains("value=\"&quot;&gt;&lt;b&gt;\""));
        assert!(html.contains("<div class=\"banner error\">&lt;oops&gt;</div>"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_blank_form_defaults() {
        let form = FetchForm::with_output_dir("/d");
        assert!(form.is_audio());
        assert!(form.is_playlist());
        assert!(form.wants_zip());
        assert!(form.wants_album());

        let html = render(&form, &DemoLimits::default(), None);
        assert!(html.contains("name=\"format\" value=\"audio\" checked"));
        assert!(html.contains("name=\"mode\" value=\"playlist\" checked"));
        assert!(html.contains("name=\"zip\" value=\"on\" checked"));
        assert!(html.contains("name=\"album\" value=\"on\" checked"));
    }

    #[test]
    fn test_demo_notice_follows_limits() {
        let form = FetchForm::with_output_dir("/d");
        let html = render(&form, &DemoLimits::default(), None);
        assert!(html.contains("limited to 5 items and videos to 10 minutes"));

        let html = render(&form, &DemoLimits::unrestricted(), None);
        assert!(!html.contains("Demo mode"));
    }
}
