//! Engine options built from a request's quality and media kind.

use std::path::{Path, PathBuf};

use crate::core::config;
use crate::download::{MediaKind, Quality};

/// Output template appended to the download directory.
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Options bag handed to a `MediaEngine`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Full output template, `<dir>/%(title)s.%(ext)s`
    pub output_template: PathBuf,
    /// Format-selection expression
    pub format: String,
    /// Transcode the result to audio
    pub extract_audio: bool,
    pub audio_codec: Option<&'static str>,
    pub audio_bitrate: Option<&'static str>,
    /// Container for merged video+audio downloads
    pub merge_output_format: Option<&'static str>,
    /// Extra request headers as `(name, value)` pairs
    pub headers: Vec<(String, String)>,
}

impl EngineOptions {
    pub fn for_request(download_dir: &Path, quality: Quality, media_kind: MediaKind) -> Self {
        let headers = vec![("User-Agent".to_string(), config::engine::USER_AGENT.to_string())];
        let output_template = download_dir.join(OUTPUT_TEMPLATE);

        match media_kind {
            MediaKind::Audio => Self {
                output_template,
                format: "bestaudio/best".to_string(),
                extract_audio: true,
                audio_codec: Some("mp3"),
                audio_bitrate: Some("320"),
                merge_output_format: None,
                headers,
            },
            MediaKind::Video => Self {
                output_template,
                format: video_format(quality),
                extract_audio: false,
                audio_codec: None,
                audio_bitrate: None,
                merge_output_format: Some("mp4"),
                headers,
            },
        }
    }
}

/// Format expression for a video quality tier, always ending in plain `best`.
///
/// # Example
///
/// ```
/// use grabcore::download::format::video_format;
/// use grabcore::download::Quality;
///
/// assert_eq!(
///     video_format(Quality::P720),
///     "bestvideo[height<=720][ext=mp4]+bestaudio[ext=m4a]/best[height<=720][ext=mp4]/best"
/// );
/// ```
pub fn video_format(quality: Quality) -> String {
    match quality.max_height() {
        Some(h) => format!("bestvideo[height<={h}][ext=mp4]+bestaudio[ext=m4a]/best[height<={h}][ext=mp4]/best"),
        None => "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best".to_string(),
    }
}
