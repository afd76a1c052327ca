//! Download management: request types, engine abstraction, orchestration

pub mod engine;
pub mod error;
pub mod format;
pub mod orchestrator;
pub mod temp;
pub mod ytdlp;
pub mod ytdlp_errors;

use strum::{AsRefStr, Display, EnumIter, EnumString};
use url::Url;

// Re-exports for convenience
pub use engine::{MediaEngine, MediaInfo};
pub use error::DownloadError;
pub use format::EngineOptions;
pub use orchestrator::{DownloadedMedia, Downloader, MediaMetadata};
pub use temp::{cleanup_file, RemoveOutcome, TempMedia};
pub use ytdlp::YtDlpEngine;
pub use ytdlp_errors::EngineFailure;

/// Video quality tier picked by the user.
///
/// Parsed from and rendered as the strings used in callback payloads
/// (`best`, `1080p`, `720p`, `480p`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, AsRefStr, EnumIter)]
pub enum Quality {
    #[default]
    #[strum(serialize = "best")]
    Best,
    #[strum(serialize = "1080p")]
    P1080,
    #[strum(serialize = "720p")]
    P720,
    #[strum(serialize = "480p")]
    P480,
}

impl Quality {
    /// Maximum frame height for this tier, `None` for best available.
    pub fn max_height(self) -> Option<u32> {
        match self {
            Quality::Best => None,
            Quality::P1080 => Some(1080),
            Quality::P720 => Some(720),
            Quality::P480 => Some(480),
        }
    }
}

/// What the user wants out of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Video,
    Audio,
}

/// A single download, fixed at the moment the link arrives.
///
/// Preferences changed afterwards do not affect a request already issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: Url,
    pub quality: Quality,
    pub media_kind: MediaKind,
}

impl DownloadRequest {
    pub fn new(url: Url, quality: Quality, media_kind: MediaKind) -> Self {
        Self {
            url,
            quality,
            media_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_quality_round_trips_through_callback_strings() {
        for quality in Quality::iter() {
            let parsed = Quality::from_str(&quality.to_string()).unwrap();
            assert_eq!(parsed, quality);
        }
        assert_eq!(Quality::P720.to_string(), "720p");
        assert!(Quality::from_str("4k").is_err());
    }

    #[test]
    fn test_quality_heights() {
        assert_eq!(Quality::Best.max_height(), None);
        assert_eq!(Quality::P480.max_height(), Some(480));
    }

    #[test]
    fn test_media_kind_strings() {
        assert_eq!(MediaKind::Audio.to_string(), "audio");
        assert_eq!(MediaKind::from_str("video").unwrap(), MediaKind::Video);
        assert_eq!(MediaKind::default(), MediaKind::Video);
    }
}
