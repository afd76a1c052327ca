//! Extraction engine abstraction.
//!
//! Provides the `MediaEngine` trait the orchestrator drives. The production
//! backend is `YtDlpEngine`; tests plug in scripted engines so the download
//! flow can run without network access or external binaries.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::download::error::DownloadError;
use crate::download::format::EngineOptions;

/// Metadata reported by the engine's probe, before anything is downloaded.
///
/// Field names follow yt-dlp's info JSON so the probe output deserializes
/// directly; every field is optional because extractors fill them unevenly.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MediaInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub filesize_approx: Option<u64>,
    /// Formats picked for a merged download (video + audio)
    #[serde(default)]
    pub requested_formats: Vec<RequestedFormat>,
}

/// One of the formats yt-dlp selected for the download.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RequestedFormat {
    #[serde(default)]
    pub format_id: Option<String>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub filesize_approx: Option<u64>,
}

impl RequestedFormat {
    fn size_bytes(&self) -> Option<u64> {
        self.filesize.or(self.filesize_approx)
    }
}

impl MediaInfo {
    /// Best available size estimate in bytes, 0 when the extractor gave none.
    ///
    /// Order: exact `filesize`, then `filesize_approx`, then the sum over
    /// `requested_formats` for merged downloads.
    pub fn estimated_size_bytes(&self) -> u64 {
        if let Some(size) = self.filesize.or(self.filesize_approx) {
            return size;
        }
        self.requested_formats
            .iter()
            .filter_map(RequestedFormat::size_bytes)
            .sum()
    }

    /// Duration rounded down to whole seconds; negative or missing becomes 0.
    pub fn duration_secs(&self) -> u64 {
        self.duration.filter(|d| d.is_finite() && *d > 0.0).map(|d| d as u64).unwrap_or(0)
    }
}

/// Trait for extraction engine implementations.
#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// Human-readable name of this engine (e.g. "yt-dlp")
    fn name(&self) -> &str;

    /// Fetch metadata and a size estimate without downloading.
    async fn probe(&self, url: &Url, options: &EngineOptions) -> Result<MediaInfo, DownloadError>;

    /// Download the media and return the path of the final file on disk.
    async fn download(&self, url: &Url, options: &EngineOptions) -> Result<PathBuf, DownloadError>;
}
