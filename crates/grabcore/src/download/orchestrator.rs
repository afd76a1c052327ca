//! Download orchestration: options, pre-flight size check, download, normalization.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::core::config::{self, Settings};
use crate::core::utils::{bytes_to_mb, truncate_chars};
use crate::download::engine::{MediaEngine, MediaInfo};
use crate::download::error::DownloadError;
use crate::download::format::EngineOptions;
use crate::download::temp::TempMedia;
use crate::download::{DownloadRequest, MediaKind, Quality};

const UNKNOWN: &str = "Unknown";

/// Normalized metadata of a piece of media.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaMetadata {
    pub title: String,
    pub uploader: String,
    pub duration_secs: u64,
    pub thumbnail: Option<String>,
    /// Truncated to `DESCRIPTION_MAX_CHARS`
    pub description: String,
    pub estimated_size_mb: f64,
}

impl MediaMetadata {
    pub fn from_info(info: &MediaInfo) -> Self {
        let non_empty = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(UNKNOWN)
                .to_string()
        };

        Self {
            title: non_empty(&info.title),
            uploader: non_empty(&info.uploader),
            duration_secs: info.duration_secs(),
            thumbnail: info.thumbnail.clone(),
            description: truncate_chars(
                info.description.as_deref().unwrap_or_default(),
                config::limits::DESCRIPTION_MAX_CHARS,
            ),
            estimated_size_mb: bytes_to_mb(info.estimated_size_bytes()),
        }
    }
}

/// A successfully downloaded file together with its metadata.
///
/// Owns the file through `TempMedia`: dropping the value deletes it.
#[derive(Debug)]
pub struct DownloadedMedia {
    pub file: TempMedia,
    pub metadata: MediaMetadata,
    /// Measured on disk after the download
    pub file_size_mb: f64,
    pub media_kind: MediaKind,
}

/// Drives a `MediaEngine` for single download requests.
#[derive(Clone)]
pub struct Downloader {
    engine: Arc<dyn MediaEngine>,
    download_dir: PathBuf,
    max_file_size_mb: u64,
}

impl Downloader {
    pub fn new(engine: Arc<dyn MediaEngine>, settings: &Settings) -> Self {
        Self {
            engine,
            download_dir: settings.download_dir.clone(),
            max_file_size_mb: settings.max_file_size_mb,
        }
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn max_file_size_mb(&self) -> u64 {
        self.max_file_size_mb
    }

    pub fn options_for(&self, quality: Quality, media_kind: MediaKind) -> EngineOptions {
        EngineOptions::for_request(&self.download_dir, quality, media_kind)
    }

    /// Probe only: metadata and size estimate, nothing is downloaded.
    pub async fn probe(&self, url: &Url, quality: Quality, media_kind: MediaKind) -> Result<MediaMetadata, DownloadError> {
        let options = self.options_for(quality, media_kind);
        let info = self.engine.probe(url, &options).await?;
        Ok(MediaMetadata::from_info(&info))
    }

    /// Runs one request to completion.
    ///
    /// Refuses with `DownloadError::TooLarge` before downloading when the
    /// estimate is above the ceiling. The returned file is owned by the
    /// result and removed when it is dropped.
    pub async fn fetch(&self, request: &DownloadRequest) -> Result<DownloadedMedia, DownloadError> {
        let options = self.options_for(request.quality, request.media_kind);

        log::info!(
            "Probing {} (quality={}, kind={}) with {}",
            request.url,
            request.quality,
            request.media_kind,
            self.engine.name()
        );
        let info = self.engine.probe(&request.url, &options).await?;
        let metadata = MediaMetadata::from_info(&info);

        if metadata.estimated_size_mb > self.max_file_size_mb as f64 {
            log::info!(
                "Rejecting {} before download: estimated {:.1}MB > {}MB",
                request.url,
                metadata.estimated_size_mb,
                self.max_file_size_mb
            );
            return Err(DownloadError::TooLarge {
                size_mb: metadata.estimated_size_mb,
                limit_mb: self.max_file_size_mb,
            });
        }

        let path = self.engine.download(&request.url, &options).await?;
        let file = TempMedia::new(path);
        let size_bytes = file
            .size_bytes()
            .map_err(|e| DownloadError::FileNotFound(format!("Cannot read downloaded file: {}", e)))?;
        let file_size_mb = bytes_to_mb(size_bytes);

        log::info!(
            "Downloaded '{}' ({:.1}MB) to {}",
            metadata.title,
            file_size_mb,
            file.path().display()
        );

        Ok(DownloadedMedia {
            file,
            metadata,
            file_size_mb,
            media_kind: request.media_kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_defaults() {
        let meta = MediaMetadata::from_info(&MediaInfo::default());
        assert_eq!(meta.title, "Unknown");
        assert_eq!(meta.uploader, "Unknown");
        assert_eq!(meta.description, "");
        assert_eq!(meta.duration_secs, 0);
        assert_eq!(meta.estimated_size_mb, 0.0);
    }

    #[test]
    fn test_metadata_description_truncated() {
        let info = MediaInfo {
            title: Some("  ".into()),
            description: Some("x".repeat(500)),
            filesize: Some(50 * 1024 * 1024),
            ..Default::default()
        };
        let meta = MediaMetadata::from_info(&info);
        assert_eq!(meta.title, "Unknown");
        assert_eq!(meta.description.chars().count(), 200);
        assert_eq!(meta.estimated_size_mb, 50.0);
    }
}
