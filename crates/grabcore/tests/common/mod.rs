//! Common test utilities
//!
//! A scripted `MediaEngine` that never touches the network: the probe returns
//! canned metadata and the download writes a sparse file of the requested size.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use grabcore::download::{DownloadError, EngineFailure, EngineOptions, MediaEngine, MediaInfo};
use url::Url;

pub const MB: u64 = 1024 * 1024;

/// What the scripted download step does.
#[derive(Debug, Clone)]
pub enum DownloadScript {
    /// Write a file of this many bytes
    Bytes(u64),
    /// Fail like yt-dlp would
    Fail(EngineFailure, String),
}

pub struct ScriptedEngine {
    probe: Result<MediaInfo, (EngineFailure, String)>,
    download: DownloadScript,
    pub probe_calls: AtomicUsize,
    pub download_calls: AtomicUsize,
    pub seen_options: Mutex<Vec<EngineOptions>>,
}

impl ScriptedEngine {
    /// Probe estimates `estimated_mb`, download writes `actual_mb`.
    pub fn sized(title: &str, estimated_mb: u64, actual_mb: u64) -> Self {
        Self {
            probe: Ok(MediaInfo {
                title: Some(title.to_string()),
                uploader: Some("Test Channel".to_string()),
                duration: Some(125.0),
                filesize_approx: Some(estimated_mb * MB),
                ..Default::default()
            }),
            download: DownloadScript::Bytes(actual_mb * MB),
            probe_calls: AtomicUsize::new(0),
            download_calls: AtomicUsize::new(0),
            seen_options: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_probe(kind: EngineFailure, message: &str) -> Self {
        let mut engine = Self::sized("unused", 0, 0);
        engine.probe = Err((kind, message.to_string()));
        engine
    }

    pub fn failing_download(kind: EngineFailure, message: &str) -> Self {
        let mut engine = Self::sized("unused", 1, 1);
        engine.download = DownloadScript::Fail(kind, message.to_string());
        engine
    }

    pub fn probes(&self) -> usize {
        self.probe_calls.load(Ordering::SeqCst)
    }

    pub fn downloads(&self) -> usize {
        self.download_calls.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<EngineOptions> {
        self.seen_options.lock().unwrap().last().cloned()
    }
}

fn output_path(options: &EngineOptions, title: &str) -> PathBuf {
    let dir = options.output_template.parent().unwrap_or(Path::new("."));
    let ext = if options.extract_audio { "mp3" } else { "mp4" };
    dir.join(format!("{}.{}", title, ext))
}

#[async_trait]
impl MediaEngine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn probe(&self, _url: &Url, options: &EngineOptions) -> Result<MediaInfo, DownloadError> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        self.seen_options.lock().unwrap().push(options.clone());
        self.probe.clone().map_err(|(kind, message)| DownloadError::Engine { kind, message })
    }

    async fn download(&self, _url: &Url, options: &EngineOptions) -> Result<PathBuf, DownloadError> {
        self.download_calls.fetch_add(1, Ordering::SeqCst);
        match &self.download {
            DownloadScript::Bytes(size) => {
                let title = self
                    .probe
                    .as_ref()
                    .ok()
                    .and_then(|i| i.title.clone())
                    .unwrap_or_else(|| "media".to_string());
                let path = output_path(options, &title);
                let file = std::fs::File::create(&path).map_err(|e| DownloadError::Process(e.to_string()))?;
                file.set_len(*size).map_err(|e| DownloadError::Process(e.to_string()))?;
                Ok(path)
            }
            DownloadScript::Fail(kind, message) => Err(DownloadError::Engine {
                kind: *kind,
                message: message.clone(),
            }),
        }
    }
}
