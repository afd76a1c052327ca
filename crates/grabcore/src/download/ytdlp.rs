//! YtDlpEngine: the production `MediaEngine`, powered by the yt-dlp binary.
//!
//! Runs yt-dlp as an async child process so a long download never blocks the
//! runtime. The probe uses `-J` (single JSON document on stdout); the download
//! uses `--print after_move:filepath` to learn the final path after merging and
//! post-processing.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use url::Url;

use crate::core::config;
use crate::core::process::{last_error_line, run_captured, run_with_timeout};
use crate::core::utils::truncate_chars;
use crate::download::engine::{MediaEngine, MediaInfo};
use crate::download::error::DownloadError;
use crate::download::format::EngineOptions;
use crate::download::ytdlp_errors::analyze_ytdlp_error;

/// Extraction engine backed by the `yt-dlp` executable.
#[derive(Debug, Clone)]
pub struct YtDlpEngine {
    bin: String,
}

impl Default for YtDlpEngine {
    fn default() -> Self {
        Self::new(config::YTDL_BIN.as_str())
    }
}

impl YtDlpEngine {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Runs `yt-dlp --version` and returns the trimmed version string.
    pub async fn version(&self) -> Result<String, DownloadError> {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("--version");
        let output = run_with_timeout(&mut cmd, config::engine::version_check_timeout()).await?;
        if !output.status.success() {
            return Err(DownloadError::Process(format!(
                "{} --version exited with {}",
                self.bin, output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Arguments shared by probe and download.
    fn common_args(url: &Url, options: &EngineOptions) -> Vec<String> {
        let mut args = vec![
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "-f".to_string(),
            options.format.clone(),
        ];
        for (name, value) in &options.headers {
            args.push("--add-header".to_string());
            args.push(format!("{}:{}", name, value));
        }
        args.push("-o".to_string());
        args.push(options.output_template.to_string_lossy().into_owned());
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }

    /// Arguments for the metadata probe.
    pub fn probe_args(url: &Url, options: &EngineOptions) -> Vec<String> {
        let mut args = vec!["-J".to_string()];
        args.extend(Self::common_args(url, options));
        args
    }

    /// Arguments for the actual download.
    pub fn download_args(url: &Url, options: &EngineOptions) -> Vec<String> {
        let mut args = vec![
            "--no-simulate".to_string(),
            "--quiet".to_string(),
            "--print".to_string(),
            "after_move:filepath".to_string(),
        ];
        if options.extract_audio {
            args.push("-x".to_string());
            if let Some(codec) = options.audio_codec {
                args.push("--audio-format".to_string());
                args.push(codec.to_string());
            }
            if let Some(bitrate) = options.audio_bitrate {
                args.push("--audio-quality".to_string());
                args.push(format!("{}K", bitrate));
            }
        }
        if let Some(container) = options.merge_output_format {
            args.push("--merge-output-format".to_string());
            args.push(container.to_string());
        }
        args.extend(Self::common_args(url, options));
        args
    }

    async fn run(&self, args: &[String]) -> Result<std::process::Output, DownloadError> {
        log::debug!("{} {}", self.bin, args.join(" "));
        let mut cmd = Command::new(&self.bin);
        cmd.args(args);
        let output = run_captured(&mut cmd).await?;
        if output.status.success() {
            return Ok(output);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let kind = analyze_ytdlp_error(&stderr);
        let line = last_error_line(&stderr).unwrap_or("yt-dlp failed without an error message");
        let message = truncate_chars(line, config::limits::ERROR_DETAILS_MAX_CHARS);
        log::warn!("{} failed ({}): {}", self.bin, kind.as_str(), message);
        Err(DownloadError::Engine { kind, message })
    }
}

/// Parses the `-J` output of yt-dlp.
pub fn parse_probe_output(stdout: &[u8]) -> Result<MediaInfo, DownloadError> {
    serde_json::from_slice(stdout).map_err(|e| DownloadError::Process(format!("Unreadable yt-dlp metadata: {}", e)))
}

/// Picks the final file path out of `--print after_move:filepath` output.
pub fn parse_printed_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .map(PathBuf::from)
}

#[async_trait]
impl MediaEngine for YtDlpEngine {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn probe(&self, url: &Url, options: &EngineOptions) -> Result<MediaInfo, DownloadError> {
        let output = self.run(&Self::probe_args(url, options)).await?;
        parse_probe_output(&output.stdout)
    }

    async fn download(&self, url: &Url, options: &EngineOptions) -> Result<PathBuf, DownloadError> {
        let output = self.run(&Self::download_args(url, options)).await?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = parse_printed_path(&stdout)
            .ok_or_else(|| DownloadError::FileNotFound("yt-dlp did not report the downloaded file".to_string()))?;

        if fs_err::tokio::metadata(&path).await.is_err() {
            return Err(DownloadError::FileNotFound(format!(
                "Downloaded file not found: {}",
                path.display()
            )));
        }
        Ok(path)
    }
}
