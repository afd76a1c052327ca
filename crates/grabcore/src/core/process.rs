//! Process execution utilities
//!
//! Helpers for running the external extraction engine. Downloads run without a
//! timeout (the engine enforces its own network timeouts); short diagnostic
//! commands like `--version` use `run_with_timeout`.

use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

use crate::download::DownloadError;

/// Run an async Command to completion, capturing stdout and stderr.
///
/// `kill_on_drop` makes sure a cancelled handler does not leave an orphaned
/// yt-dlp process behind.
pub async fn run_captured(cmd: &mut Command) -> Result<Output, DownloadError> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    cmd.output().await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DownloadError::Process(format!("Extraction engine not found: {}", e))
        } else {
            DownloadError::Process(format!("Failed to run extraction engine: {}", e))
        }
    })
}

/// Run an async Command with a timeout.
///
/// Returns the process Output on success, or a DownloadError on timeout/IO failure.
pub async fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output, DownloadError> {
    match tokio::time::timeout(timeout, run_captured(cmd)).await {
        Ok(result) => result,
        Err(_) => Err(DownloadError::Timeout(format!(
            "Process timed out after {}s",
            timeout.as_secs()
        ))),
    }
}

/// Picks the most useful line out of an engine's stderr.
///
/// yt-dlp prefixes fatal problems with `ERROR:`; the last such line is the
/// one that explains the failure. Falls back to the last non-empty line.
pub fn last_error_line(stderr: &str) -> Option<&str> {
    let lines = || stderr.lines().map(str::trim).filter(|l| !l.is_empty());
    lines()
        .filter(|l| l.starts_with("ERROR:"))
        .last()
        .or_else(|| lines().last())
}
