use thiserror::Error;

use crate::download::ytdlp_errors::EngineFailure;

/// Structured error type for download operations.
///
/// Every failure of the extraction engine ends up here as a value; the
/// orchestrator never lets an engine problem escape as a panic.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Estimated size is above the configured ceiling; nothing was downloaded
    #[error("File size ({size_mb:.1}MB) exceeds maximum limit ({limit_mb}MB)")]
    TooLarge { size_mb: f64, limit_mb: u64 },

    /// The engine ran and reported a failure (network, unsupported site, restricted content)
    #[error("{message}")]
    Engine { kind: EngineFailure, message: String },

    /// Expected file not found after the engine finished
    #[error("{0}")]
    FileNotFound(String),

    /// The engine could not be started or its output was unreadable
    #[error("{0}")]
    Process(String),

    /// A diagnostic command timed out
    #[error("{0}")]
    Timeout(String),
}

impl DownloadError {
    /// Returns subcategory for logs
    pub fn subcategory(&self) -> &'static str {
        match self {
            DownloadError::TooLarge { .. } => "too_large",
            DownloadError::Engine { kind, .. } => kind.as_str(),
            DownloadError::FileNotFound(_) => "file_not_found",
            DownloadError::Process(_) => "process",
            DownloadError::Timeout(_) => "timeout",
        }
    }

    /// True when the download was refused because of its size.
    pub fn is_size_rejection(&self) -> bool {
        matches!(self, DownloadError::TooLarge { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_large_display() {
        let err = DownloadError::TooLarge {
            size_mb: 3000.0,
            limit_mb: 2048,
        };
        assert_eq!(err.to_string(), "File size (3000.0MB) exceeds maximum limit (2048MB)");
        assert!(err.is_size_rejection());
    }

    #[test]
    fn test_engine_error_display_is_message() {
        let err = DownloadError::Engine {
            kind: EngineFailure::Unavailable,
            message: "Private video".into(),
        };
        assert_eq!(err.to_string(), "Private video");
        assert_eq!(err.subcategory(), "unavailable");
        assert!(!err.is_size_rejection());
    }

    #[test]
    fn test_download_error_subcategory() {
        assert_eq!(DownloadError::FileNotFound("".into()).subcategory(), "file_not_found");
        assert_eq!(DownloadError::Process("".into()).subcategory(), "process");
        assert_eq!(DownloadError::Timeout("".into()).subcategory(), "timeout");
    }
}
