use thiserror::Error;

use crate::core::validation::ValidationError;
use crate::download::DownloadError;

/// Centralized error type for the core library
///
/// Errors from every layer are converted into this enum so callers can use `?`
/// and still tell a bad URL apart from a failed download.
///
/// # Example
///
/// ```no_run
/// use grabcore::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Input validation errors (no URL, malformed URL)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Download/yt-dlp errors
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding errors (engine metadata)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl AppError {
    /// Short category name used in logs.
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "input",
            AppError::Download(DownloadError::TooLarge { .. }) => "size_rejected",
            AppError::Download(_) => "extraction",
            AppError::Io(_) | AppError::Json(_) | AppError::Url(_) => "internal",
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err: AppError = ValidationError::NoUrl.into();
        assert_eq!(err.category(), "input");

        let err: AppError = DownloadError::TooLarge {
            size_mb: 3000.0,
            limit_mb: 2048,
        }
        .into();
        assert_eq!(err.category(), "size_rejected");

        let err: AppError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "boom").into();
        assert_eq!(err.category(), "internal");
        assert_eq!(err.to_string(), "IO error: boom");
    }

    #[test]
    fn test_download_error_is_transparent() {
        let err: AppError = DownloadError::TooLarge {
            size_mb: 3000.0,
            limit_mb: 2048,
        }
        .into();
        assert_eq!(err.to_string(), "File size (3000.0MB) exceeds maximum limit (2048MB)");
    }
}
