//! URL extraction and validation
//!
//! Two passes over a chat message:
//! - a broad scan that picks out every `http(s)://` substring
//! - a strict validator that checks scheme, host shape, port and path
//!   before the first candidate is handed to the downloader

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::core::config;

/// Validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The message contains no `http(s)://` substring
    #[error("No valid URL found")]
    NoUrl,

    /// A URL-shaped substring failed the strict check
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),

    /// URL longer than `MAX_URL_LENGTH`
    #[error("URL too long: {len} characters (max: {max})")]
    TooLong { len: usize, max: usize },
}

/// Broad URL scanner: scheme followed by URL-safe characters and percent escapes.
///
/// `$-_` is a range and covers digits, upper-case letters and most punctuation.
#[allow(clippy::expect_used)]
static URL_SCAN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[a-zA-Z0-9$-_@.&+!*(),]+").expect("Failed to compile URL scan regex"));

/// Strict URL shape: domain name, `localhost` or IPv4, optional port, optional path.
#[allow(clippy::expect_used)]
static URL_STRICT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,63}\.?",
        r"|localhost",
        r"|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("Failed to compile strict URL regex")
});

/// Result of looking at a chat message for a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlInspection {
    /// No `http(s)://` substring at all
    NoUrl,
    /// The first candidate is malformed
    Invalid(String),
    /// The first candidate passed validation
    Valid(Url),
}

/// Returns every URL-shaped substring of `text`, in order of appearance.
///
/// # Examples
/// ```
/// use grabcore::core::validation::extract_urls;
///
/// let urls = extract_urls("see https://youtu.be/abc and http://example.com/x");
/// assert_eq!(urls, vec!["https://youtu.be/abc", "http://example.com/x"]);
/// assert!(extract_urls("no links here").is_empty());
/// ```
pub fn extract_urls(text: &str) -> Vec<&str> {
    URL_SCAN_REGEX.find_iter(text).map(|m| m.as_str()).collect()
}

/// Validates a candidate URL and parses it.
///
/// # Security
/// - Only HTTP and HTTPS schemes
/// - Host must be a dotted domain name, `localhost` or an IPv4 address
/// - Length capped at `MAX_URL_LENGTH`
///
/// # Examples
/// ```
/// use grabcore::core::validation::validate_url;
///
/// assert!(validate_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").is_ok());
/// assert!(validate_url("http://localhost:8080/video.mp4").is_ok());
/// assert!(validate_url("https://nodot/path").is_err());
/// assert!(validate_url("ftp://example.com/file").is_err());
/// ```
pub fn validate_url(candidate: &str) -> Result<Url, ValidationError> {
    let max = config::validation::MAX_URL_LENGTH;
    if candidate.len() > max {
        return Err(ValidationError::TooLong {
            len: candidate.len(),
            max,
        });
    }

    if !URL_STRICT_REGEX.is_match(candidate) {
        return Err(ValidationError::InvalidUrl(candidate.to_string()));
    }

    let parsed = Url::parse(candidate).map_err(|_| ValidationError::InvalidUrl(candidate.to_string()))?;
    if parsed.host_str().is_none() {
        return Err(ValidationError::InvalidUrl(candidate.to_string()));
    }

    Ok(parsed)
}

/// Finds the first URL in a message and validates it.
pub fn inspect_message(text: &str) -> UrlInspection {
    let urls = extract_urls(text);
    let Some(first) = urls.first() else {
        return UrlInspection::NoUrl;
    };

    match validate_url(first) {
        Ok(url) => UrlInspection::Valid(url),
        Err(e) => {
            log::debug!("Rejected URL candidate '{}': {}", first, e);
            UrlInspection::Invalid((*first).to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== extract_urls Tests ====================

    #[test]
    fn test_extract_urls_keeps_order() {
        let text = "first http://a.example.com/1 then https://b.example.org/2?x=1";
        assert_eq!(
            extract_urls(text),
            vec!["http://a.example.com/1", "https://b.example.org/2?x=1"]
        );
    }

    #[test]
    fn test_extract_urls_stops_at_whitespace() {
        let urls = extract_urls("https://www.youtube.com/watch?v=dQw4w9WgXcQ please");
        assert_eq!(urls, vec!["https://www.youtube.com/watch?v=dQw4w9WgXcQ"]);
    }

    #[test]
    fn test_extract_urls_keeps_percent_escapes() {
        let urls = extract_urls("https://example.com/a%20b");
        assert_eq!(urls, vec!["https://example.com/a%20b"]);
    }

    #[test]
    fn test_extract_urls_without_scheme() {
        for text in ["", "hello", "www.youtube.com/watch?v=1", "ftp://example.com", "http:/broken"] {
            assert!(extract_urls(text).is_empty(), "unexpected match in {:?}", text);
        }
    }

    // ==================== validate_url Tests ====================

    #[test]
    fn test_validate_url_valid() {
        let valid_urls = vec![
            "https://youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.tiktok.com/@user/video/123",
            "http://localhost/video",
            "http://127.0.0.1:8000/file.mp4",
            "https://example.com",
            "https://example.com/",
            "https://EXAMPLE.COM/Path",
            "https://www.newgrounds.com/portal/view/123456",
        ];
        for url in valid_urls {
            assert!(validate_url(url).is_ok(), "expected valid: {}", url);
        }
    }

    #[test]
    fn test_validate_url_invalid() {
        let invalid_urls = vec![
            "https://nodot",
            "https://-bad-.com/x",
            "https://exa mple.com",
            "ftp://example.com/file",
            "https://example.c/",
            "https://",
        ];
        for url in invalid_urls {
            assert!(validate_url(url).is_err(), "expected invalid: {}", url);
        }
    }

    #[test]
    fn test_validate_url_too_long() {
        let long = format!("https://example.com/{}", "a".repeat(3000));
        assert!(matches!(validate_url(&long), Err(ValidationError::TooLong { .. })));
    }

    // ==================== inspect_message Tests ====================

    #[test]
    fn test_inspect_message_no_url() {
        assert_eq!(inspect_message("just some words"), UrlInspection::NoUrl);
    }

    #[test]
    fn test_inspect_message_uses_first_url() {
        match inspect_message("grab https://vimeo.com/1 and https://youtu.be/2") {
            UrlInspection::Valid(url) => assert_eq!(url.as_str(), "https://vimeo.com/1"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_inspect_message_invalid_first_url() {
        assert_eq!(
            inspect_message("look http://nodot/x"),
            UrlInspection::Invalid("http://nodot/x".to_string())
        );
    }
}
