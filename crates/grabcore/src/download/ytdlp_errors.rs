/// yt-dlp error analysis
///
/// Classifies yt-dlp stderr into a small set of failure kinds and
/// produces the hint shown to the user next to the engine's own message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineFailure {
    /// Private, deleted or otherwise missing content
    Unavailable,
    /// Geo-blocked, age-gated or login-only content
    Restricted,
    /// No extractor for this site or URL
    Unsupported,
    /// Timeouts, DNS, connection resets
    Network,
    Unknown,
}

impl EngineFailure {
    pub fn as_str(self) -> &'static str {
        match self {
            EngineFailure::Unavailable => "unavailable",
            EngineFailure::Restricted => "restricted",
            EngineFailure::Unsupported => "unsupported",
            EngineFailure::Network => "network",
            EngineFailure::Unknown => "unknown",
        }
    }

    /// Short explanation for the user
    pub fn hint(self) -> &'static str {
        match self {
            EngineFailure::Unavailable => "The video is unavailable. It may be private or deleted.",
            EngineFailure::Restricted => "The content is restricted (region, age or login required).",
            EngineFailure::Unsupported => "This site or link is not supported.",
            EngineFailure::Network => "Network problem while contacting the site. Try again in a minute.",
            EngineFailure::Unknown => "Could not download the media. Check that the link is correct.",
        }
    }
}

/// Analyzes yt-dlp stderr and returns the failure kind
pub fn analyze_ytdlp_error(stderr: &str) -> EngineFailure {
    let stderr_lower = stderr.to_lowercase();

    if stderr_lower.contains("unsupported url") || stderr_lower.contains("no suitable extractor") {
        return EngineFailure::Unsupported;
    }

    if stderr_lower.contains("available in your country")
        || stderr_lower.contains("geo restriction")
        || stderr_lower.contains("geo-restricted")
        || stderr_lower.contains("confirm your age")
        || stderr_lower.contains("age-restricted")
        || stderr_lower.contains("sign in to confirm")
        || stderr_lower.contains("login required")
        || stderr_lower.contains("http error 403")
    {
        return EngineFailure::Restricted;
    }

    if stderr_lower.contains("private video")
        || stderr_lower.contains("video unavailable")
        || stderr_lower.contains("this video is not available")
        || stderr_lower.contains("video is private")
        || stderr_lower.contains("has been removed")
        || stderr_lower.contains("does not exist")
        || stderr_lower.contains("http error 404")
    {
        return EngineFailure::Unavailable;
    }

    if stderr_lower.contains("timed out")
        || stderr_lower.contains("timeout")
        || stderr_lower.contains("connection")
        || stderr_lower.contains("network is unreachable")
        || stderr_lower.contains("name or service not known")
        || stderr_lower.contains("temporary failure in name resolution")
        || stderr_lower.contains("failed to connect")
    {
        return EngineFailure::Network;
    }

    EngineFailure::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable() {
        assert_eq!(
            analyze_ytdlp_error("ERROR: [youtube] abc: Private video. Sign in if you've been granted access"),
            EngineFailure::Unavailable
        );
        assert_eq!(
            analyze_ytdlp_error("ERROR: [youtube] abc: Video unavailable"),
            EngineFailure::Unavailable
        );
    }

    #[test]
    fn test_restricted() {
        assert_eq!(
            analyze_ytdlp_error("ERROR: The uploader has not made this video available in your country"),
            EngineFailure::Restricted
        );
        assert_eq!(
            analyze_ytdlp_error("ERROR: [youtube] abc: This video is not available in your country"),
            EngineFailure::Restricted
        );
        assert_eq!(
            analyze_ytdlp_error("ERROR: Sign in to confirm your age. This video may be inappropriate"),
            EngineFailure::Restricted
        );
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(
            analyze_ytdlp_error("ERROR: Unsupported URL: https://example.com/page"),
            EngineFailure::Unsupported
        );
    }

    #[test]
    fn test_network() {
        assert_eq!(
            analyze_ytdlp_error("ERROR: Unable to download webpage: <urlopen error [Errno -3] Temporary failure in name resolution>"),
            EngineFailure::Network
        );
        assert_eq!(analyze_ytdlp_error("ERROR: Read timed out."), EngineFailure::Network);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(analyze_ytdlp_error("something strange"), EngineFailure::Unknown);
        assert_eq!(analyze_ytdlp_error(""), EngineFailure::Unknown);
    }

    #[test]
    fn test_hints_are_distinct() {
        let kinds = [
            EngineFailure::Unavailable,
            EngineFailure::Restricted,
            EngineFailure::Unsupported,
            EngineFailure::Network,
            EngineFailure::Unknown,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.hint(), b.hint());
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }
}
