/// Bytes in one mebibyte, the unit Telegram limits are expressed in.
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Converts a byte count to MB.
///
/// # Example
///
/// ```
/// use grabcore::core::utils::bytes_to_mb;
///
/// assert_eq!(bytes_to_mb(50 * 1024 * 1024), 50.0);
/// ```
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Truncates a string to at most `max_chars` characters.
///
/// Counts characters, not bytes, so multi-byte titles never split mid-character.
///
/// # Example
///
/// ```
/// use grabcore::core::utils::truncate_chars;
///
/// assert_eq!(truncate_chars("héllo", 2), "hé");
/// assert_eq!(truncate_chars("short", 10), "short");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Formats a duration in seconds as `m:ss` (minutes are not wrapped into hours).
///
/// # Example
///
/// ```
/// use grabcore::core::utils::format_duration;
///
/// assert_eq!(format_duration(0), "0:00");
/// assert_eq!(format_duration(125), "2:05");
/// assert_eq!(format_duration(3725), "62:05");
/// ```
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Formats a size in MB with one decimal, e.g. `120.5MB`.
pub fn format_size_mb(size_mb: f64) -> String {
    format!("{:.1}MB", size_mb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_multibyte() {
        let title = "Привет мир";
        assert_eq!(truncate_chars(title, 6), "Привет");
        assert_eq!(truncate_chars(title, 0), "");
        assert_eq!(truncate_chars("🎬🎬🎬", 2), "🎬🎬");
    }

    #[test]
    fn test_format_size_mb() {
        assert_eq!(format_size_mb(120.0), "120.0MB");
        assert_eq!(format_size_mb(bytes_to_mb(1_572_864)), "1.5MB");
    }

    #[test]
    fn test_format_duration_seconds_padding() {
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(60), "1:00");
    }
}
