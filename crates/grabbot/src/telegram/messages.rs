//! User-facing texts (HTML parse mode).

use indoc::{formatdoc, indoc};
use teloxide::utils::html;

use grabcore::core::config;
use grabcore::core::utils::{format_size_mb, truncate_chars};
use grabcore::download::DownloadError;
use grabcore::{MediaKind, Quality, TierLimits};

pub fn welcome(max_file_size_mb: u64) -> String {
    formatdoc! {"
        🎬 <b>Welcome to the Media Downloader Bot!</b>

        Send me a link from YouTube, TikTok, Instagram, Twitter/X, Reddit, Vimeo and 1500+ other sites and I will send the media back.

        <b>Commands:</b>
        /start - Show this message
        /help - How to use the bot
        /quality - Choose video quality
        /audio - Download audio only
        /video - Download video (default)

        📦 Max file size: {max_file_size_mb}MB
        💡 <i>Tip:</i> works in private chats and groups!",
        max_file_size_mb = max_file_size_mb,
    }
}

pub fn help(max_file_size_mb: u64, tiers: &TierLimits) -> String {
    formatdoc! {"
        📖 <b>Help &amp; Instructions</b>

        1️⃣ Send me any video URL
        2️⃣ Choose quality (optional): /quality
        3️⃣ Wait for the download to complete
        4️⃣ Receive your media file!

        ⚠️ <b>Limitations:</b>
        • Max file size: {max_file_size_mb}MB
        • Files over {regular}MB need Telegram Premium (up to {premium}MB)
        • Age-restricted or private content may fail

        ❓ Having issues? Make sure:
        • The URL is valid and publicly accessible
        • The video is not private or deleted
        • The file size is within limits",
        max_file_size_mb = max_file_size_mb,
        regular = tiers.regular_mb,
        premium = tiers.premium_mb,
    }
}

pub fn quality_picker() -> &'static str {
    "⚙️ <b>Select Video Quality:</b>"
}

pub fn quality_set(quality: Quality) -> String {
    format!("✅ Quality set to: <b>{}</b>\n\nNow send me a video link!", quality)
}

pub fn audio_mode() -> &'static str {
    "🎵 Audio mode enabled! Send me a link to extract audio (MP3 320kbps)"
}

pub fn video_mode(quality: Quality) -> String {
    format!("🎬 Video mode enabled! Current quality: {}", quality)
}

pub fn unauthorized() -> &'static str {
    "⛔ You are not authorized to use this bot."
}

pub fn no_url() -> &'static str {
    indoc! {"
        ❌ No valid URL found.

        Please send a valid link from YouTube, TikTok, Instagram, Newgrounds, etc.
        Use /help for more information."
    }
}

pub fn invalid_url() -> &'static str {
    "❌ Invalid URL format!"
}

pub fn processing(media_kind: MediaKind, url: &str, quality: Quality) -> String {
    format!(
        "⏳ Processing your {}...\n🔗 URL: {}\n⚙️ Quality: {}",
        media_kind,
        html::escape(&truncate_chars(url, 50)),
        quality
    )
}

pub fn download_complete() -> &'static str {
    "✅ Download complete!\n📤 Uploading to Telegram..."
}

/// Pre-flight rejection: the estimate is above the configured ceiling.
pub fn estimate_too_large(size_mb: f64, limit_mb: u64) -> String {
    formatdoc! {"
        ❌ <b>File Too Large</b>

        📦 Estimated size: {size}
        ⚠️ Maximum limit: {limit_mb}MB

        💡 <b>Solutions:</b>
        • Select lower quality: /quality
        • Try audio-only mode: /audio",
        size = format_size_mb(size_mb),
        limit_mb = limit_mb,
    }
}

/// Post-download rejection: above the premium tier.
pub fn file_too_large(size_mb: f64, premium_mb: u64) -> String {
    formatdoc! {"
        ❌ <b>File Too Large</b>

        📦 File size: {size}
        ⚠️ Maximum limit: {premium_mb}MB (Telegram Premium)

        💡 <b>Solutions:</b>
        • Select lower quality: /quality
        • Try audio-only mode: /audio
        • Download 720p or 480p instead",
        size = format_size_mb(size_mb),
        premium_mb = premium_mb,
    }
}

pub fn download_failed(err: &DownloadError) -> String {
    let details = html::escape(&truncate_chars(&err.to_string(), config::limits::ERROR_DETAILS_MAX_CHARS));
    let hint = match err {
        DownloadError::Engine { kind, .. } => kind.hint(),
        _ => "Try a different quality or check if the video is accessible.",
    };
    format!("❌ <b>Download Failed</b>\n\nError: {}\n\n{}", details, hint)
}

pub fn large_file_prompt(size_mb: f64, tiers: &TierLimits) -> String {
    formatdoc! {"
        ⚠️ <b>Large File Detected</b>

        📦 File size: {size}
        🔓 Regular limit: {regular}MB
        ⭐ Premium limit: {premium}MB

        This file requires <b>Telegram Premium</b> to receive.

        Do you have Telegram Premium?",
        size = format_size_mb(size_mb),
        regular = tiers.regular_mb,
        premium = tiers.premium_mb,
    }
}

pub fn premium_required(size_mb: f64, regular_mb: u64) -> String {
    formatdoc! {"
        ℹ️ <b>Telegram Premium Required</b>

        📦 File size: {size}
        🔓 Regular limit: {regular_mb}MB

        💡 <b>Options:</b>
        1️⃣ Upgrade to Telegram Premium
        2️⃣ Select lower quality: /quality
        3️⃣ Try audio-only: /audio",
        size = format_size_mb(size_mb),
        regular_mb = regular_mb,
    }
}

pub fn uploading() -> &'static str {
    "✅ Uploading your file..."
}

pub fn file_expired() -> &'static str {
    "❌ File expired. Please try downloading again."
}

pub fn upload_failed(err: &dyn std::fmt::Display) -> String {
    format!(
        "❌ Upload failed: {}",
        html::escape(&truncate_chars(&err.to_string(), config::limits::ERROR_DETAILS_MAX_CHARS))
    )
}

pub fn generic_error() -> &'static str {
    "❌ An error occurred. Please try again later."
}
