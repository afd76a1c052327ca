//! Sending downloaded media back to the chat.

use teloxide::types::{ChatId, MessageId};
use teloxide::utils::html;

use grabcore::core::config;
use grabcore::core::utils::{format_duration, format_size_mb};
use grabcore::download::MediaMetadata;
use grabcore::DownloadedMedia;

use super::transport::{ChatTransport, MediaUpload, TransportError};

/// Escapes `text` for HTML, stopping before the escaped form would exceed
/// `budget` chars. Entities are never split.
fn escape_within(text: &str, budget: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    let mut buf = [0u8; 4];
    for c in text.chars() {
        let piece = html::escape(c.encode_utf8(&mut buf));
        let len = piece.chars().count();
        if used + len > budget {
            break;
        }
        used += len;
        out.push_str(&piece);
    }
    out
}

/// Renders the media caption within Telegram's caption limit.
///
/// Title and uploader are shortened before markup is added, so the
/// result is always well-formed HTML.
///
/// ```
/// use grabbot::telegram::delivery::build_caption;
/// use grabcore::download::MediaMetadata;
///
/// let meta = MediaMetadata {
///     title: "Clip".into(),
///     uploader: "Channel".into(),
///     duration_secs: 125,
///     thumbnail: None,
///     description: String::new(),
///     estimated_size_mb: 0.0,
/// };
/// let caption = build_caption(&meta, 12.34);
/// assert_eq!(caption, "🎬 <b>Clip</b>\n👤 Channel\n⏱️ Duration: 2:05\n💾 Size: 12.3MB");
/// ```
pub fn build_caption(metadata: &MediaMetadata, size_mb: f64) -> String {
    let render = |title: &str, uploader: &str| {
        format!(
            "🎬 {}\n👤 {}\n⏱️ Duration: {}\n💾 Size: {}",
            html::bold(title),
            uploader,
            format_duration(metadata.duration_secs),
            format_size_mb(size_mb)
        )
    };

    let fixed = render("", "").chars().count();
    let room = config::limits::CAPTION_MAX_CHARS.saturating_sub(fixed);
    let uploader = escape_within(&metadata.uploader, room / 4);
    let title = escape_within(&metadata.title, room - uploader.chars().count());
    render(&title, &uploader)
}

/// Uploads the media, then removes the status message and the local file.
///
/// The status message is only deleted after a successful upload; its
/// deletion may fail without affecting the result. The local file is removed
/// on every path.
pub async fn deliver(
    transport: &dyn ChatTransport,
    chat_id: ChatId,
    status: Option<MessageId>,
    mut media: DownloadedMedia,
) -> Result<MessageId, TransportError> {
    let upload = MediaUpload {
        kind: media.media_kind,
        path: media.file.path().to_path_buf(),
        caption: build_caption(&media.metadata, media.file_size_mb),
        title: media.metadata.title.clone(),
        performer: media.metadata.uploader.clone(),
    };

    log::info!(
        "Uploading {} '{}' ({:.1}MB) to chat {}",
        media.media_kind,
        media.metadata.title,
        media.file_size_mb,
        chat_id
    );
    let result = transport.send_media(chat_id, upload).await;

    match (&result, status) {
        (Ok(_), Some(status)) => {
            match transport.delete_message(chat_id, status).await {
                Ok(()) => {}
                Err(e) if e.is_message_gone() => log::debug!("Status message {} already gone", status.0),
                Err(e) => log::warn!("Status message {} not deleted: {}", status.0, e),
            }
        }
        (Ok(_), None) => {}
        (Err(e), _) => log::error!("Upload to chat {} failed: {}", chat_id, e),
    }

    media.file.remove();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(title: &str) -> MediaMetadata {
        MediaMetadata {
            title: title.to_string(),
            uploader: "Uploader & Co".to_string(),
            duration_secs: 59,
            thumbnail: None,
            description: String::new(),
            estimated_size_mb: 0.0,
        }
    }

    #[test]
    fn test_caption_escapes_html() {
        let caption = build_caption(&metadata("<Live>"), 1.0);
        assert!(caption.starts_with("🎬 <b>&lt;Live&gt;</b>"));
        assert!(caption.contains("Uploader &amp; Co"));
        assert!(caption.contains("Duration: 0:59"));
        assert!(caption.contains("Size: 1.0MB"));
    }

    #[test]
    fn test_long_title_keeps_markup_balanced() {
        let caption = build_caption(&metadata(&"a".repeat(1100)), 1.0);
        assert!(caption.chars().count() <= 1024);
        assert_eq!(caption.matches("<b>").count(), 1);
        assert_eq!(caption.matches("</b>").count(), 1);
        assert!(caption.ends_with("💾 Size: 1.0MB"));
    }

    #[test]
    fn test_truncation_never_splits_entities() {
        for title in [format!("{}&", "a".repeat(1016)), "&<>".repeat(400)] {
            let caption = build_caption(&metadata(&title), 1.0);
            assert!(caption.chars().count() <= 1024);
            let entities = caption.matches("&amp;").count() + caption.matches("&lt;").count() + caption.matches("&gt;").count();
            assert_eq!(caption.matches('&').count(), entities);
            assert!(caption.contains("</b>\n👤 Uploader &amp; Co"));
        }
    }

    #[test]
    fn test_long_uploader_is_shortened_too() {
        let mut meta = metadata("Clip");
        meta.uploader = "u".repeat(2000);
        let caption = build_caption(&meta, 1.0);
        assert!(caption.chars().count() <= 1024);
        assert!(caption.starts_with("🎬 <b>Clip</b>\n👤 uuu"));
        assert!(caption.ends_with("💾 Size: 1.0MB"));
    }
}
