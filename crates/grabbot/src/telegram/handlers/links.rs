//! Link messages: validation, download, tier routing, delivery.

use teloxide::types::{ChatAction, ChatId, MessageId};

use grabcore::core::validation::{inspect_message, UrlInspection};
use grabcore::download::DownloadError;
use grabcore::session::UserKey;
use grabcore::{DownloadRequest, DownloadedMedia, MediaKind, PendingLargeFile, TierDecision};

use super::types::HandlerDeps;
use crate::telegram::delivery::deliver;
use crate::telegram::keyboards::premium_keyboard;
use crate::telegram::messages;
use crate::telegram::transport::{ChatTransport, TransportError};

/// Where a link message ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Sender is not on the allow-list
    Unauthorized,
    NoUrl,
    InvalidUrl,
    /// Refused before download (estimate) or after it (above premium tier)
    RejectedBySize,
    /// The engine reported a failure
    DownloadFailed,
    Delivered,
    /// The upload itself failed; the file was still removed
    DeliveryFailed,
    /// File parked until the user answers the premium question
    AwaitingPremium,
}

/// Edits the status message, logging instead of failing.
async fn update_status(transport: &dyn ChatTransport, chat_id: ChatId, status: MessageId, text: &str) {
    if let Err(e) = transport.edit_text(chat_id, status, text, None).await {
        log::debug!("Failed to update status message in chat {}: {}", chat_id, e);
    }
}

/// Handles a text message that should contain a link.
pub async fn handle_link_message(
    transport: &dyn ChatTransport,
    deps: &HandlerDeps,
    chat_id: ChatId,
    user: UserKey,
    text: &str,
) -> Result<LinkOutcome, TransportError> {
    if !deps.settings.allowed_users.is_allowed(&user.to_string()) {
        log::warn!("Unauthorized user {} in chat {}", user, chat_id);
        transport.send_text(chat_id, messages::unauthorized(), None).await?;
        return Ok(LinkOutcome::Unauthorized);
    }

    let url = match inspect_message(text) {
        UrlInspection::Valid(url) => url,
        UrlInspection::NoUrl => {
            transport.send_text(chat_id, messages::no_url(), None).await?;
            return Ok(LinkOutcome::NoUrl);
        }
        UrlInspection::Invalid(candidate) => {
            log::info!("User {} sent invalid URL {}", user, candidate);
            transport.send_text(chat_id, messages::invalid_url(), None).await?;
            return Ok(LinkOutcome::InvalidUrl);
        }
    };

    // Preferences are fixed for this request; later /audio or /video only affect new links.
    let prefs = deps.sessions.prefs(user).await;
    let request = DownloadRequest::new(url, prefs.quality, prefs.media_kind);

    let status = transport
        .send_text(
            chat_id,
            &messages::processing(request.media_kind, request.url.as_str(), request.quality),
            None,
        )
        .await?;

    let action = match request.media_kind {
        MediaKind::Audio => ChatAction::UploadVoice,
        MediaKind::Video => ChatAction::UploadVideo,
    };
    if let Err(e) = transport.send_action(chat_id, action).await {
        log::debug!("Chat action failed for chat {}: {}", chat_id, e);
    }

    let media = match deps.downloader.fetch(&request).await {
        Ok(media) => media,
        Err(DownloadError::TooLarge { size_mb, limit_mb }) => {
            update_status(transport, chat_id, status, &messages::estimate_too_large(size_mb, limit_mb)).await;
            return Ok(LinkOutcome::RejectedBySize);
        }
        Err(e) => {
            log::warn!("Download failed for user {} ({}): {}", user, e.subcategory(), e);
            update_status(transport, chat_id, status, &messages::download_failed(&e)).await;
            return Ok(LinkOutcome::DownloadFailed);
        }
    };

    update_status(transport, chat_id, status, messages::download_complete()).await;
    route_downloaded(transport, deps, chat_id, user, status, prefs.has_premium, media).await
}

async fn route_downloaded(
    transport: &dyn ChatTransport,
    deps: &HandlerDeps,
    chat_id: ChatId,
    user: UserKey,
    status: MessageId,
    has_premium: bool,
    media: DownloadedMedia,
) -> Result<LinkOutcome, TransportError> {
    let tiers = &deps.settings.tiers;
    let size_mb = media.file_size_mb;

    match tiers.route(size_mb, has_premium) {
        TierDecision::Reject => {
            log::info!("User {}: {:.1}MB is above the premium limit", user, size_mb);
            update_status(transport, chat_id, status, &messages::file_too_large(size_mb, tiers.premium_mb)).await;
            drop(media);
            Ok(LinkOutcome::RejectedBySize)
        }
        TierDecision::AskPremium => {
            transport
                .edit_text(
                    chat_id,
                    status,
                    &messages::large_file_prompt(size_mb, tiers),
                    Some(premium_keyboard()),
                )
                .await?;
            if deps.sessions.put_pending(user, PendingLargeFile::new(media)).await {
                log::info!("User {}: previous pending file replaced", user);
            }
            Ok(LinkOutcome::AwaitingPremium)
        }
        TierDecision::Deliver => match deliver(transport, chat_id, Some(status), media).await {
            Ok(_) => Ok(LinkOutcome::Delivered),
            Err(e) => {
                update_status(transport, chat_id, status, &messages::upload_failed(&e)).await;
                Ok(LinkOutcome::DeliveryFailed)
            }
        },
    }
}
