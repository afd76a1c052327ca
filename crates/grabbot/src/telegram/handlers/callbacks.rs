//! Inline button presses: quality picker and premium confirmation.

use teloxide::types::{ChatId, MessageId};

use grabcore::session::UserKey;
use grabcore::Quality;

use super::types::HandlerDeps;
use crate::telegram::delivery::deliver;
use crate::telegram::keyboards::CallbackAction;
use crate::telegram::messages;
use crate::telegram::transport::{ChatTransport, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackOutcome {
    QualitySet(Quality),
    /// Pending file uploaded after "I have Premium"
    Delivered,
    /// Upload of the pending file failed; the file was still removed
    DeliveryFailed,
    /// Pending file dropped after "No Premium"
    Discarded,
    /// Nothing was pending for this user
    Expired,
    /// Payload not recognized
    Ignored,
}

/// Shows `text` in place of the message carrying the buttons, or as a new message.
async fn reply(
    transport: &dyn ChatTransport,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    text: &str,
) -> Result<(), TransportError> {
    match message_id {
        Some(id) => transport.edit_text(chat_id, id, text, None).await,
        None => transport.send_text(chat_id, text, None).await.map(|_| ()),
    }
}

pub async fn handle_callback(
    transport: &dyn ChatTransport,
    deps: &HandlerDeps,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    user: UserKey,
    data: &str,
) -> Result<CallbackOutcome, TransportError> {
    let Some(action) = CallbackAction::parse(data) else {
        log::warn!("Unknown callback data from user {}: {:?}", user, data);
        return Ok(CallbackOutcome::Ignored);
    };
    log::info!("Callback {:?} from user {} in chat {}", action, user, chat_id);

    match action {
        CallbackAction::SetQuality(quality) => {
            deps.sessions.set_quality(user, quality).await;
            reply(transport, chat_id, message_id, &messages::quality_set(quality)).await?;
            Ok(CallbackOutcome::QualitySet(quality))
        }
        CallbackAction::PremiumYes => {
            deps.sessions.set_premium(user, true).await;
            let Some(pending) = deps.sessions.take_pending(user).await else {
                reply(transport, chat_id, message_id, messages::file_expired()).await?;
                return Ok(CallbackOutcome::Expired);
            };

            if let Some(id) = message_id {
                if let Err(e) = transport.edit_text(chat_id, id, messages::uploading(), None).await {
                    log::debug!("Failed to update premium prompt in chat {}: {}", chat_id, e);
                }
            }

            match deliver(transport, chat_id, message_id, pending.media).await {
                Ok(_) => Ok(CallbackOutcome::Delivered),
                Err(e) => {
                    transport.send_text(chat_id, &messages::upload_failed(&e), None).await?;
                    Ok(CallbackOutcome::DeliveryFailed)
                }
            }
        }
        CallbackAction::PremiumNo => {
            let Some(mut pending) = deps.sessions.take_pending(user).await else {
                reply(transport, chat_id, message_id, messages::file_expired()).await?;
                return Ok(CallbackOutcome::Expired);
            };

            pending.media.file.remove();
            let text = messages::premium_required(pending.size_mb, deps.settings.tiers.regular_mb);
            reply(transport, chat_id, message_id, &text).await?;
            Ok(CallbackOutcome::Discarded)
        }
    }
}
