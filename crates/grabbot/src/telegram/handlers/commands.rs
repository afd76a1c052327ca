//! Command handlers: /start, /help, /quality, /audio, /video

use teloxide::types::ChatId;

use grabcore::session::UserKey;
use grabcore::MediaKind;

use super::types::HandlerDeps;
use crate::telegram::bot::Command;
use crate::telegram::keyboards::quality_keyboard;
use crate::telegram::messages;
use crate::telegram::transport::{ChatTransport, TransportError};

pub async fn handle_command(
    transport: &dyn ChatTransport,
    deps: &HandlerDeps,
    chat_id: ChatId,
    user: UserKey,
    command: Command,
) -> Result<(), TransportError> {
    log::info!("Received command {:?} from user {} in chat {}", command, user, chat_id);

    match command {
        Command::Start => {
            let text = messages::welcome(deps.settings.max_file_size_mb);
            transport.send_text(chat_id, &text, None).await?;
        }
        Command::Help => {
            let text = messages::help(deps.settings.max_file_size_mb, &deps.settings.tiers);
            transport.send_text(chat_id, &text, None).await?;
        }
        Command::Quality => {
            transport
                .send_text(chat_id, messages::quality_picker(), Some(quality_keyboard()))
                .await?;
        }
        Command::Audio => {
            deps.sessions.set_media_kind(user, MediaKind::Audio).await;
            transport.send_text(chat_id, messages::audio_mode(), None).await?;
        }
        Command::Video => {
            deps.sessions.set_media_kind(user, MediaKind::Video).await;
            let quality = deps.sessions.prefs(user).await.quality;
            transport.send_text(chat_id, &messages::video_mode(quality), None).await?;
        }
    }

    Ok(())
}
