//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use grabcore::session::UserKey;

use super::callbacks::handle_callback;
use super::commands::handle_command;
use super::links::handle_link_message;
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::messages;
use crate::telegram::transport::{ChatTransport, TelegramTransport, TransportError};

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Commands are matched first, then plain text messages (links), then
/// button presses.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        .branch(command_handler(deps.clone()))
        .branch(message_handler(deps.clone()))
        .branch(callback_handler(deps))
}

/// The sender's user id; `None` for channel posts and anonymous admins.
fn sender_id(msg: &Message) -> Option<UserKey> {
    msg.from.as_ref().map(|u| u.id.0)
}

/// Tells the user something went wrong; used when a flow returns an error.
async fn apologize(transport: &dyn ChatTransport, chat_id: ChatId) {
    if let Err(e) = transport.send_text(chat_id, messages::generic_error(), None).await {
        log::error!("Failed to send error message to chat {}: {}", chat_id, e);
    }
}

/// Logs how a flow ended and apologizes in the chat when it failed.
async fn settle<T: std::fmt::Debug>(
    transport: &dyn ChatTransport,
    chat_id: ChatId,
    flow: &str,
    result: Result<T, TransportError>,
) {
    match result {
        Ok(outcome) => log::info!("{} in chat {} finished: {:?}", flow, chat_id, outcome),
        Err(e) => {
            log::error!("{} failed in chat {}: {}", flow, chat_id, e);
            apologize(transport, chat_id).await;
        }
    }
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                let Some(user) = sender_id(&msg) else {
                    log::debug!("Ignoring command without sender in chat {}", msg.chat.id);
                    return Ok(());
                };
                let transport = TelegramTransport::new(bot);
                let result = handle_command(&transport, &deps, msg.chat.id, user, cmd).await;
                settle(&transport, msg.chat.id, "Command", result).await;
                Ok(())
            }
        },
    ))
}

fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some_and(|text| !text.starts_with('/')))
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let Some(user) = sender_id(&msg) else {
                    log::debug!("Ignoring message without sender in chat {}", msg.chat.id);
                    return Ok(());
                };
                let transport = TelegramTransport::new(bot);
                let text = msg.text().unwrap_or_default();
                let result = handle_link_message(&transport, &deps, msg.chat.id, user, text).await;
                settle(&transport, msg.chat.id, "Link message", result).await;
                Ok(())
            }
        })
}

fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
                log::debug!("Failed to answer callback query: {}", e);
            }

            let chat_id = q.message.as_ref().map(|m| m.chat().id).unwrap_or_else(|| ChatId::from(q.from.id));
            let message_id = q.message.as_ref().map(|m| m.id());
            let data = q.data.as_deref().unwrap_or_default();
            let transport = TelegramTransport::new(bot);

            let result = handle_callback(&transport, &deps, chat_id, message_id, q.from.id.0, data).await;
            settle(&transport, chat_id, "Callback", result).await;
            Ok(())
        }
    })
}
