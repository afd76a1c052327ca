//! Outbound side of the chat platform.
//!
//! Handlers talk to Telegram only through `ChatTransport`, so the download
//! flows can be exercised in tests against a recording implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, InlineKeyboardMarkup, InputFile, MessageId, ParseMode};
use thiserror::Error;

use grabcore::MediaKind;

/// Transport-level send failure.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Request(#[from] teloxide::RequestError),

    /// Refused by the platform for a reason that is not a request error
    #[error("{0}")]
    Rejected(String),
}

impl TransportError {
    /// True for "message to delete not found" style failures.
    pub fn is_message_gone(&self) -> bool {
        let text = self.to_string().to_lowercase();
        text.contains("message to delete not found") || text.contains("message can't be deleted")
    }
}

/// A file upload with its caption and audio tags.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaUpload {
    pub kind: MediaKind,
    pub path: PathBuf,
    /// HTML caption
    pub caption: String,
    pub title: String,
    pub performer: String,
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends an HTML message, optionally with an inline keyboard.
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, TransportError>;

    /// Replaces the text (and keyboard) of an existing message.
    async fn edit_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError>;

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), TransportError>;

    /// Shows a presence indicator such as "uploading video".
    async fn send_action(&self, chat_id: ChatId, action: ChatAction) -> Result<(), TransportError>;

    /// Uploads a file as audio or video.
    async fn send_media(&self, chat_id: ChatId, upload: MediaUpload) -> Result<MessageId, TransportError>;
}

/// `ChatTransport` over the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<MessageId, TransportError> {
        let mut request = self.bot.send_message(chat_id, text).parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }
        Ok(request.await?.id)
    }

    async fn edit_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), TransportError> {
        let mut request = self
            .bot
            .edit_message_text(chat_id, message_id, text)
            .parse_mode(ParseMode::Html);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(keyboard);
        }
        request.await?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), TransportError> {
        self.bot.delete_message(chat_id, message_id).await?;
        Ok(())
    }

    async fn send_action(&self, chat_id: ChatId, action: ChatAction) -> Result<(), TransportError> {
        self.bot.send_chat_action(chat_id, action).await?;
        Ok(())
    }

    async fn send_media(&self, chat_id: ChatId, upload: MediaUpload) -> Result<MessageId, TransportError> {
        let file = InputFile::file(upload.path);
        let sent = match upload.kind {
            MediaKind::Audio => {
                self.bot
                    .send_audio(chat_id, file)
                    .caption(upload.caption)
                    .parse_mode(ParseMode::Html)
                    .title(upload.title)
                    .performer(upload.performer)
                    .await?
            }
            MediaKind::Video => {
                self.bot
                    .send_video(chat_id, file)
                    .caption(upload.caption)
                    .parse_mode(ParseMode::Html)
                    .supports_streaming(true)
                    .await?
            }
        };
        Ok(sent.id)
    }
}
