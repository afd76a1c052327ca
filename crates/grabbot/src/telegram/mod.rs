//! Telegram side of the bot: transport, texts, keyboards, delivery, handlers

pub mod bot;
pub mod delivery;
pub mod handlers;
pub mod keyboards;
pub mod messages;
pub mod transport;

pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};
pub use transport::{ChatTransport, MediaUpload, TelegramTransport, TransportError};
