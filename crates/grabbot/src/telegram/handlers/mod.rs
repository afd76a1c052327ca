//! Telegram bot handler tree configuration
//!
//! The dispatcher schema is a thin layer over transport-agnostic flow
//! functions, so integration tests drive the same flows as production.

mod callbacks;
mod commands;
mod links;
mod schema;
mod types;

pub use callbacks::{handle_callback, CallbackOutcome};
pub use commands::handle_command;
pub use links::{handle_link_message, LinkOutcome};
pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
