//! grabbot - Telegram bot that downloads media via yt-dlp
//!
//! The download engine, tier policy and conversation state live in
//! `grabcore`; this crate owns everything that talks to Telegram.

pub mod cli;
pub mod telegram;
