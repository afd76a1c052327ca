//! grabcore - download engine and conversation state for the grabbot Telegram bot
//!
//! Nothing in this crate talks to Telegram. It turns a chat message into a
//! validated URL, drives yt-dlp to fetch the media, decides which Telegram
//! size tier the result falls into and remembers per-user preferences.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, URL validation, process helpers
//! - `download`: engine abstraction, yt-dlp backend, orchestrator, temp files
//! - `tier`: regular/premium size policy
//! - `session`: per-user preferences and pending large files

pub mod core;
pub mod download;
pub mod session;
pub mod tier;

// Re-export commonly used types for convenience
pub use crate::core::config::Settings;
pub use crate::core::error::{AppError, AppResult};
pub use download::{DownloadError, DownloadRequest, DownloadedMedia, Downloader, MediaKind, Quality, TempMedia};
pub use session::{ConversationPrefs, PendingLargeFile, SessionStore};
pub use tier::{TierDecision, TierLimits};
