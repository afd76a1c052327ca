use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::tier::TierLimits;

/// Configuration constants for the bot
/// Cached yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Custom Bot API server (e.g. a local `telegram-bot-api` instance)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| env::var("BOT_API_URL").ok().filter(|s| !s.is_empty()));

/// Download folder path
/// Read from DOWNLOAD_PATH environment variable
/// Default: ./downloads
/// Supports tilde (~) expansion for home directory
pub static DOWNLOAD_PATH: Lazy<String> =
    Lazy::new(|| env::var("DOWNLOAD_PATH").unwrap_or_else(|_| "./downloads".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: grabbot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "grabbot.log".to_string()));

/// Hard ceiling on the estimated size of a download, in MB
/// Read from MAX_FILE_SIZE_MB environment variable
/// Default: 2048 (Telegram limit for premium users)
pub static MAX_FILE_SIZE_MB: Lazy<u64> = Lazy::new(|| env_number("MAX_FILE_SIZE_MB", limits::MAX_FILE_SIZE_MB));

/// Comma-separated list of Telegram user IDs allowed to use the bot
/// Read from ALLOWED_USERS environment variable
/// Empty means open access
pub static ALLOWED_USERS: Lazy<String> = Lazy::new(|| env::var("ALLOWED_USERS").unwrap_or_default());

/// Size limits for Telegram uploads
pub mod limits {
    /// Upload limit for regular accounts (MB)
    pub const REGULAR_USER_LIMIT_MB: u64 = 50;

    /// Upload limit for Telegram Premium accounts (MB)
    pub const PREMIUM_USER_LIMIT_MB: u64 = 2048;

    /// Default pre-flight download ceiling (MB)
    pub const MAX_FILE_SIZE_MB: u64 = 2048;

    /// Caption length limit for media messages
    pub const CAPTION_MAX_CHARS: usize = 1024;

    /// Description length kept from the extracted metadata
    pub const DESCRIPTION_MAX_CHARS: usize = 200;

    /// Length of error details shown to users
    pub const ERROR_DETAILS_MAX_CHARS: usize = 200;
}

/// Validation configuration
pub mod validation {
    /// Maximum URL length accepted from a chat message
    pub const MAX_URL_LENGTH: usize = 2048;
}

/// Conversation state configuration
pub mod session {
    use super::Duration;

    /// Conversations idle for longer than this are evicted (24 hours)
    pub const IDLE_SECS: u64 = 24 * 60 * 60;

    /// Maximum number of conversations kept in memory
    pub const CAPACITY: u64 = 10_000;

    /// Idle eviction duration
    pub fn idle() -> Duration {
        Duration::from_secs(IDLE_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    /// Large uploads through the Bot API can take minutes.
    pub const REQUEST_TIMEOUT_SECS: u64 = 900; // 15 minutes

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Engine configuration
pub mod engine {
    use super::Duration;

    /// User-Agent sent with every extraction request
    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

    /// Timeout for `yt-dlp --version` at startup
    pub const VERSION_CHECK_TIMEOUT_SECS: u64 = 15;

    /// Version check timeout duration
    pub fn version_check_timeout() -> Duration {
        Duration::from_secs(VERSION_CHECK_TIMEOUT_SECS)
    }
}

fn env_number(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("Invalid {} value '{}', using default {}", key, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

/// Set of user IDs allowed to talk to the bot.
///
/// An empty list means the bot is open to everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    users: HashSet<String>,
}

impl AllowList {
    /// Parses a comma-separated list of user IDs. Blank entries are ignored.
    pub fn parse(raw: &str) -> Self {
        let users = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { users }
    }

    pub fn is_open(&self) -> bool {
        self.users.is_empty()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Returns true if the user may use the bot.
    pub fn is_allowed(&self, user_id: &str) -> bool {
        self.is_open() || self.users.contains(user_id)
    }
}

/// Runtime settings passed to the downloader, the session store and the handlers.
///
/// `Settings::from_env()` snapshots the environment statics above; tests build
/// the struct directly to override thresholds and directories.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Scratch directory for in-flight downloads
    pub download_dir: PathBuf,
    /// Pre-flight ceiling on the estimated size (MB)
    pub max_file_size_mb: u64,
    /// Regular/premium upload thresholds
    pub tiers: TierLimits,
    /// Users allowed to send links
    pub allowed_users: AllowList,
    /// yt-dlp binary
    pub ytdl_bin: String,
    /// Idle time after which a conversation is forgotten
    pub session_idle: Duration,
    /// Maximum number of remembered conversations
    pub session_capacity: u64,
}

impl Settings {
    /// Builds settings from environment variables (call after `.env` is loaded).
    pub fn from_env() -> Self {
        let download_dir = PathBuf::from(shellexpand::tilde(DOWNLOAD_PATH.as_str()).to_string());
        Self {
            download_dir,
            max_file_size_mb: *MAX_FILE_SIZE_MB,
            tiers: TierLimits::new(
                env_number("REGULAR_USER_LIMIT_MB", limits::REGULAR_USER_LIMIT_MB),
                env_number("PREMIUM_USER_LIMIT_MB", limits::PREMIUM_USER_LIMIT_MB),
            ),
            allowed_users: AllowList::parse(&ALLOWED_USERS),
            ytdl_bin: YTDL_BIN.clone(),
            session_idle: Duration::from_secs(env_number("SESSION_IDLE_SECS", session::IDLE_SECS)),
            session_capacity: env_number("SESSION_CAPACITY", session::CAPACITY),
        }
    }

    /// Overrides the scratch directory.
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Overrides the allow-list.
    pub fn with_allowed_users(mut self, raw: &str) -> Self {
        self.allowed_users = AllowList::parse(raw);
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("./downloads"),
            max_file_size_mb: limits::MAX_FILE_SIZE_MB,
            tiers: TierLimits::default(),
            allowed_users: AllowList::default(),
            ytdl_bin: "yt-dlp".to_string(),
            session_idle: session::idle(),
            session_capacity: session::CAPACITY,
        }
    }
}
