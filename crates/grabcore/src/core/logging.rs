//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - A startup summary of the effective configuration

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config::Settings;

/// Parses a level name ("debug", "info", ...) falling back to `Info`.
fn parse_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|s| s.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Initialize logger for both console and file output
///
/// The level is read from `LOG_LEVEL` (default `info`). HTTP client internals
/// are filtered out so long-polling does not flood the log.
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to initialize logger
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;
    let level = parse_level(std::env::var("LOG_LEVEL").ok().as_deref());

    let config = ConfigBuilder::new()
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .build();

    CombinedLogger::init(vec![
        TermLogger::new(level, config.clone(), TerminalMode::Mixed, ColorChoice::Auto),
        WriteLogger::new(level, config, log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at application startup
pub fn log_startup_configuration(settings: &Settings) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("⚙️  Configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Download directory: {}", settings.download_dir.display());
    log::info!("yt-dlp binary: {}", settings.ytdl_bin);
    log::info!("Max estimated size: {} MB", settings.max_file_size_mb);
    log::info!(
        "Upload tiers: regular {} MB, premium {} MB",
        settings.tiers.regular_mb,
        settings.tiers.premium_mb
    );
    if settings.allowed_users.is_open() {
        log::info!("Access: open (ALLOWED_USERS not set)");
    } else {
        log::info!("Access: restricted to {} user(s)", settings.allowed_users.len());
    }
    log::info!(
        "Sessions: up to {} conversations, idle eviction after {}s",
        settings.session_capacity,
        settings.session_idle.as_secs()
    );
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
