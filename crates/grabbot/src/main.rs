use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

use grabbot::cli::{Cli, Commands};
use grabbot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
use grabcore::core::validation::validate_url;
use grabcore::core::{config, init_logger, log_startup_configuration};
use grabcore::download::YtDlpEngine;
use grabcore::{AppResult, DownloadRequest, Downloader, MediaKind, Quality, SessionStore, Settings};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    let cli = Cli::parse_args();

    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    init_logger(&config::LOG_FILE_PATH)?;

    let settings = Settings::from_env();

    match cli.command {
        Some(Commands::Run) => run_bot(settings).await,
        Some(Commands::Download {
            url,
            quality,
            audio,
            output,
        }) => report(run_cli_download(settings, url, quality, audio, output).await),
        Some(Commands::Info { url, json }) => report(run_cli_info(settings, url, json).await),
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot(settings).await
        }
    }
}

/// Logs a CLI failure with its category before handing it to anyhow.
fn report(result: AppResult<()>) -> Result<()> {
    result.map_err(|e| {
        log::error!("CLI command failed ({}): {}", e.category(), e);
        e.into()
    })
}

/// Warns when the extraction engine cannot be started.
async fn check_engine(engine: &YtDlpEngine) {
    match engine.version().await {
        Ok(version) => log::info!("yt-dlp version: {}", version),
        Err(e) => log::warn!("yt-dlp is not available ({}): downloads will fail until it is installed", e),
    }
}

async fn run_bot(settings: Settings) -> Result<()> {
    log::info!("Starting grabbot...");

    fs_err::tokio::create_dir_all(&settings.download_dir).await?;
    log_startup_configuration(&settings);

    let engine = YtDlpEngine::new(settings.ytdl_bin.clone());
    check_engine(&engine).await;
    let downloader = Downloader::new(Arc::new(engine), &settings);
    log::info!("Download engine: {}", downloader.engine_name());

    let bot = create_bot()?;
    match setup_bot_commands(&bot).await {
        Ok(()) => log::info!("Bot commands registered"),
        Err(e) => log::warn!("Failed to register bot commands: {}", e),
    }

    let settings = Arc::new(settings);
    let deps = HandlerDeps::new(
        downloader,
        SessionStore::new(&settings),
        Arc::clone(&settings),
    );

    log::info!("Starting bot in long polling mode");
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}

/// One-off download through the same orchestrator the bot uses.
async fn run_cli_download(
    settings: Settings,
    url: String,
    quality: Quality,
    audio: bool,
    output: Option<String>,
) -> AppResult<()> {
    let output_dir = PathBuf::from(output.unwrap_or_else(|| ".".to_string()));
    fs_err::tokio::create_dir_all(&output_dir).await?;
    let settings = settings.with_download_dir(output_dir);

    let media_kind = if audio { MediaKind::Audio } else { MediaKind::Video };
    let request = DownloadRequest::new(validate_url(&url)?, quality, media_kind);

    println!("🎬 grabbot CLI Download");
    println!("========================");
    println!("URL: {}", request.url);
    println!("Mode: {}", media_kind);
    if media_kind == MediaKind::Video {
        println!("Video quality: {}", quality);
    }

    let downloader = Downloader::new(Arc::new(YtDlpEngine::new(settings.ytdl_bin.clone())), &settings);
    let media = downloader.fetch(&request).await?;

    println!("Title: {}", media.metadata.title);
    println!("Size: {:.1}MB", media.file_size_mb);
    let path = media.file.keep();
    println!("✅ Saved to {}", path.display());
    Ok(())
}

/// Probe only: prints metadata and the estimated size.
async fn run_cli_info(settings: Settings, url: String, json: bool) -> AppResult<()> {
    let url = validate_url(&url)?;
    let downloader = Downloader::new(Arc::new(YtDlpEngine::new(settings.ytdl_bin.clone())), &settings);
    let metadata = downloader.probe(&url, Quality::Best, MediaKind::Video).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    } else {
        println!("Title: {}", metadata.title);
        println!("Uploader: {}", metadata.uploader);
        println!(
            "Duration: {}",
            grabcore::core::utils::format_duration(metadata.duration_secs)
        );
        println!(
            "Estimated size: {}",
            grabcore::core::utils::format_size_mb(metadata.estimated_size_mb)
        );
        if !metadata.description.is_empty() {
            println!("Description: {}", metadata.description);
        }
    }
    Ok(())
}
