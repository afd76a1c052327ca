use clap::{Parser, Subcommand};

use grabcore::Quality;

#[derive(Parser)]
#[command(name = "grabbot")]
#[command(author, version, about = "Telegram bot that downloads videos and audio from 1500+ sites", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot (long polling)
    Run,

    /// Download a single URL without Telegram
    Download {
        /// URL to download from
        url: String,

        /// Video quality: best, 1080p, 720p, 480p
        #[arg(short, long, default_value = "best")]
        quality: Quality,

        /// Extract audio (MP3 320kbps) instead of video
        #[arg(short, long)]
        audio: bool,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show metadata and estimated size for a URL
    Info {
        /// URL to inspect
        url: String,

        /// Print the metadata as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
