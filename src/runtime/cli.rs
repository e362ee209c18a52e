use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for musik
#[derive(Parser, Debug)]
#[command(name = "musik")]
#[command(about = "Play an audio playlist in the terminal")]
#[command(version)]
pub struct Cli {
    /// Playlist document: a path, a file:// URL or an http(s):// URL
    #[arg(env = "MUSIK_PLAYLIST")]
    pub playlist: String,

    /// Write logs to this file instead of the state directory
    #[arg(long, env = "MUSIK_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}
