//! File logging. The terminal belongs to the UI, so nothing is written to
//! stdout or stderr once the subscriber is installed.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogSettings, default_log_path};

/// Pick the log file: CLI flag, then settings, then the XDG state directory.
pub fn resolve_log_path(cli: Option<&Path>, settings: &LogSettings) -> Option<PathBuf> {
    cli.map(Path::to_path_buf)
        .or_else(|| settings.file.clone())
        .or_else(default_log_path)
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Install the global subscriber. `RUST_LOG` overrides `settings.level`.
pub fn init(path: Option<&Path>, settings: &LogSettings) -> Result<()> {
    let Some(path) = path else {
        // Nowhere to write; keep the terminal clean.
        return Ok(());
    };
    let file = open_log_file(path)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("failed to install log subscriber")?;

    tracing::info!(path = %path.display(), "logging initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_beats_settings() {
        let settings = LogSettings {
            file: Some(PathBuf::from("/tmp/from-settings.log")),
            ..LogSettings::default()
        };
        assert_eq!(
            resolve_log_path(Some(Path::new("/tmp/from-cli.log")), &settings),
            Some(PathBuf::from("/tmp/from-cli.log"))
        );
        assert_eq!(
            resolve_log_path(None, &settings),
            Some(PathBuf::from("/tmp/from-settings.log"))
        );
    }

    #[test]
    fn opening_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state/musik.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
