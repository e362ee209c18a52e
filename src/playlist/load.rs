use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::fetch::{self, FetchError};

use super::model::PlaylistConfig;
use super::validate::{ConfigError, validate};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load config from \"{location}\"")]
    Fetch {
        location: String,
        #[source]
        source: FetchError,
    },

    #[error("Config at \"{location}\" is not valid JSON")]
    Json {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config at \"{location}\" is not valid TOML")]
    Toml {
        location: String,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Fetch, parse, validate and freeze the playlist at `location`.
pub fn load(location: &str) -> Result<Arc<PlaylistConfig>, LoadError> {
    let bytes = fetch::fetch_bytes(location).map_err(|source| LoadError::Fetch {
        location: location.to_string(),
        source,
    })?;

    let document = parse_document(location, &bytes)?;
    let config = validate(&document)?;
    tracing::info!(location, tracks = config.len(), "playlist loaded");

    Ok(Arc::new(config))
}

/// Parse raw bytes as JSON, or as TOML when the location ends in `.toml`.
fn parse_document(location: &str, bytes: &[u8]) -> Result<Value, LoadError> {
    if is_toml(location) {
        let text = String::from_utf8_lossy(bytes);
        toml::from_str::<Value>(&text).map_err(|source| LoadError::Toml {
            location: location.to_string(),
            source,
        })
    } else {
        serde_json::from_slice(bytes).map_err(|source| LoadError::Json {
            location: location.to_string(),
            source,
        })
    }
}

fn is_toml(location: &str) -> bool {
    let path = location.split(['?', '#']).next().unwrap_or(location);
    path.to_ascii_lowercase().ends_with(".toml")
}
