use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use super::model::{PlaylistConfig, StyleOptions, Track};

/// Shape or type problems found in a playlist document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Config must be an object")]
    NotAnObject,

    #[error("Options must be an object")]
    OptionsNotObject,

    #[error("Options.{group} must be an object")]
    OptionGroupNotObject { group: String },

    #[error("Options.{group}.{key} must be a string")]
    OptionNotString { group: String, key: String },

    #[error("Tracks must be an array")]
    TracksNotArray,

    #[error("Tracks must contain at least one object")]
    NoTracks,

    #[error("Invalid element at index {index}")]
    InvalidElement { index: usize },

    #[error("Invalid {field} at index {index}")]
    InvalidField { field: &'static str, index: usize },
}

/// Document field names, in the order they are checked.
const TRACK_FIELDS: [&str; 5] = ["artist", "title", "artwork", "audio", "duration"];

/// Validate a parsed playlist document.
///
/// Accepts `{ "tracks": [...], "options": {...} }` or a bare array of tracks.
/// Options are checked before tracks.
pub fn validate(document: &Value) -> Result<PlaylistConfig, ConfigError> {
    let (tracks, options) = match document {
        Value::Array(_) => (Some(document), None),
        Value::Object(map) => (map.get("tracks"), map.get("options")),
        _ => return Err(ConfigError::NotAnObject),
    };

    let options = match options {
        Some(value) if !is_falsy(value) => Some(validate_options(value)?),
        _ => None,
    };
    let tracks = validate_tracks(tracks)?;

    Ok(PlaylistConfig::new(tracks, options))
}

/// `null`, `false`, `0` and `""` count as "no options".
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Key/value pairs of an object-like value. Arrays count, keyed by index.
fn entries(value: &Value) -> Option<Vec<(String, &Value)>> {
    match value {
        Value::Object(map) => Some(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Array(items) => Some(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        ),
        _ => None,
    }
}

fn validate_options(options: &Value) -> Result<StyleOptions, ConfigError> {
    let groups = entries(options).ok_or(ConfigError::OptionsNotObject)?;

    let mut out = BTreeMap::new();
    for (group, group_value) in groups {
        let Some(pairs) = entries(group_value) else {
            return Err(ConfigError::OptionGroupNotObject { group });
        };

        let mut values = BTreeMap::new();
        for (key, value) in pairs {
            let Some(value) = value.as_str() else {
                return Err(ConfigError::OptionNotString { group, key });
            };
            values.insert(key, value.to_string());
        }
        out.insert(group, values);
    }

    Ok(StyleOptions::new(out))
}

fn validate_tracks(tracks: Option<&Value>) -> Result<Vec<Track>, ConfigError> {
    let Some(Value::Array(items)) = tracks else {
        return Err(ConfigError::TracksNotArray);
    };
    if items.is_empty() {
        return Err(ConfigError::NoTracks);
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            // Arrays are objects too; they fail on their first field.
            Value::Object(_) | Value::Array(_) => validate_track(item, index),
            _ => Err(ConfigError::InvalidElement { index }),
        })
        .collect()
}

fn validate_track(fields: &Value, index: usize) -> Result<Track, ConfigError> {
    let [artist, title, artwork, audio, duration] = TRACK_FIELDS;
    Ok(Track {
        artist: string_field(fields, artist, index)?,
        title: string_field(fields, title, index)?,
        artwork_url: string_field(fields, artwork, index)?,
        audio_url: string_field(fields, audio, index)?,
        display_duration: string_field(fields, duration, index)?,
    })
}

fn string_field(
    fields: &Value,
    field: &'static str,
    index: usize,
) -> Result<String, ConfigError> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ConfigError::InvalidField { field, index })
}
