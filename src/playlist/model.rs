use std::collections::BTreeMap;

/// One playable entry of the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub artist: String,
    pub title: String,
    pub artwork_url: String,
    pub audio_url: String,
    /// Display-only label such as `"3:41"`. Never parsed.
    pub display_duration: String,
}

/// Free-form style overrides, grouped by category (`colors`, `fontWeight`,
/// `radius`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOptions(BTreeMap<String, BTreeMap<String, String>>);

impl StyleOptions {
    pub fn new(groups: BTreeMap<String, BTreeMap<String, String>>) -> Self {
        Self(groups)
    }

    #[cfg(test)]
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.0.get(group)?.get(key).map(String::as_str)
    }

    /// Iterate `(group, key, value)` triples in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.0.iter().flat_map(|(group, entries)| {
            entries
                .iter()
                .map(move |(key, value)| (group.as_str(), key.as_str(), value.as_str()))
        })
    }
}

/// A validated playlist. Only [`validate`](super::validate) produces one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistConfig {
    tracks: Vec<Track>,
    options: Option<StyleOptions>,
}

impl PlaylistConfig {
    pub(super) fn new(tracks: Vec<Track>, options: Option<StyleOptions>) -> Self {
        debug_assert!(!tracks.is_empty());
        Self { tracks, options }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn options(&self) -> Option<&StyleOptions> {
        self.options.as_ref()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }
}
