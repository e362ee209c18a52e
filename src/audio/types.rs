//! Commands and shared state exchanged with the audio thread.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::player::BoundEvent;

#[derive(Debug)]
pub enum AudioCmd {
    /// Drop the current sink and bind a new source. Nothing is fetched yet.
    SetSource { url: String, binding: u64 },
    /// Fetch and decode the bound source if needed, then start playback.
    Play,
    Pause,
    /// Rebuild the sink at the given position, keeping the paused state.
    Seek(Duration),
    Subscribe(Sender<BoundEvent>),
    /// Stop playback and forget the source.
    Release { binding: u64 },
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// What the UI thread reads back synchronously.
///
/// The UI thread writes its own requests here optimistically; the audio
/// thread only writes while `binding` is still the one it is playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSnapshot {
    pub source: Option<String>,
    /// Bumped by every rebind, including one to the same URL.
    pub binding: u64,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub paused: bool,
}

impl Default for MediaSnapshot {
    fn default() -> Self {
        Self {
            source: None,
            binding: 0,
            position: Duration::ZERO,
            duration: None,
            paused: true,
        }
    }
}

impl MediaSnapshot {
    /// Back to the state of a freshly bound `source`. Returns the new binding.
    pub fn rebind(&mut self, source: Option<String>) -> u64 {
        *self = Self {
            source,
            binding: self.binding.wrapping_add(1),
            ..Self::default()
        };
        self.binding
    }
}

pub type SnapshotHandle = Arc<Mutex<MediaSnapshot>>;
