use std::time::Duration;

use crate::player::time::format_duration;
use crate::playlist::Track;

/// The clickable/focusable progress track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRegion {
    /// Rounded percentage, `0..=100`.
    pub value_now: u8,
    /// Human readable position, e.g. `"1:05 / 3:30"`.
    pub value_text: String,
}

impl Default for ProgressRegion {
    fn default() -> Self {
        Self {
            value_now: 0,
            value_text: format_duration(None),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FillBar {
    pub width_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artwork {
    pub src: String,
    /// Accessible description of the image.
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextHandle {
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Container {
    pub playing: bool,
}

/// One row of the track list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackButton {
    /// Accessible label, `"Play {title} by {artist}"`.
    pub label: String,
    pub title: String,
    pub duration: String,
    pub active: bool,
    pub playing: bool,
}

/// Every element the player mutates. `buttons` is index-aligned with the
/// playlist's tracks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetHandles {
    pub container: Container,
    pub progress: ProgressRegion,
    pub fill_bar: FillBar,
    pub artwork: Artwork,
    pub title: TextHandle,
    pub artist: TextHandle,
    pub buttons: Vec<TrackButton>,
}

impl WidgetHandles {
    /// Remove `active` and `playing` markers from every button.
    pub fn clear_markers(&mut self) {
        for button in &mut self.buttons {
            button.active = false;
            button.playing = false;
        }
        self.container.playing = false;
    }

    /// Put the fill bar and its readouts back at the start.
    pub fn reset_progress(&mut self) {
        self.fill_bar.width_percent = 0.0;
        self.progress = ProgressRegion::default();
    }

    /// Project a playback position onto the fill bar and readouts.
    pub fn set_progress(&mut self, percent: f64, position: Duration, duration: Duration) {
        let percent = percent.clamp(0.0, 100.0);
        self.fill_bar.width_percent = percent;
        self.progress.value_now = percent.round() as u8;
        self.progress.value_text = format!(
            "{} / {}",
            format_duration(Some(position)),
            format_duration(Some(duration))
        );
    }

    /// Show `track` in the artwork/title/artist panel.
    pub fn show_track(&mut self, track: &Track) {
        self.artwork.src = track.artwork_url.clone();
        self.artwork.label = format!("{} by {}", track.title, track.artist);
        self.title.text = track.title.clone();
        self.artist.text = track.artist.clone();
    }
}
