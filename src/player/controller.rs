use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::playlist::{PlaylistConfig, Track};
use crate::widget::WidgetHandles;

use super::media::{BoundEvent, MediaEvent, MediaResource};

pub const DEFAULT_SEEK_STEP_PERCENT: f64 = 5.0;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("widget has {buttons} track buttons but the playlist has {tracks} tracks")]
    HandleMismatch { buttons: usize, tracks: usize },
}

/// Keys the progress control understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Space,
    Other,
}

/// Whether the controller consumed a key. `Ignored` keys keep their
/// default host behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
}

/// User interactions delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    ButtonActivated(usize),
    /// Pointer click `offset` columns into a progress region `width` wide.
    ProgressClicked { offset: u16, width: u16 },
    ProgressKey(Key),
}

/// Playback controller for one widget instance.
///
/// Owns the media resource and the current track index, and projects
/// both onto the widget's handles.
pub struct Controller<M: MediaResource> {
    config: Arc<PlaylistConfig>,
    handles: WidgetHandles,
    media: M,
    current_index: usize,
    /// Keyboard seek step as a fraction of the duration.
    seek_step: f64,
    listener: Sender<BoundEvent>,
    events: Receiver<BoundEvent>,
    bound: bool,
}

impl<M: MediaResource> Controller<M> {
    pub fn new(
        config: Arc<PlaylistConfig>,
        handles: WidgetHandles,
        mut media: M,
    ) -> Result<Self, ControllerError> {
        let (buttons, tracks) = (handles.buttons.len(), config.len());
        debug_assert_eq!(buttons, tracks, "track buttons must align with tracks");
        if buttons != tracks {
            return Err(ControllerError::HandleMismatch { buttons, tracks });
        }

        if let Some(first) = config.tracks().first() {
            media.set_source(&first.audio_url);
        }

        let (listener, events) = mpsc::channel();
        Ok(Self {
            config,
            handles,
            media,
            current_index: 0,
            seek_step: DEFAULT_SEEK_STEP_PERCENT / 100.0,
            listener,
            events,
            bound: false,
        })
    }

    pub fn with_seek_step(mut self, percent: f64) -> Self {
        self.seek_step = percent / 100.0;
        self
    }

    /// Bind listeners and show track 0. Nothing is played or fetched.
    pub fn init(&mut self) {
        self.media.subscribe(self.listener.clone());
        self.bound = true;
        self.render_sync();
        tracing::debug!(tracks = self.config.len(), "controller initialised");
    }

    /// Stop playback and detach the source. The handles are left as they are.
    pub fn teardown(&mut self) {
        self.media.pause();
        self.media.release();
        self.bound = false;
        tracing::debug!(index = self.current_index, "controller torn down");
    }

    pub fn handles(&self) -> &WidgetHandles {
        &self.handles
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn handle_ui_event(&mut self, event: UiEvent) -> KeyOutcome {
        if !self.bound {
            tracing::trace!(?event, "ui event before init");
            return KeyOutcome::Ignored;
        }

        match event {
            UiEvent::ButtonActivated(index) => {
                self.on_track_button_activated(index);
                KeyOutcome::Handled
            }
            UiEvent::ProgressClicked { offset, width } => {
                if width == 0 {
                    return KeyOutcome::Ignored;
                }
                self.seek(f64::from(offset) / f64::from(width));
                KeyOutcome::Handled
            }
            UiEvent::ProgressKey(key) => self.handle_progress_key(key),
        }
    }

    pub fn on_track_button_activated(&mut self, index: usize) {
        debug_assert!(
            index < self.config.len(),
            "track button {index} out of range"
        );
        if index >= self.config.len() {
            tracing::error!(index, tracks = self.config.len(), "track button out of range");
            return;
        }

        if index == self.current_index {
            self.toggle();
        } else {
            self.switch_to(index);
        }
    }

    /// Seek to `fraction` of the current track. Fractions are clamped to
    /// `[0, 1]`; non-finite fractions and unknown durations do nothing.
    pub fn seek(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        let Some(duration) = self.known_duration() else {
            return;
        };
        self.media
            .set_position(duration.mul_f64(fraction.clamp(0.0, 1.0)));
    }

    pub fn handle_progress_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Space => self.on_track_button_activated(self.current_index),
            Key::ArrowLeft | Key::ArrowRight | Key::Home | Key::End => {
                if let Some(duration) = self.known_duration() {
                    let target = self.key_target(key, duration);
                    self.media.set_position(target);
                }
            }
            Key::Other => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate => self.update_progress(),
            MediaEvent::Ended => self.advance(),
            MediaEvent::Playing => self.set_playing(true),
            MediaEvent::Paused => self.set_playing(false),
            MediaEvent::PlayFailed { source, reason } => self.play_failed(&source, &reason),
        }
    }

    /// Drain the media listener in emission order. Events for the current
    /// binding are dispatched; events left over from a source that has
    /// since been replaced are dropped. Returns how many were drained.
    pub fn pump_media_events(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(BoundEvent { binding, event }) = self.events.try_recv() {
            drained += 1;
            let current = self.media.binding();
            if binding == current {
                self.handle_media_event(event);
            } else {
                Self::discard_stale(binding, current, event);
            }
        }
        drained
    }

    /// Project the current track onto the handles.
    pub fn render_sync(&mut self) {
        let index = self.current_index;
        let playing = !self.media.is_paused();
        let Some(track) = self.config.tracks().get(index) else {
            return;
        };

        self.handles.clear_markers();
        self.handles.reset_progress();
        self.handles.show_track(track);

        let button = &mut self.handles.buttons[index];
        button.active = true;
        button.playing = playing;
        self.handles.container.playing = playing;
    }

    fn discard_stale(binding: u64, current: u64, event: MediaEvent) {
        match event {
            MediaEvent::PlayFailed { source, reason } => tracing::warn!(
                %source,
                %reason,
                binding,
                current,
                "superseded play request failed"
            ),
            event => tracing::trace!(?event, binding, current, "dropping stale media event"),
        }
    }

    fn current_track(&self) -> &Track {
        &self.config.tracks()[self.current_index]
    }

    fn known_duration(&self) -> Option<Duration> {
        self.media.duration().filter(|d| !d.is_zero())
    }

    fn key_target(&self, key: Key, duration: Duration) -> Duration {
        let step = duration.mul_f64(self.seek_step);
        let position = self.media.position();
        match key {
            Key::ArrowLeft => position.saturating_sub(step),
            Key::ArrowRight => (position + step).min(duration),
            Key::End => duration,
            _ => Duration::ZERO,
        }
    }

    fn toggle(&mut self) {
        if self.media.is_paused() {
            self.request_play();
        } else {
            self.media.pause();
        }
    }

    fn switch_to(&mut self, index: usize) {
        tracing::debug!(from = self.current_index, to = index, "switching track");
        self.current_index = index;

        // Rebinding the source also rewinds to zero.
        self.media.pause();
        let url = self.current_track().audio_url.clone();
        self.media.set_source(&url);
        self.request_play();
        self.render_sync();
    }

    fn request_play(&mut self) {
        if let Err(err) = self.media.play() {
            let track = self.current_track();
            tracing::warn!(
                index = self.current_index,
                title = %track.title,
                source = %track.audio_url,
                error = %err,
                "play request rejected"
            );
        }
    }

    fn update_progress(&mut self) {
        let Some(duration) = self.known_duration() else {
            return;
        };
        let position = self.media.position();
        let percent = (position.as_secs_f64() / duration.as_secs_f64() * 100.0).min(100.0);
        self.handles.set_progress(percent, position, duration);
    }

    fn advance(&mut self) {
        let next = self.current_index + 1;
        if next < self.config.len() {
            self.switch_to(next);
            return;
        }

        tracing::debug!(index = self.current_index, "reached end of playlist");
        self.media.set_position(Duration::ZERO);
        self.handles.reset_progress();
        self.set_playing(false);
    }

    fn set_playing(&mut self, playing: bool) {
        let index = self.current_index;
        if let Some(button) = self.handles.buttons.get_mut(index) {
            button.playing = playing;
        }
        self.handles.container.playing = playing;
    }

    fn play_failed(&mut self, source: &str, reason: &str) {
        let matching = self
            .config
            .tracks()
            .iter()
            .position(|track| track.audio_url == source);

        if self.current_track().audio_url != source {
            tracing::warn!(source, reason, index = ?matching, "superseded play request failed");
            return;
        }

        tracing::warn!(
            source,
            reason,
            index = self.current_index,
            title = %self.current_track().title,
            "playback failed"
        );
        self.set_playing(false);
    }
}
