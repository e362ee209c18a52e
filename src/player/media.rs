use std::sync::mpsc::Sender;
use std::time::Duration;

/// Notifications published by a media resource, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    Playing,
    Paused,
    TimeUpdate,
    Ended,
    /// An asynchronous play request for `source` was rejected.
    PlayFailed { source: String, reason: String },
}

/// A [`MediaEvent`] stamped with the source binding that produced it.
///
/// Events queued before a rebind still carry the old binding, so a listener
/// can tell them apart from events for the source it now expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundEvent {
    pub binding: u64,
    pub event: MediaEvent,
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("media backend is no longer running")]
    Disconnected,
}

/// A single-source audio element.
///
/// State setters take effect immediately from the caller's point of view;
/// the backend catches up and reports through subscribed listeners.
pub trait MediaResource {
    /// Bind a new source. Position goes back to zero, duration becomes
    /// unknown and playback is paused. Nothing is fetched yet.
    fn set_source(&mut self, url: &str);

    /// Identifies the current source binding. Every `set_source` and
    /// `release` moves it on.
    fn binding(&self) -> u64;

    /// Request playback. Synchronous errors mean the request was never
    /// queued; later failures arrive as [`MediaEvent::PlayFailed`].
    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    fn position(&self) -> Duration;

    fn set_position(&mut self, position: Duration);

    /// `None` until the source's metadata is known.
    fn duration(&self) -> Option<Duration>;

    /// Register a listener. Registering twice delivers every event twice.
    fn subscribe(&mut self, listener: Sender<BoundEvent>);

    /// Stop playback and detach the source.
    fn release(&mut self);
}
