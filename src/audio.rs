//! `rodio` media backend: an audio thread driven by commands, publishing
//! [`MediaEvent`](crate::player::MediaEvent)s back to its listeners.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
#[cfg(test)]
use types::MediaSnapshot;

#[cfg(test)]
mod tests;
