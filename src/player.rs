//! Playback controller: the state machine that keeps one media resource and
//! the widget's handles in sync with the user's interactions.

mod controller;
mod media;
pub mod time;

pub use controller::*;
pub use media::*;

#[cfg(test)]
pub(crate) mod fake;
