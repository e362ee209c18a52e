//! In-memory media resource for deterministic controller tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use super::media::{BoundEvent, MediaError, MediaEvent, MediaResource};

#[derive(Debug, Default)]
pub struct FakeState {
    pub source: Option<String>,
    pub binding: u64,
    pub paused: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub source_loads: Vec<String>,
    pub released: bool,
    /// Reject `play()` synchronously.
    pub fail_play: bool,
    listeners: Vec<Sender<BoundEvent>>,
}

/// Cloning shares the state, so a test can keep a probe after moving the
/// fake into a controller.
#[derive(Debug, Clone)]
pub struct FakeMedia {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeMedia {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeState {
                paused: true,
                ..FakeState::default()
            })),
        }
    }

    pub fn set_duration(&self, duration: Option<Duration>) {
        self.state.borrow_mut().duration = duration;
    }

    pub fn set_position_raw(&self, position: Duration) {
        self.state.borrow_mut().position = position;
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Publish `event` for the current binding to every listener, as the
    /// backend would.
    pub fn emit(&self, event: MediaEvent) {
        let state = self.state.borrow();
        let bound = BoundEvent {
            binding: state.binding,
            event,
        };
        for listener in &state.listeners {
            let _ = listener.send(bound.clone());
        }
    }

    pub fn play_calls(&self) -> usize {
        self.state.borrow().play_calls
    }

    pub fn source(&self) -> Option<String> {
        self.state.borrow().source.clone()
    }

    pub fn is_paused_now(&self) -> bool {
        self.state.borrow().paused
    }

    pub fn position_now(&self) -> Duration {
        self.state.borrow().position
    }
}

impl MediaResource for FakeMedia {
    fn set_source(&mut self, url: &str) {
        let mut state = self.state.borrow_mut();
        state.source = Some(url.to_string());
        state.binding += 1;
        state.source_loads.push(url.to_string());
        state.position = Duration::ZERO;
        state.duration = None;
        state.paused = true;
    }

    fn binding(&self) -> u64 {
        self.state.borrow().binding
    }

    fn play(&mut self) -> Result<(), MediaError> {
        let mut state = self.state.borrow_mut();
        state.play_calls += 1;
        if state.fail_play {
            return Err(MediaError::Disconnected);
        }
        state.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.state.borrow_mut();
        state.pause_calls += 1;
        state.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }

    fn position(&self) -> Duration {
        self.state.borrow().position
    }

    fn set_position(&mut self, position: Duration) {
        self.state.borrow_mut().position = position;
    }

    fn duration(&self) -> Option<Duration> {
        self.state.borrow().duration
    }

    fn subscribe(&mut self, listener: Sender<BoundEvent>) {
        self.state.borrow_mut().listeners.push(listener);
    }

    fn release(&mut self) {
        let mut state = self.state.borrow_mut();
        state.source = None;
        state.binding += 1;
        state.paused = true;
        state.position = Duration::ZERO;
        state.duration = None;
        state.released = true;
    }
}
