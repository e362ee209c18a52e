use std::ops::ControlFlow;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::player::{BoundEvent, MediaEvent};

use super::sink::{LoadedSource, SinkError, create_sink_at, load_source};
use super::types::{AudioCmd, MediaSnapshot, SnapshotHandle};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    snapshot: SnapshotHandle,
    audio_settings: AudioSettings,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("musik-audio".into())
        .spawn(move || AudioThread::new(snapshot, &audio_settings).run(rx))
}

/// State owned by the audio thread.
struct AudioThread {
    snapshot: SnapshotHandle,
    tick: Duration,
    /// Opened on the first play request so a missing device only fails
    /// playback, not startup.
    stream: Option<OutputStream>,
    listeners: Vec<Sender<BoundEvent>>,
    source: Option<String>,
    /// Binding of `source`; stamps every event and guards snapshot writes.
    binding: u64,
    loaded: Option<LoadedSource>,
    sink: Option<Sink>,
    /// Track position of the sink's first sample.
    offset: Duration,
    playing: bool,
}

impl AudioThread {
    fn new(snapshot: SnapshotHandle, settings: &AudioSettings) -> Self {
        Self {
            snapshot,
            tick: Duration::from_millis(settings.position_interval_ms.max(1)),
            stream: None,
            listeners: Vec::new(),
            source: None,
            binding: 0,
            loaded: None,
            sink: None,
            offset: Duration::ZERO,
            playing: false,
        }
    }

    fn run(mut self, rx: Receiver<AudioCmd>) {
        let mut next_tick = Instant::now() + self.tick;
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            match rx.recv_timeout(timeout) {
                Ok(cmd) => {
                    if self.handle(cmd).is_break() {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    self.on_tick();
                    next_tick = Instant::now() + self.tick;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        tracing::debug!("audio thread stopped");
    }

    fn handle(&mut self, cmd: AudioCmd) -> ControlFlow<()> {
        match cmd {
            AudioCmd::SetSource { url, binding } => {
                self.stop_sink();
                self.loaded = None;
                self.offset = Duration::ZERO;
                self.source = Some(url);
                self.binding = binding;
            }
            AudioCmd::Play => self.play(),
            AudioCmd::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                }
                if self.playing {
                    self.playing = false;
                    self.emit(MediaEvent::Paused);
                }
            }
            AudioCmd::Seek(position) => self.seek(position),
            AudioCmd::Subscribe(listener) => self.listeners.push(listener),
            AudioCmd::Release { binding } => {
                self.stop_sink();
                self.loaded = None;
                self.source = None;
                self.binding = binding;
                self.offset = Duration::ZERO;
            }
            AudioCmd::Quit { fade_out_ms } => {
                self.quit(fade_out_ms);
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn play(&mut self) {
        let Some(source) = self.source.clone() else {
            tracing::debug!("play requested without a source");
            return;
        };
        if self.playing {
            return;
        }

        if let Err(err) = self.prepare(&source) {
            self.fail(err.to_string());
            return;
        }

        let Some(sink) = &self.sink else {
            return;
        };
        sink.play();
        self.playing = true;
        tracing::debug!(%source, offset = ?self.offset, "playback started");
        self.emit(MediaEvent::Playing);
    }

    /// Make sure the source is loaded, an output is open and a sink exists.
    fn prepare(&mut self, source: &str) -> Result<(), SinkError> {
        if self.loaded.is_none() {
            let loaded = load_source(source)?;
            self.update_snapshot(|s| s.duration = loaded.duration);
            self.loaded = Some(loaded);
        }

        if self.stream.is_none() {
            let mut stream = OutputStreamBuilder::open_default_stream()?;
            // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
            // but noisy for a TUI app.
            stream.log_on_drop(false);
            self.stream = Some(stream);
        }

        // A drained sink means the track ended; playing again starts over.
        if self.sink.as_ref().is_some_and(Sink::empty) {
            self.offset = Duration::ZERO;
            self.stop_sink();
        }

        if self.sink.is_none() {
            self.sink = Some(self.build_sink(self.offset)?);
        }
        Ok(())
    }

    fn build_sink(&self, start_at: Duration) -> Result<Sink, SinkError> {
        match (&self.stream, &self.loaded) {
            (Some(stream), Some(loaded)) => create_sink_at(stream, loaded, start_at),
            _ => Err(SinkError::NotReady),
        }
    }

    fn seek(&mut self, position: Duration) {
        let position = match self.loaded.as_ref().and_then(|l| l.duration) {
            Some(duration) => position.min(duration),
            None => position,
        };
        self.offset = position;

        // Without a sink the offset is applied by the next play request.
        if self.sink.is_some() {
            self.stop_sink();
            match self.build_sink(position) {
                Ok(sink) => {
                    if self.playing {
                        sink.play();
                    }
                    self.sink = Some(sink);
                }
                Err(err) => {
                    self.fail(err.to_string());
                    return;
                }
            }
        }

        self.update_snapshot(|s| s.position = position);
        self.emit(MediaEvent::TimeUpdate);
    }

    fn on_tick(&mut self) {
        if !self.playing {
            return;
        }
        let Some(sink) = &self.sink else {
            return;
        };

        if sink.empty() {
            let end = self
                .loaded
                .as_ref()
                .and_then(|l| l.duration)
                .unwrap_or_else(|| self.position());
            self.playing = false;
            self.offset = end;
            self.update_snapshot(|s| {
                s.position = end;
                s.paused = true;
            });
            tracing::debug!(source = ?self.source, "track ended");
            self.emit(MediaEvent::Paused);
            self.emit(MediaEvent::Ended);
            return;
        }

        let position = self.position();
        self.update_snapshot(|s| s.position = position);
        self.emit(MediaEvent::TimeUpdate);
    }

    fn position(&self) -> Duration {
        self.offset + self.sink.as_ref().map_or(Duration::ZERO, Sink::get_pos)
    }

    fn fail(&mut self, reason: String) {
        let source = self.source.clone().unwrap_or_default();
        tracing::warn!(%source, %reason, "play request failed");
        self.playing = false;
        self.update_snapshot(|s| s.paused = true);
        self.emit(MediaEvent::PlayFailed { source, reason });
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.playing = false;
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(sink) = &self.sink {
            if self.playing {
                fade_out_sink(sink, fade_out_ms);
            }
            sink.stop();
        }
        self.playing = false;
        self.update_snapshot(|s| s.paused = true);
    }

    /// Apply `f` to the shared snapshot unless the UI has rebound since.
    fn update_snapshot(&self, f: impl FnOnce(&mut MediaSnapshot)) {
        if let Ok(mut snapshot) = self.snapshot.lock() {
            if snapshot.binding == self.binding {
                f(&mut snapshot);
            }
        }
    }

    fn emit(&mut self, event: MediaEvent) {
        let bound = BoundEvent {
            binding: self.binding,
            event,
        };
        self.listeners
            .retain(|listener| listener.send(bound.clone()).is_ok());
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
