use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::player::{BoundEvent, MediaError, MediaResource};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, MediaSnapshot, SnapshotHandle};

/// `rodio`-backed media resource.
///
/// Commands go to a dedicated audio thread; reads come from a shared
/// snapshot that both sides keep current.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    snapshot: SnapshotHandle,
    join: Option<JoinHandle<()>>,
    quit_fade_out: Duration,
}

impl AudioPlayer {
    pub fn new(audio_settings: AudioSettings) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let snapshot: SnapshotHandle = Arc::new(Mutex::new(MediaSnapshot::default()));
        let quit_fade_out = Duration::from_millis(audio_settings.quit_fade_out_ms);

        let join = spawn_audio_thread(rx, snapshot.clone(), audio_settings)?;

        Ok(Self {
            tx,
            snapshot,
            join: Some(join),
            quit_fade_out,
        })
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> MediaSnapshot {
        self.lock().clone()
    }

    /// Fade out, stop the audio thread and wait for it.
    pub fn quit_softly(&mut self) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: self.quit_fade_out.as_millis() as u64,
        });
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), MediaError> {
        self.tx.send(cmd).map_err(|_| MediaError::Disconnected)
    }

    fn send_or_log(&self, cmd: AudioCmd) {
        // After a quit the snapshot still tracks requests; the thread is gone.
        if self.join.is_none() {
            return;
        }
        if let Err(err) = self.send(cmd) {
            tracing::warn!(error = %err, "audio command dropped");
        }
    }

    fn lock(&self) -> MutexGuard<'_, MediaSnapshot> {
        // A poisoned snapshot only means the audio thread panicked mid-write.
        self.snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MediaResource for AudioPlayer {
    fn set_source(&mut self, url: &str) {
        let binding = self.lock().rebind(Some(url.to_string()));
        self.send_or_log(AudioCmd::SetSource {
            url: url.to_string(),
            binding,
        });
    }

    fn binding(&self) -> u64 {
        self.lock().binding
    }

    fn play(&mut self) -> Result<(), MediaError> {
        // Flip first: the thread may report a failure before we return.
        self.lock().paused = false;
        if let Err(err) = self.send(AudioCmd::Play) {
            self.lock().paused = true;
            return Err(err);
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.lock().paused = true;
        self.send_or_log(AudioCmd::Pause);
    }

    fn is_paused(&self) -> bool {
        self.lock().paused
    }

    fn position(&self) -> Duration {
        self.lock().position
    }

    fn set_position(&mut self, position: Duration) {
        {
            let mut snapshot = self.lock();
            snapshot.position = match snapshot.duration {
                Some(duration) => position.min(duration),
                None => position,
            };
        }
        self.send_or_log(AudioCmd::Seek(position));
    }

    fn duration(&self) -> Option<Duration> {
        self.lock().duration
    }

    fn subscribe(&mut self, listener: Sender<BoundEvent>) {
        self.send_or_log(AudioCmd::Subscribe(listener));
    }

    fn release(&mut self) {
        let binding = self.lock().rebind(None);
        self.send_or_log(AudioCmd::Release { binding });
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.quit_softly();
    }
}
