//! Loading sources and building `rodio` sinks from them.
//!
//! Sources are fetched once into memory so seeking can rebuild the sink
//! without touching the network again.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use lofty::file::AudioFile;
use lofty::probe::Probe;
use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::fetch::{FetchError, fetch_bytes};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("unsupported or corrupt audio: {0}")]
    Decode(#[from] DecoderError),
    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("source is not loaded")]
    NotReady,
}

/// Encoded audio held in memory, plus its duration when it could be found.
pub(super) struct LoadedSource {
    pub bytes: Arc<[u8]>,
    pub duration: Option<Duration>,
}

pub(super) fn load_source(location: &str) -> Result<LoadedSource, SinkError> {
    let bytes: Arc<[u8]> = fetch_bytes(location)?.into();

    let decoder = Decoder::new(Cursor::new(bytes.clone()))?;
    let duration = decoder
        .total_duration()
        .or_else(|| probe_duration(&bytes))
        .filter(|d| !d.is_zero());

    tracing::debug!(location, bytes = bytes.len(), ?duration, "source loaded");
    Ok(LoadedSource { bytes, duration })
}

fn probe_duration(bytes: &[u8]) -> Option<Duration> {
    let tagged = Probe::new(Cursor::new(bytes))
        .guess_file_type()
        .ok()?
        .read()
        .ok()?;
    Some(tagged.properties().duration())
}

/// Create a paused `Sink` for `loaded` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    loaded: &LoadedSource,
    start_at: Duration,
) -> Result<Sink, SinkError> {
    let source = Decoder::new(Cursor::new(loaded.bytes.clone()))?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}
