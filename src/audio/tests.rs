use std::sync::mpsc;
use std::time::Duration;

use crate::config::AudioSettings;
use crate::player::{MediaError, MediaEvent, MediaResource};

use super::{AudioPlayer, MediaSnapshot};

fn player() -> AudioPlayer {
    AudioPlayer::new(AudioSettings {
        position_interval_ms: 20,
        quit_fade_out_ms: 0,
    })
    .unwrap()
}

#[test]
fn set_source_resets_snapshot_without_fetching() {
    let mut player = player();
    player.set_position(Duration::from_secs(3));

    player.set_source("/nonexistent/a.mp3");

    assert_eq!(
        player.snapshot(),
        MediaSnapshot {
            source: Some("/nonexistent/a.mp3".into()),
            binding: 1,
            ..MediaSnapshot::default()
        }
    );
    assert!(player.is_paused());
    assert_eq!(player.duration(), None);
}

#[test]
fn play_after_quit_is_rejected_synchronously() {
    let mut player = player();
    player.set_source("/nonexistent/a.mp3");
    player.quit_softly();

    assert!(matches!(player.play(), Err(MediaError::Disconnected)));
    assert!(player.is_paused());
}

#[test]
fn missing_file_reports_play_failed() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.mp3");
    let missing = missing.to_string_lossy().into_owned();

    let mut player = player();
    let (tx, rx) = mpsc::channel();
    player.subscribe(tx);
    player.set_source(&missing);
    player.play().unwrap();

    let bound = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(bound.binding, player.binding());
    match bound.event {
        MediaEvent::PlayFailed { source, reason } => {
            assert_eq!(source, missing);
            assert!(!reason.is_empty());
        }
        other => panic!("unexpected event {other:?}"),
    }

    // The failure lands in the snapshot right before the event is sent.
    assert!(player.is_paused());
}

#[test]
fn undecodable_file_reports_play_failed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.mp3");
    std::fs::write(&path, b"definitely not audio").unwrap();
    let path = path.to_string_lossy().into_owned();

    let mut player = player();
    let (tx, rx) = mpsc::channel();
    player.subscribe(tx);
    player.set_source(&path);
    player.play().unwrap();

    let event = rx.recv_timeout(Duration::from_secs(5)).unwrap().event;
    assert!(matches!(event, MediaEvent::PlayFailed { .. }), "{event:?}");
}

#[test]
fn release_clears_source() {
    let mut player = player();
    player.set_source("/nonexistent/a.mp3");
    player.release();

    assert_eq!(
        player.snapshot(),
        MediaSnapshot {
            binding: 2,
            ..MediaSnapshot::default()
        }
    );
}

#[test]
fn every_rebind_moves_the_binding_on() {
    let mut player = player();
    let start = player.binding();

    player.set_source("/nonexistent/a.mp3");
    player.set_source("/nonexistent/a.mp3");
    assert_eq!(player.binding(), start + 2);

    player.release();
    assert_eq!(player.binding(), start + 3);
}

#[test]
fn seek_without_sink_is_recorded() {
    let mut player = player();
    player.set_source("/nonexistent/a.mp3");
    player.set_position(Duration::from_secs(12));
    assert_eq!(player.position(), Duration::from_secs(12));
}
