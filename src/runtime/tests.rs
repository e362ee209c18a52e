use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use serde_json::json;

use super::event_loop::{handle_key, handle_mouse, progress_key};
use crate::player::fake::FakeMedia;
use crate::player::{Controller, Key};
use crate::playlist::validate;
use crate::ui::{Focus, HitMap};
use crate::widget::build;

fn controller() -> (Controller<FakeMedia>, FakeMedia) {
    let config = Arc::new(
        validate(&json!([
            { "artist": "A", "title": "One", "artwork": "1.jpg", "audio": "1.mp3", "duration": "1:00" },
            { "artist": "B", "title": "Two", "artwork": "2.jpg", "audio": "2.mp3", "duration": "2:00" },
        ]))
        .unwrap(),
    );
    let handles = build(&config).handles;
    let media = FakeMedia::new();
    let mut controller = Controller::new(config, handles, media.clone()).unwrap();
    controller.init();
    (controller, media)
}

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn hits() -> HitMap {
    HitMap {
        progress: Rect::new(1, 4, 100, 1),
        buttons: vec![Rect::new(40, 8, 50, 1), Rect::new(40, 9, 50, 1)],
    }
}

#[test]
fn progress_keys_map_to_controller_keys() {
    assert_eq!(progress_key(KeyCode::Left), Key::ArrowLeft);
    assert_eq!(progress_key(KeyCode::Right), Key::ArrowRight);
    assert_eq!(progress_key(KeyCode::Home), Key::Home);
    assert_eq!(progress_key(KeyCode::End), Key::End);
    assert_eq!(progress_key(KeyCode::Char(' ')), Key::Space);
    assert_eq!(progress_key(KeyCode::Char('x')), Key::Other);
}

#[test]
fn tab_and_backtab_move_focus() {
    let (mut c, _media) = controller();
    let mut focus = Focus::Progress;

    assert!(handle_key(press(KeyCode::Tab), &mut c, &mut focus).is_continue());
    assert_eq!(focus, Focus::Button(0));
    handle_key(press(KeyCode::Tab), &mut c, &mut focus);
    handle_key(press(KeyCode::Tab), &mut c, &mut focus);
    assert_eq!(focus, Focus::Progress);
    handle_key(press(KeyCode::BackTab), &mut c, &mut focus);
    assert_eq!(focus, Focus::Button(1));
}

#[test]
fn enter_on_focused_button_activates_it() {
    let (mut c, media) = controller();
    let mut focus = Focus::Button(1);

    handle_key(press(KeyCode::Enter), &mut c, &mut focus);

    assert_eq!(c.current_index(), 1);
    assert_eq!(media.play_calls(), 1);
}

#[test]
fn space_on_focused_progress_toggles_current_track() {
    let (mut c, media) = controller();
    let mut focus = Focus::Progress;

    handle_key(press(KeyCode::Char(' ')), &mut c, &mut focus);
    assert!(!media.is_paused_now());
    handle_key(press(KeyCode::Char(' ')), &mut c, &mut focus);
    assert!(media.is_paused_now());
}

#[test]
fn arrows_on_focused_progress_seek() {
    let (mut c, media) = controller();
    media.set_duration(Some(Duration::from_secs(100)));
    let mut focus = Focus::Progress;

    handle_key(press(KeyCode::Right), &mut c, &mut focus);
    assert_eq!(media.position_now(), Duration::from_secs(5));

    // Arrows do nothing on a button.
    let mut focus = Focus::Button(0);
    handle_key(press(KeyCode::Right), &mut c, &mut focus);
    assert_eq!(media.position_now(), Duration::from_secs(5));
}

#[test]
fn unhandled_keys_fall_through_to_quit() {
    let (mut c, _media) = controller();

    let mut focus = Focus::Progress;
    assert_eq!(
        handle_key(press(KeyCode::Char('q')), &mut c, &mut focus),
        ControlFlow::Break(())
    );
    let mut focus = Focus::Button(0);
    assert_eq!(
        handle_key(press(KeyCode::Esc), &mut c, &mut focus),
        ControlFlow::Break(())
    );
    assert_eq!(
        handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut c,
            &mut focus
        ),
        ControlFlow::Break(())
    );
    assert!(handle_key(press(KeyCode::Char('x')), &mut c, &mut focus).is_continue());
}

#[test]
fn clicking_a_button_focuses_and_activates_it() {
    let (mut c, media) = controller();
    let mut focus = Focus::Progress;

    handle_mouse(click(45, 9), &mut c, &mut focus, &hits());

    assert_eq!(focus, Focus::Button(1));
    assert_eq!(c.current_index(), 1);
    assert_eq!(media.source().as_deref(), Some("2.mp3"));
}

#[test]
fn clicking_the_progress_bar_seeks() {
    let (mut c, media) = controller();
    media.set_duration(Some(Duration::from_secs(200)));
    let mut focus = Focus::Button(0);

    handle_mouse(click(51, 4), &mut c, &mut focus, &hits());

    assert_eq!(focus, Focus::Progress);
    assert_eq!(media.position_now(), Duration::from_secs(100));
}

#[test]
fn other_mouse_events_are_ignored() {
    let (mut c, media) = controller();
    let mut focus = Focus::Progress;
    let mut event = click(45, 9);
    event.kind = MouseEventKind::Moved;

    handle_mouse(event, &mut c, &mut focus, &hits());
    handle_mouse(click(0, 0), &mut c, &mut focus, &hits());

    assert_eq!(focus, Focus::Progress);
    assert_eq!(c.current_index(), 0);
    assert_eq!(media.play_calls(), 0);
}
