use std::io::Stdout;
use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config;
use crate::player::{Controller, Key, KeyOutcome, MediaResource, UiEvent};
use crate::ui::{self, Focus, HitMap};
use crate::widget::Theme;

/// Main terminal event loop: dispatches media events, draws, and routes
/// input to the controller. Returns `Ok(())` when the user quits.
pub fn run<M: MediaResource>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    controller: &mut Controller<M>,
    theme: &Theme,
) -> Result<()> {
    let poll = Duration::from_millis(settings.controls.poll_ms);
    let mut focus = Focus::default();
    let mut hits = HitMap::default();

    loop {
        controller.pump_media_events();

        terminal.draw(|f| {
            hits = ui::draw(
                f,
                controller.handles(),
                theme,
                focus,
                &settings.ui,
                &settings.controls,
            )
        })?;

        if !event::poll(poll)? {
            continue;
        }
        let flow = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                handle_key(key, controller, &mut focus)
            }
            Event::Mouse(mouse) => {
                handle_mouse(mouse, controller, &mut focus, &hits);
                ControlFlow::Continue(())
            }
            _ => ControlFlow::Continue(()),
        };
        if flow.is_break() {
            tracing::info!("quit requested");
            return Ok(());
        }
    }
}

pub(super) fn progress_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Char(' ') => Key::Space,
        _ => Key::Other,
    }
}

/// Route a key press: focus movement first, then the focused control, then
/// the global bindings for anything the control ignored.
pub(super) fn handle_key<M: MediaResource>(
    key: KeyEvent,
    controller: &mut Controller<M>,
    focus: &mut Focus,
) -> ControlFlow<()> {
    let buttons = controller.handles().buttons.len();
    match key.code {
        KeyCode::Tab => {
            *focus = focus.next(buttons);
            return ControlFlow::Continue(());
        }
        KeyCode::BackTab => {
            *focus = focus.prev(buttons);
            return ControlFlow::Continue(());
        }
        _ => {}
    }

    let outcome = match *focus {
        Focus::Progress => {
            controller.handle_ui_event(UiEvent::ProgressKey(progress_key(key.code)))
        }
        Focus::Button(i) => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                controller.handle_ui_event(UiEvent::ButtonActivated(i))
            }
            _ => KeyOutcome::Ignored,
        },
    };
    if outcome == KeyOutcome::Handled {
        return ControlFlow::Continue(());
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => ControlFlow::Break(()),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            ControlFlow::Break(())
        }
        _ => ControlFlow::Continue(()),
    }
}

/// Left clicks focus and activate whatever the last frame drew under the
/// pointer.
pub(super) fn handle_mouse<M: MediaResource>(
    mouse: MouseEvent,
    controller: &mut Controller<M>,
    focus: &mut Focus,
    hits: &HitMap,
) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    if let Some(i) = hits.button_at(mouse.column, mouse.row) {
        *focus = Focus::Button(i);
        controller.handle_ui_event(UiEvent::ButtonActivated(i));
    } else if let Some((offset, width)) = hits.progress_offset(mouse.column, mouse.row) {
        *focus = Focus::Progress;
        controller.handle_ui_event(UiEvent::ProgressClicked { offset, width });
    }
}
