//! Terminal rendering of the widget handles.
//!
//! `draw` is a pure projection: it reads the handle bundle and theme, renders
//! them with `ratatui`, and returns the rectangles the host needs to route
//! mouse clicks back to the controller.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::config::{ControlsSettings, UiSettings};
use crate::widget::{Theme, TrackButton, WidgetHandles};

const META_WIDTH: u16 = 36;
const META_HEIGHT: u16 = 6;

/// Keyboard focus, in tab order: the progress bar, then each track button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Progress,
    Button(usize),
}

impl Focus {
    pub fn next(self, buttons: usize) -> Self {
        match self {
            Focus::Progress if buttons > 0 => Focus::Button(0),
            Focus::Button(i) if i + 1 < buttons => Focus::Button(i + 1),
            _ => Focus::Progress,
        }
    }

    pub fn prev(self, buttons: usize) -> Self {
        match self {
            Focus::Progress if buttons > 0 => Focus::Button(buttons - 1),
            Focus::Button(i) if i > 0 && i <= buttons => Focus::Button(i - 1),
            _ => Focus::Progress,
        }
    }
}

/// Screen areas of the last frame that accept clicks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    /// The bar inside the progress block.
    pub progress: Rect,
    /// Index-aligned with the buttons; rows scrolled out of view are empty.
    pub buttons: Vec<Rect>,
}

impl HitMap {
    pub fn button_at(&self, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.buttons.iter().position(|r| r.contains(pos))
    }

    /// `(offset, width)` of a click inside the progress bar.
    pub fn progress_offset(&self, column: u16, row: u16) -> Option<(u16, u16)> {
        self.progress
            .contains(Position::new(column, row))
            .then(|| (column - self.progress.x, self.progress.width))
    }
}

fn controls_text(seek_step_percent: f64) -> String {
    [
        "[tab] focus".to_string(),
        "[enter/space] play/pause".to_string(),
        format!("[←/→] seek -/+{seek_step_percent}%"),
        "[home/end] start/end".to_string(),
        "[click] select/seek".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn block<'a>(title: &'a str, theme: &Theme, focused: bool) -> Block<'a> {
    let border = if focused {
        Style::default()
            .fg(theme.text_primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent_secondary)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type())
        .border_style(border)
        .title(title)
}

/// Render the widget into `frame` and report where its controls landed.
pub fn draw(
    frame: &mut Frame,
    handles: &WidgetHandles,
    theme: &Theme,
    focus: Focus,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> HitMap {
    let footer_height = if ui_settings.show_controls { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(footer_height),
        ])
        .split(frame.area());

    let title = if handles.container.playing {
        " musik ▶ "
    } else {
        " musik "
    };
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(block(title, theme, false).title_alignment(Alignment::Center));
    frame.render_widget(header, chunks[0]);

    let progress = draw_progress(frame, handles, theme, focus == Focus::Progress, chunks[1]);

    let narrow = frame.area().width < ui_settings.narrow_width;
    let body = if narrow {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(META_HEIGHT), Constraint::Min(1)])
            .split(chunks[2])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(META_WIDTH), Constraint::Min(1)])
            .split(chunks[2])
    };

    draw_meta(frame, handles, theme, body[0]);
    let focused_button = match focus {
        Focus::Button(i) => Some(i),
        Focus::Progress => None,
    };
    let buttons = draw_playlist(frame, &handles.buttons, theme, focused_button, body[1]);

    if ui_settings.show_controls {
        let footer = Paragraph::new(controls_text(controls_settings.seek_step_percent))
            .block(block(" controls ", theme, false).padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }))
            .wrap(Wrap { trim: true });
        frame.render_widget(footer, chunks[3]);
    }

    HitMap { progress, buttons }
}

fn draw_progress(
    frame: &mut Frame,
    handles: &WidgetHandles,
    theme: &Theme,
    focused: bool,
    area: Rect,
) -> Rect {
    let block = block(" progress ", theme, focused);
    let inner = block.inner(area);

    let ratio = (handles.fill_bar.width_percent / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(
            Style::default()
                .fg(theme.accent_primary)
                .bg(theme.accent_secondary),
        )
        .ratio(ratio)
        .label(Span::styled(
            format!(
                "{} ({}%)",
                handles.progress.value_text, handles.progress.value_now
            ),
            Style::default().fg(theme.text_primary),
        ))
        .use_unicode(true);
    frame.render_widget(gauge, area);
    inner
}

fn draw_meta(frame: &mut Frame, handles: &WidgetHandles, theme: &Theme, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            format!("♪ {}", handles.artwork.label),
            Style::default().fg(theme.accent_primary),
        )),
        Line::from(Span::styled(
            handles.artwork.src.as_str(),
            Style::default()
                .fg(theme.accent_secondary)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(handles.title.text.as_str(), theme.title())),
        Line::from(Span::styled(handles.artist.text.as_str(), theme.artist())),
    ];
    let meta = Paragraph::new(lines).block(block(" now playing ", theme, false).padding(Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }));
    frame.render_widget(meta, area);
}

fn draw_playlist(
    frame: &mut Frame,
    buttons: &[TrackButton],
    theme: &Theme,
    focused: Option<usize>,
    area: Rect,
) -> Vec<Rect> {
    // The focused button announces its accessible label.
    let title = match focused.and_then(|i| buttons.get(i)) {
        Some(button) => format!(" {} ", button.label),
        None => " playlist ".to_string(),
    };
    let block = block(&title, theme, focused.is_some());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Keep the focused row, else the active one, in view.
    let height = inner.height as usize;
    let anchor = focused
        .or_else(|| buttons.iter().position(|b| b.active))
        .unwrap_or(0);
    let start = if height > 0 && anchor >= height {
        anchor + 1 - height
    } else {
        0
    };

    let mut rects = vec![Rect::default(); buttons.len()];
    for (row, (i, button)) in buttons
        .iter()
        .enumerate()
        .skip(start)
        .take(height)
        .enumerate()
    {
        let rect = Rect {
            x: inner.x,
            y: inner.y + row as u16,
            width: inner.width,
            height: 1,
        };
        frame.render_widget(track_row(button, theme, focused == Some(i), rect.width), rect);
        rects[i] = rect;
    }
    rects
}

fn track_row<'a>(
    button: &'a TrackButton,
    theme: &Theme,
    focused: bool,
    width: u16,
) -> Paragraph<'a> {
    let icon = if button.playing { "⏸ " } else { "▶ " };
    let icon_color = if button.active {
        theme.accent_primary
    } else {
        theme.accent_secondary
    };
    let marker = if focused { "›" } else { " " };

    let mut title_style = theme.primary();
    if focused {
        title_style = title_style.add_modifier(Modifier::UNDERLINED);
    }

    let used = 3 + button.title.chars().count() + 1 + button.duration.chars().count();
    let gap = (width as usize).saturating_sub(used).max(1);

    let line = Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.text_primary)),
        Span::styled(icon, Style::default().fg(icon_color)),
        Span::styled(button.title.as_str(), title_style),
        Span::raw(" ".repeat(gap)),
        Span::styled(button.duration.as_str(), theme.primary()),
    ]);

    let mut row_style = Style::default();
    if button.active {
        row_style = row_style.bg(theme.accent_tertiary);
    }
    Paragraph::new(line).style(row_style)
}
