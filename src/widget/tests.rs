use super::*;
use crate::playlist::validate;
use ratatui::style::{Color, Modifier};
use ratatui::widgets::BorderType;
use serde_json::json;
use std::time::Duration;

fn config(options: serde_json::Value) -> crate::playlist::PlaylistConfig {
    validate(&json!({
        "options": options,
        "tracks": [
            { "artist": "Nina Simone", "title": "Sinnerman", "artwork": "a.jpg", "audio": "a.mp3", "duration": "10:21" },
            { "artist": "Can", "title": "Vitamin C", "artwork": "b.jpg", "audio": "b.mp3", "duration": "3:32" },
        ],
    }))
    .unwrap()
}

#[test]
fn build_creates_one_button_per_track() {
    let built = build(&config(json!(null)));
    let buttons = &built.handles.buttons;

    assert_eq!(buttons.len(), 2);
    assert_eq!(buttons[0].label, "Play Sinnerman by Nina Simone");
    assert_eq!(buttons[1].title, "Vitamin C");
    assert_eq!(buttons[1].duration, "3:32");
}

#[test]
fn build_shows_first_track_and_marks_it_active() {
    let handles = build(&config(json!(null))).handles;

    assert!(handles.buttons[0].active);
    assert!(!handles.buttons[1].active);
    assert!(handles.buttons.iter().all(|b| !b.playing));
    assert!(!handles.container.playing);
    assert_eq!(handles.artwork.src, "a.jpg");
    assert_eq!(handles.artwork.label, "Sinnerman by Nina Simone");
    assert_eq!(handles.title.text, "Sinnerman");
    assert_eq!(handles.artist.text, "Nina Simone");
    assert_eq!(handles.fill_bar.width_percent, 0.0);
    assert_eq!(handles.progress.value_text, "0:00");
}

#[test]
fn set_progress_clamps_and_formats_readouts() {
    let mut handles = build(&config(json!(null))).handles;

    handles.set_progress(33.4, Duration::from_secs(67), Duration::from_secs(200));
    assert_eq!(handles.fill_bar.width_percent, 33.4);
    assert_eq!(handles.progress.value_now, 33);
    assert_eq!(handles.progress.value_text, "1:07 / 3:20");

    handles.set_progress(140.0, Duration::from_secs(10), Duration::from_secs(10));
    assert_eq!(handles.fill_bar.width_percent, 100.0);
    assert_eq!(handles.progress.value_now, 100);

    handles.reset_progress();
    assert_eq!(handles.fill_bar.width_percent, 0.0);
    assert_eq!(handles.progress, ProgressRegion::default());
}

#[test]
fn clear_markers_resets_every_button_and_the_container() {
    let mut handles = build(&config(json!(null))).handles;
    handles.buttons[1].playing = true;
    handles.buttons[1].active = true;
    handles.container.playing = true;

    handles.clear_markers();
    assert!(handles.buttons.iter().all(|b| !b.active && !b.playing));
    assert!(!handles.container.playing);
}

#[test]
fn theme_defaults_match_stock_stylesheet() {
    let theme = build(&config(json!(null))).theme;
    assert_eq!(theme, Theme::default());
    assert_eq!(theme.text_primary, Color::White);
    assert_eq!(theme.accent_secondary, Color::Rgb(0x80, 0x80, 0x80));
    assert_eq!(theme.border_type(), BorderType::Plain);
    assert!(!theme.primary().add_modifier.contains(Modifier::BOLD));
}

#[test]
fn theme_applies_known_options() {
    let theme = build(&config(json!({
        "colors": {
            "textPrimary": "#ff0000",
            "textSecondary": "yellow",
            "accentPrimary": "#0f0",
            "accentSecondary": "#101010",
            "accentTertiary": "blue",
        },
        "fontWeight": { "primary": "700", "secondary": "bold", "tertiary": "400" },
        "radius": { "primary": "0.5em" },
    })))
    .theme;

    assert_eq!(theme.text_primary, Color::Rgb(0xff, 0, 0));
    assert_eq!(theme.text_secondary, Color::Yellow);
    assert_eq!(theme.accent_primary, Color::Rgb(0, 0xff, 0));
    assert_eq!(theme.accent_secondary, Color::Rgb(0x10, 0x10, 0x10));
    assert_eq!(theme.accent_tertiary, Color::Blue);
    assert!(theme.primary_bold);
    assert!(theme.secondary_bold);
    assert!(!theme.tertiary_bold);
    assert_eq!(theme.border_type(), BorderType::Rounded);
    assert!(theme.title().add_modifier.contains(Modifier::BOLD));
    assert!(!theme.artist().add_modifier.contains(Modifier::BOLD));
}

#[test]
fn theme_skips_empty_unknown_and_unparsable_values() {
    let theme = build(&config(json!({
        "colors": { "textPrimary": "", "accentPrimary": "not-a-colour", "glow": "#fff" },
        "spacing": { "gap": "2em" },
        "radius": { "primary": "0px" },
    })))
    .theme;

    assert_eq!(theme, Theme::default());
}

#[test]
fn style_value_parsers() {
    assert_eq!(parse_color("#abc"), Some(Color::Rgb(0xaa, 0xbb, 0xcc)));
    assert_eq!(parse_color(" #a0b0c0 "), Some(Color::Rgb(0xa0, 0xb0, 0xc0)));
    assert_eq!(parse_color("#zzz"), None);

    assert_eq!(parse_weight("600"), Some(true));
    assert_eq!(parse_weight("599"), Some(false));
    assert_eq!(parse_weight("Bold"), Some(true));
    assert_eq!(parse_weight("heavy"), None);

    assert_eq!(parse_radius("0"), Some(false));
    assert_eq!(parse_radius("12px"), Some(true));
    assert_eq!(parse_radius("var(--r)"), None);
}
