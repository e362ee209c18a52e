use crate::playlist::PlaylistConfig;

use super::handles::{TrackButton, WidgetHandles};
use super::theme::Theme;

/// The constructed widget: handles for the player, theme for the renderer.
#[derive(Debug, Clone)]
pub struct BuiltWidget {
    pub handles: WidgetHandles,
    pub theme: Theme,
}

/// Build the handle bundle for `config`.
///
/// One button per track, the metadata panel showing track 0, and button 0
/// marked active.
pub fn build(config: &PlaylistConfig) -> BuiltWidget {
    let buttons = config
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, track)| TrackButton {
            label: format!("Play {} by {}", track.title, track.artist),
            title: track.title.clone(),
            duration: track.display_duration.clone(),
            active: i == 0,
            playing: false,
        })
        .collect();

    let mut handles = WidgetHandles {
        buttons,
        ..WidgetHandles::default()
    };
    if let Some(first) = config.tracks().first() {
        handles.show_track(first);
    }

    let theme = Theme::from_options(config.options());
    tracing::debug!(buttons = handles.buttons.len(), "widget built");

    BuiltWidget { handles, theme }
}
