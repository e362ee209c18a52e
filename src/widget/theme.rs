//! Visual theme derived from the playlist's style options.
//!
//! The defaults mirror the stock stylesheet: white text and accents on a grey
//! track, regular weights and square corners. Only the known option keys are
//! applied; everything else is ignored.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use crate::playlist::StyleOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub text_primary: Color,
    pub text_secondary: Color,
    /// Fill bar and active icons.
    pub accent_primary: Color,
    /// Progress track and idle icons.
    pub accent_secondary: Color,
    /// Background of the active row.
    pub accent_tertiary: Color,
    /// Track list text.
    pub primary_bold: bool,
    /// Title in the metadata panel.
    pub secondary_bold: bool,
    /// Artist in the metadata panel.
    pub tertiary_bold: bool,
    pub rounded: bool,
}

const GREY: Color = Color::Rgb(0x80, 0x80, 0x80);

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::White,
            accent_primary: Color::White,
            accent_secondary: GREY,
            accent_tertiary: GREY,
            primary_bold: false,
            secondary_bold: false,
            tertiary_bold: false,
            rounded: false,
        }
    }
}

impl Theme {
    /// Resolve a theme from optional style overrides.
    pub fn from_options(options: Option<&StyleOptions>) -> Self {
        let mut theme = Self::default();
        let Some(options) = options else {
            return theme;
        };

        for (group, key, value) in options.iter() {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            let applied = match (group, key) {
                ("colors", "textPrimary") => apply(&mut theme.text_primary, parse_color(value)),
                ("colors", "textSecondary") => {
                    apply(&mut theme.text_secondary, parse_color(value))
                }
                ("colors", "accentPrimary") => {
                    apply(&mut theme.accent_primary, parse_color(value))
                }
                ("colors", "accentSecondary") => {
                    apply(&mut theme.accent_secondary, parse_color(value))
                }
                ("colors", "accentTertiary") => {
                    apply(&mut theme.accent_tertiary, parse_color(value))
                }
                ("fontWeight", "primary") => apply(&mut theme.primary_bold, parse_weight(value)),
                ("fontWeight", "secondary") => {
                    apply(&mut theme.secondary_bold, parse_weight(value))
                }
                ("fontWeight", "tertiary") => {
                    apply(&mut theme.tertiary_bold, parse_weight(value))
                }
                ("radius", "primary") => apply(&mut theme.rounded, parse_radius(value)),
                _ => {
                    tracing::debug!(group, key, "ignoring unknown style option");
                    continue;
                }
            };

            if !applied {
                tracing::warn!(group, key, value, "unusable style option value");
            }
        }

        theme
    }

    /// Track list text.
    pub fn primary(&self) -> Style {
        weighted(Style::default().fg(self.text_primary), self.primary_bold)
    }

    /// Title in the metadata panel.
    pub fn title(&self) -> Style {
        weighted(Style::default().fg(self.text_primary), self.secondary_bold)
    }

    /// Artist in the metadata panel.
    pub fn artist(&self) -> Style {
        weighted(Style::default().fg(self.text_secondary), self.tertiary_bold)
    }

    pub fn border_type(&self) -> BorderType {
        if self.rounded {
            BorderType::Rounded
        } else {
            BorderType::Plain
        }
    }
}

fn weighted(style: Style, bold: bool) -> Style {
    if bold {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

fn apply<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

/// Parse a CSS-ish colour: named colours, `#rrggbb` and `#rgb`.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() == 3 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            return format!("#{expanded}").parse().ok();
        }
    }
    value.parse().ok()
}

/// `true` when the weight renders bold (`bold`, `bolder`, or numeric >= 600).
pub fn parse_weight(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "bold" | "bolder" => Some(true),
        "normal" | "lighter" => Some(false),
        other => other.parse::<u16>().ok().map(|w| w >= 600),
    }
}

/// `true` when the radius is non-zero, whatever the unit.
pub fn parse_radius(value: &str) -> Option<bool> {
    let value = value.trim();
    let number_end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    value[..number_end].parse::<f64>().ok().map(|r| r > 0.0)
}
