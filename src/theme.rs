//! Theme configuration and colors.
//!
//! Palettes come from the `ratatui-themes` crate; the composer derives a
//! handful of styles from them for the draft area, gauge and feedback line.

use ratatui::style::{Color, Modifier, Style};
use ratatui_themes::{ThemeName, ThemePalette};
use serde::{Deserialize, Serialize};

/// Theme wrapper around `ThemeName` from ratatui-themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(pub ThemeName);

impl Theme {
    /// Get the next theme in rotation
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0.next())
    }

    /// Get the display name for the theme.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0.display_name()
    }

    /// Get the color palette for this theme
    #[must_use]
    pub fn colors(&self) -> ThemeColors {
        ThemeColors::from_palette(self.0.palette())
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Colors the composer draws with.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Window background
    pub bg: Color,
    /// Title and status bar background
    pub bg_bar: Color,
    /// Gauge trough
    pub trough: Color,
    /// Draft text
    pub fg: Color,
    /// Hints and placeholder text
    pub fg_muted: Color,
    /// Focused border and gauge fill
    pub accent: Color,
    /// "Post successfully sent!"
    pub success: Color,
    /// Gauge fill when close to the limit
    pub warning: Color,
    /// "Post failed to send!" and the close hint
    pub error: Color,
}

impl ThemeColors {
    /// Create `ThemeColors` from a `ThemePalette`
    #[must_use]
    pub fn from_palette(p: ThemePalette) -> Self {
        Self {
            bg: p.bg,
            bg_bar: Self::adjust_brightness(p.bg, 10),
            trough: Self::adjust_brightness(p.bg, 25),
            fg: p.fg,
            fg_muted: p.muted,
            accent: p.accent,
            success: p.success,
            warning: p.warning,
            error: p.error,
        }
    }

    /// Lighten an RGB color; named colors are returned unchanged
    fn adjust_brightness(color: Color, amount: u8) -> Color {
        if let Color::Rgb(r, g, b) = color {
            Color::Rgb(
                r.saturating_add(amount),
                g.saturating_add(amount),
                b.saturating_add(amount),
            )
        } else {
            color
        }
    }

    #[must_use]
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    #[must_use]
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.fg_muted)
    }

    #[must_use]
    pub fn text_success(&self) -> Style {
        Style::default().fg(self.success).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text_error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Focused block border style
    #[must_use]
    pub fn block_focus(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Key hint style (for shortcuts)
    #[must_use]
    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Gauge style; turns to the warning color near the limit
    #[must_use]
    pub fn gauge(&self, near_limit: bool) -> Style {
        let fill = if near_limit { self.warning } else { self.accent };
        Style::default().fg(fill).bg(self.trough)
    }
}
