//! Medical-themed color palette and styles.
//!
//! Colors chosen for:
//! - Professional healthcare appearance
//! - High contrast for accessibility
//! - One accent per disease form

use ratatui::style::{Color, Modifier, Style};

use crate::application::Tone;
use crate::ports::NotificationLevel;

/// Medical theme color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    // === Primary Colors ===

    /// Deep teal - Primary color (trust, medical)
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136); // #0D9488

    /// Lighter teal for highlights
    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191); // #2DD4BF

    // === Secondary Colors ===

    /// Light slate for borders
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    /// Emerald - healthy / low risk
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981

    /// Amber - medium risk
    pub const WARNING: Color = Color::Rgb(251, 191, 36); // #FBBF24

    /// Rose - error / high risk
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    // === Background Colors ===

    /// Toast background
    pub const BG_SURFACE: Color = Color::Rgb(30, 41, 59); // #1E293B

    // === Text Colors ===

    /// Primary text (white)
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC

    /// Secondary text (gray)
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184); // #94A3B8

    /// Muted text
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B

    // === Preset Styles ===

    /// Style for titles
    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for subtitles
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Input cursor
    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for a semantic tone from the presenter.
    #[must_use]
    pub fn tone(tone: Tone) -> Style {
        match tone {
            Tone::Affirmative => Self::success(),
            Tone::Cautionary => Self::warning(),
            Tone::Danger => Self::danger(),
            Tone::Neutral => Self::text_secondary(),
        }
    }

    /// Disease accent color.
    #[must_use]
    pub fn accent((r, g, b): (u8, u8, u8)) -> Color {
        Color::Rgb(r, g, b)
    }

    /// Toast style per level.
    #[must_use]
    pub fn toast(level: NotificationLevel) -> Style {
        let fg = match level {
            NotificationLevel::Success => Self::SUCCESS,
            NotificationLevel::Error => Self::DANGER,
        };
        Style::default()
            .fg(fg)
            .bg(Self::BG_SURFACE)
            .add_modifier(Modifier::BOLD)
    }
}
