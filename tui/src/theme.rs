//! Palette mapping
//!
//! The core palettes are plain RGB records; this maps them onto ratatui
//! colors, plus the couple of colors the connection screen uses before a
//! theme exists.

use birthday_core::ConnectionStatus;
use ratatui::style::Color;

/// Convert a core palette color into a ratatui color
#[must_use]
pub fn palette_color(color: birthday_core::Color) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Accent color for the connection screen card
pub const ENTRY_ACCENT: Color = Color::Rgb(0x4A, 0x90, 0xE2);

/// Dim helper text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Status line color for a connection state
#[must_use]
pub fn status_color(status: ConnectionStatus) -> Color {
    match status {
        ConnectionStatus::Connecting => Color::Yellow,
        ConnectionStatus::Connected => Color::Green,
        ConnectionStatus::Disconnected => DIM_GRAY,
        ConnectionStatus::Failed => Color::Rgb(255, 80, 80),
    }
}
