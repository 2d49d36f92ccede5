//! Birthday Themes
//!
//! The server names one of three visual themes per payload. Resolution is
//! a total function: exact lowercase identifiers map to their theme and
//! everything else (case variants, empty, garbage) falls back to Pelican.
//! That fallback is a documented default, not an error.

/// An RGB color.
///
/// The core stays UI-framework free; surfaces map this onto whatever
/// color type their renderer uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Construct from the `0xRRGGBB` form the palettes are written in
    #[must_use]
    pub const fn rgb(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }
}

/// The fixed color record for one theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Primary accent (buttons, banner)
    pub primary: Color,
    /// Secondary accent
    pub secondary: Color,
    /// Full-screen background
    pub background: Color,
    /// Body text
    pub text: Color,
    /// Card surfaces
    pub card: Color,
    /// Decorative accent
    pub accent: Color,
    /// Photo circle fill
    pub circle: Color,
    /// Photo circle border
    pub circle_border: Color,
}

const PELICAN_PALETTE: Palette = Palette {
    primary: Color::rgb(0x4A90E2),
    secondary: Color::rgb(0x7BB3F0),
    background: Color::rgb(0xB9E5EF),
    text: Color::rgb(0x2C3E50),
    card: Color::rgb(0xFFFFFF),
    accent: Color::rgb(0x87CEEB),
    circle: Color::rgb(0x87CEEB),
    circle_border: Color::rgb(0x4A90E2),
};

const FOX_PALETTE: Palette = Palette {
    primary: Color::rgb(0xFF6B35),
    secondary: Color::rgb(0xFF8C42),
    background: Color::rgb(0x6FC5AF),
    text: Color::rgb(0x8B4513),
    card: Color::rgb(0xFFFFFF),
    accent: Color::rgb(0xFFD700),
    circle: Color::rgb(0xFFC89E),
    circle_border: Color::rgb(0xFF6B35),
};

const ELEPHANT_PALETTE: Palette = Palette {
    primary: Color::rgb(0x9B59B6),
    secondary: Color::rgb(0xBB8FCE),
    background: Color::rgb(0x6FC5AF),
    text: Color::rgb(0xFEE7B7),
    card: Color::rgb(0xFFFFFF),
    accent: Color::rgb(0xE8C5E8),
    circle: Color::rgb(0xE8C5E8),
    circle_border: Color::rgb(0x9B59B6),
};

/// The closed set of visual themes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    /// Blue seaside look (the fallback)
    #[default]
    Pelican,
    /// Orange woodland look
    Fox,
    /// Purple look on the shared green background
    Elephant,
}

impl Theme {
    /// Resolve a theme identifier from the wire.
    ///
    /// Exact, case-sensitive match against "pelican", "fox" and
    /// "elephant"; anything else resolves to [`Theme::Pelican`].
    #[must_use]
    pub fn from_identifier(value: &str) -> Self {
        match value {
            "fox" => Self::Fox,
            "elephant" => Self::Elephant,
            _ => Self::Pelican,
        }
    }

    /// The canonical lowercase identifier for this theme
    #[must_use]
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Pelican => "pelican",
            Self::Fox => "fox",
            Self::Elephant => "elephant",
        }
    }

    /// The fixed color palette for this theme
    #[must_use]
    pub fn palette(&self) -> &'static Palette {
        match self {
            Self::Pelican => &PELICAN_PALETTE,
            Self::Fox => &FOX_PALETTE,
            Self::Elephant => &ELEPHANT_PALETTE,
        }
    }
}
