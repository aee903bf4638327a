//! Palette, colors with inherit channels, and border bevels.

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// The fixed 16-color terminal palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Palette {
    Black,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    Purple,
    Aqua,
    Gray,
    DarkGray,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Palette {
    /// All palette entries in index order.
    pub const ALL: [Palette; 16] = [
        Palette::Black,
        Palette::DarkRed,
        Palette::DarkGreen,
        Palette::DarkYellow,
        Palette::DarkBlue,
        Palette::Purple,
        Palette::Aqua,
        Palette::Gray,
        Palette::DarkGray,
        Palette::Red,
        Palette::Green,
        Palette::Yellow,
        Palette::Blue,
        Palette::Magenta,
        Palette::Cyan,
        Palette::White,
    ];

    /// Palette index, 0..16.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Entry at `index`, if it is in range.
    pub fn from_index(index: u8) -> Option<Palette> {
        Self::ALL.get(index as usize).copied()
    }

    /// Entry for an ANSI color offset `0..=7` (the last digit of `3x`/`4x` codes).
    pub fn ansi(offset: u8) -> Option<Palette> {
        if offset < 8 {
            Self::from_index(offset)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A foreground/background pair. A `None` channel inherits from the
/// enclosing window, menu or root. A `None` channel that survives resolution
/// all the way up means the terminal's default color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub fg: Option<Palette>,
    pub bg: Option<Palette>,
}

impl Color {
    /// Both channels inherited.
    pub const INHERIT: Color = Color { fg: None, bg: None };

    /// A fully concrete color.
    pub const fn new(fg: Palette, bg: Palette) -> Self {
        Self { fg: Some(fg), bg: Some(bg) }
    }

    /// Only the foreground set.
    pub const fn fg(fg: Palette) -> Self {
        Self { fg: Some(fg), bg: None }
    }

    /// Only the background set.
    pub const fn bg(bg: Palette) -> Self {
        Self { fg: None, bg: Some(bg) }
    }

    /// Whether both channels are set.
    pub const fn is_concrete(self) -> bool {
        self.fg.is_some() && self.bg.is_some()
    }

    /// Fill each inherited channel from `base`.
    ///
    /// `base` must already be resolved; a concrete color is returned as-is.
    pub fn inherit_from(self, base: Color) -> Color {
        Color {
            fg: self.fg.or(base.fg),
            bg: self.bg.or(base.bg),
        }
    }
}

// ---------------------------------------------------------------------------
// Border
// ---------------------------------------------------------------------------

/// Bevel style of a container border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Depth {
    /// All four edges in the border color.
    #[default]
    None,
    /// Top/left edges dark, bottom/right edges light.
    Low,
    /// Top/left edges light, bottom/right edges dark.
    High,
}

/// A container border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Border {
    pub active: bool,
    pub depth: Depth,
    pub color: Color,
}

impl Border {
    /// An active border with the given bevel.
    pub const fn new(depth: Depth) -> Self {
        Self { active: true, depth, color: Color::INHERIT }
    }

    /// Set the border color (builder).
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Colors for the top/left and bottom/right edges, given the owning
    /// window's resolved color.
    pub fn bevel(self, resolved: Color) -> (Color, Color) {
        let base = self.color.inherit_from(resolved);
        match self.depth {
            Depth::None => (base, base),
            Depth::Low => (
                Color { fg: Some(Palette::Black), ..base },
                Color { fg: Some(Palette::White), ..base },
            ),
            Depth::High => (
                Color { fg: Some(Palette::White), ..base },
                Color { fg: Some(Palette::Black), ..base },
            ),
        }
    }
}
