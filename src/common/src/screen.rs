//! Text-mode screen geometry and cell encoding.

/// Number of columns in text mode.
pub const TEXT_WIDTH: usize = 80;

/// Number of rows in text mode.
pub const TEXT_HEIGHT: usize = 25;

/// Number of cells on one screen.
pub const TEXT_CELLS: usize = TEXT_WIDTH * TEXT_HEIGHT;

/// VGA color codes.
///
/// Standard 16-color VGA palette for text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Color {
    /// Black color.
    Black = 0,
    /// Blue color.
    Blue = 1,
    /// Green color.
    Green = 2,
    /// Cyan color.
    Cyan = 3,
    /// Red color.
    Red = 4,
    /// Magenta color.
    Magenta = 5,
    /// Brown color.
    Brown = 6,
    /// Light gray color.
    LightGray = 7,
    /// Dark gray color.
    DarkGray = 8,
    /// Light blue color.
    LightBlue = 9,
    /// Light green color.
    LightGreen = 10,
    /// Light cyan color.
    LightCyan = 11,
    /// Light red color.
    LightRed = 12,
    /// Pink color.
    Pink = 13,
    /// Yellow color.
    Yellow = 14,
    /// White color.
    White = 15,
}

impl Color {
    /// Maps the low nibble of `value` back to a palette entry.
    pub const fn from_nibble(value: u8) -> Color {
        match value & 0x0f {
            0 => Color::Black,
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Cyan,
            4 => Color::Red,
            5 => Color::Magenta,
            6 => Color::Brown,
            7 => Color::LightGray,
            8 => Color::DarkGray,
            9 => Color::LightBlue,
            10 => Color::LightGreen,
            11 => Color::LightCyan,
            12 => Color::LightRed,
            13 => Color::Pink,
            14 => Color::Yellow,
            _ => Color::White,
        }
    }
}

/// One character position on screen.
///
/// Packed the way the VGA text buffer stores it: the glyph in the low byte,
/// `background << 4 | foreground` in the high byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct ScreenCell(u16);

impl ScreenCell {
    /// Null glyph, black on black.
    pub const BLANK: ScreenCell = ScreenCell(0);

    /// Packs a glyph and its colors.
    pub const fn new(character: u8, foreground: Color, background: Color) -> ScreenCell {
        let attribute = ((background as u8) << 4) | (foreground as u8);
        ScreenCell(((attribute as u16) << 8) | character as u16)
    }

    /// Wraps a raw 16-bit cell value.
    pub const fn from_raw(raw: u16) -> ScreenCell {
        ScreenCell(raw)
    }

    /// Returns the raw 16-bit cell value.
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// The glyph code.
    pub const fn character(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// The foreground color.
    pub const fn foreground(self) -> Color {
        Color::from_nibble((self.0 >> 8) as u8)
    }

    /// The background color.
    pub const fn background(self) -> Color {
        Color::from_nibble((self.0 >> 12) as u8)
    }
}
