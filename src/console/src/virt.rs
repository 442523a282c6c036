//! Memory-backed stand-ins for the display and the keyboard.

use alloc::string::String;

use edgeos_common::{ScreenCell, TEXT_CELLS, TEXT_WIDTH};
use edgeos_hal::{KeySource, TextSurface};

/// A text surface held in ordinary memory.
#[derive(Clone)]
pub struct MemorySurface {
    cells: [ScreenCell; TEXT_CELLS],
    cursor: (usize, usize),
}

impl MemorySurface {
    /// A surface of blank cells with the cursor at the origin.
    pub fn new() -> Self {
        Self {
            cells: [ScreenCell::BLANK; TEXT_CELLS],
            cursor: (0, 0),
        }
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[ScreenCell] {
        &self.cells
    }

    /// One cell.
    pub fn cell(&self, index: usize) -> ScreenCell {
        self.cells[index]
    }

    /// Last position given to [`TextSurface::move_cursor`].
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// The glyphs of one row with null cells shown as spaces and trailing
    /// spaces removed.
    pub fn row_text(&self, row: usize) -> String {
        let start = row * TEXT_WIDTH;
        let mut text: String = self.cells[start..start + TEXT_WIDTH]
            .iter()
            .map(|cell| match cell.character() {
                0 => ' ',
                ch => ch as char,
            })
            .collect();
        text.truncate(text.trim_end().len());
        text
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSurface for MemorySurface {
    fn write_cell(&mut self, index: usize, cell: ScreenCell) {
        self.cells[index] = cell;
    }

    fn read_cell(&self, index: usize) -> ScreenCell {
        self.cells[index]
    }

    fn move_cursor(&mut self, x: usize, y: usize) {
        self.cursor = (x, y);
    }
}

/// Replays a fixed byte sequence as keyboard input.
///
/// Null bytes are skipped. Once the script is used up every read returns
/// `'\n'`, so a line reader always terminates.
pub struct KeyScript<'a> {
    keys: &'a [u8],
    position: usize,
}

impl<'a> KeyScript<'a> {
    /// A script over `keys`.
    pub fn new(keys: &'a [u8]) -> Self {
        Self { keys, position: 0 }
    }

    /// Bytes not read yet.
    pub fn remaining(&self) -> usize {
        self.keys.len() - self.position
    }

    fn next_key(&mut self) -> u8 {
        while let Some(&key) = self.keys.get(self.position) {
            self.position += 1;
            if key != 0 {
                return key;
            }
        }
        b'\n'
    }
}

impl KeySource for KeyScript<'_> {
    fn get_char(&mut self) -> u8 {
        self.next_key()
    }

    fn get_scancode(&mut self) -> u8 {
        self.next_key()
    }
}
