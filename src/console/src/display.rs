//! Display buffer manager.

use edgeos_common::{Color, ScreenCell, TEXT_CELLS, TEXT_HEIGHT, TEXT_WIDTH};
use edgeos_hal::TextSurface;

/// One full screen of cells.
pub type Page = [ScreenCell; TEXT_CELLS];

/// Owns a text surface and guards every access to it.
pub struct DisplayBuffer<S> {
    surface: S,
}

impl<S: TextSurface> DisplayBuffer<S> {
    /// Wraps a surface.
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    /// Stores `character` with the given colors at `index`.
    ///
    /// Indexes outside the screen are ignored.
    pub fn write_cell(
        &mut self,
        index: usize,
        character: u8,
        foreground: Color,
        background: Color,
    ) {
        self.write(index, ScreenCell::new(character, foreground, background));
    }

    /// Stores a packed cell at `index`; out-of-range indexes are ignored.
    pub fn write(&mut self, index: usize, cell: ScreenCell) {
        if index < TEXT_CELLS {
            self.surface.write_cell(index, cell);
        }
    }

    /// Reads the cell at `index`, or a blank cell when out of range.
    pub fn read(&self, index: usize) -> ScreenCell {
        if index < TEXT_CELLS {
            self.surface.read_cell(index)
        } else {
            ScreenCell::BLANK
        }
    }

    /// Fills every cell with `cell`.
    pub fn fill(&mut self, cell: ScreenCell) {
        for index in 0..TEXT_CELLS {
            self.surface.write_cell(index, cell);
        }
    }

    /// Copies every row into the row above it. The last row is left as is.
    pub fn shift_up(&mut self) {
        for index in 0..(TEXT_HEIGHT - 1) * TEXT_WIDTH {
            let cell = self.surface.read_cell(index + TEXT_WIDTH);
            self.surface.write_cell(index, cell);
        }
    }

    /// Fills one row with `cell`.
    pub fn clear_row(&mut self, row: usize, cell: ScreenCell) {
        debug_assert!(row < TEXT_HEIGHT, "row index out of bounds");

        let start = row * TEXT_WIDTH;
        for index in start..start + TEXT_WIDTH {
            self.write(index, cell);
        }
    }

    /// Copies the live screen into `page`.
    pub fn snapshot(&self, page: &mut Page) {
        for (index, cell) in page.iter_mut().enumerate() {
            *cell = self.surface.read_cell(index);
        }
    }

    /// Copies `page` onto the live screen.
    pub fn restore(&mut self, page: &Page) {
        for (index, cell) in page.iter().enumerate() {
            self.surface.write_cell(index, *cell);
        }
    }

    /// Moves the hardware cursor.
    pub fn move_cursor(&mut self, x: usize, y: usize) {
        self.surface.move_cursor(x, y);
    }

    /// The underlying surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The underlying surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
