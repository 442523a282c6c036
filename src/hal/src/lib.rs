//! EdgeOS Hardware Abstraction Layer (HAL) traits.
//!
//! This crate defines the seams between the console core and the devices
//! it drives, so the core can run against memory-backed stand-ins.

#![cfg_attr(not(test), no_std)]

use edgeos_common::ScreenCell;

/// A character-cell display with a hardware cursor.
///
/// Indexes are linear, row-major, in `0..TEXT_CELLS`.
pub trait TextSurface {
    /// Stores a cell. Writes take effect immediately.
    fn write_cell(&mut self, index: usize, cell: ScreenCell);
    /// Reads back a cell.
    fn read_cell(&self, index: usize) -> ScreenCell;
    /// Moves the blinking hardware cursor to column `x`, row `y`.
    fn move_cursor(&mut self, x: usize, y: usize);
}

/// A blocking source of decoded keyboard characters.
pub trait KeySource {
    /// Waits for the next non-null character.
    fn get_char(&mut self) -> u8;
    /// Waits for the next non-null raw scancode.
    fn get_scancode(&mut self) -> u8;
}
