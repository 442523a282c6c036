//! VGA text mode driver for x86_64.
//!
//! Exposes the text buffer at 0xB8000 and the CRT controller cursor as a
//! [`TextSurface`] for the console.

use core::fmt;
use core::ptr;

use edgeos_common::{Color, ScreenCell, TEXT_CELLS, TEXT_HEIGHT, TEXT_WIDTH};
use edgeos_hal::TextSurface;
use x86_64::instructions::port::Port;

/// VGA text buffer memory-mapped I/O address.
const VGA_BUFFER_ADDR: usize = 0xB8000;

/// CRT controller index register.
const CRTC_INDEX: u16 = 0x3D4;

/// CRT controller data register.
const CRTC_DATA: u16 = 0x3D5;

/// CRTC registers holding the cursor location.
const CURSOR_LOCATION_HIGH: u8 = 0x0E;
const CURSOR_LOCATION_LOW: u8 = 0x0F;

/// The VGA text buffer and hardware cursor.
pub struct VgaSurface {
    /// SAFETY: valid for `TEXT_CELLS` cells for the lifetime of the kernel.
    /// The VGA buffer at 0xB8000 is always mapped in x86 protected/long mode
    /// under the bootloader's page tables.
    buffer: *mut u16,
    crtc_index: Port<u8>,
    crtc_data: Port<u8>,
}

// SAFETY: VgaSurface only accesses the VGA buffer through volatile operations.
// The buffer is memory-mapped hardware that exists for the kernel's lifetime.
unsafe impl Send for VgaSurface {}

impl VgaSurface {
    /// Creates a surface over the VGA text buffer.
    ///
    /// # Safety
    ///
    /// The caller must not let two surfaces write at the same time; the
    /// console owning this surface is the only writer outside of a panic.
    pub unsafe fn new() -> Self {
        Self {
            buffer: VGA_BUFFER_ADDR as *mut u16,
            crtc_index: Port::new(CRTC_INDEX),
            crtc_data: Port::new(CRTC_DATA),
        }
    }
}

impl TextSurface for VgaSurface {
    fn write_cell(&mut self, index: usize, cell: ScreenCell) {
        if index >= TEXT_CELLS {
            return;
        }
        // SAFETY: index < TEXT_CELLS keeps the write inside the buffer.
        // Volatile because the VGA buffer is memory-mapped I/O.
        unsafe {
            ptr::write_volatile(self.buffer.add(index), cell.raw());
        }
    }

    fn read_cell(&self, index: usize) -> ScreenCell {
        if index >= TEXT_CELLS {
            return ScreenCell::BLANK;
        }
        // SAFETY: as in `write_cell`.
        ScreenCell::from_raw(unsafe { ptr::read_volatile(self.buffer.add(index)) })
    }

    fn move_cursor(&mut self, x: usize, y: usize) {
        let position = (y * TEXT_WIDTH + x) as u16;
        // SAFETY: 0x3D4/0x3D5 are the color CRTC ports; writing the cursor
        // location registers has no other effect.
        unsafe {
            self.crtc_index.write(CURSOR_LOCATION_LOW);
            self.crtc_data.write((position & 0xFF) as u8);
            self.crtc_index.write(CURSOR_LOCATION_HIGH);
            self.crtc_data.write((position >> 8) as u8);
        }
    }
}

/// Writes straight to the VGA buffer without a console.
///
/// Used by the panic handler, which cannot rely on the heap or on the
/// console owned by the interrupted code.
pub struct PanicWriter {
    surface: VgaSurface,
    index: usize,
}

impl PanicWriter {
    /// Starts writing at the top-left cell.
    ///
    /// # Safety
    ///
    /// Only sound once nothing else will write to the screen, i.e. from the
    /// panic handler.
    pub unsafe fn new() -> Self {
        Self {
            surface: VgaSurface::new(),
            index: 0,
        }
    }
}

impl fmt::Write for PanicWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if self.index >= TEXT_CELLS {
                break;
            }
            match byte {
                b'\n' => self.index = (self.index / TEXT_WIDTH + 1) * TEXT_WIDTH,
                0x20..=0x7e => {
                    let cell = ScreenCell::new(byte, Color::White, Color::Red);
                    self.surface.write_cell(self.index, cell);
                    self.index += 1;
                }
                _ => {}
            }
        }
        self.surface.move_cursor(
            self.index % TEXT_WIDTH,
            (self.index / TEXT_WIDTH).min(TEXT_HEIGHT - 1),
        );
        Ok(())
    }
}
