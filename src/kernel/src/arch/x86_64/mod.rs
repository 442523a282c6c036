//! x86_64 architecture support.
//!
//! Provides the VGA text surface, serial port, interrupt and PIC setup for
//! x86_64 platforms.

pub mod interrupts;
pub mod pic;
pub mod serial;
pub mod vga;

pub use serial::SERIAL;
pub use vga::VgaSurface;

/// Halts the CPU until the next interrupt.
///
/// Used in idle loops to reduce power consumption.
#[inline]
pub fn hlt() {
    x86_64::instructions::hlt();
}

/// Halts the CPU in an infinite loop.
///
/// Used after unrecoverable errors (panics).
pub fn halt_loop() -> ! {
    loop {
        hlt();
    }
}
