//! PS/2 keyboard input.
//!
//! IRQ 1 reads the controller, decodes the scancode and posts the result to
//! a single-slot [`Mailbox`] that the foreground loop polls.

use edgeos_console::{Decoder, Mailbox};
use spin::{Mutex, Once};
use x86_64::instructions::port::Port;

/// PS/2 controller data port.
const DATA_PORT: u16 = 0x60;

/// PS/2 controller status port.
const STATUS_PORT: u16 = 0x64;

/// Status bit set while the output buffer holds a byte.
const OUTPUT_FULL: u8 = 0x01;

/// The pending-key mailbox, created by [`init`].
pub static MAILBOX: Once<Mailbox> = Once::new();

/// Modifier state, only touched from the interrupt handler.
static DECODER: Mutex<Decoder> = Mutex::new(Decoder::new());

/// Creates the mailbox and returns it.
///
/// Needs the heap. Keys arriving before this are read and dropped.
pub fn init() -> &'static Mailbox {
    MAILBOX.call_once(Mailbox::new)
}

/// Called by the keyboard interrupt handler.
///
/// Reads one scancode if the controller has one and posts it with its
/// decoded character, releases and modifiers included. A key nobody has
/// read yet is overwritten.
pub fn handle_interrupt() {
    let mut status: Port<u8> = Port::new(STATUS_PORT);
    let mut data: Port<u8> = Port::new(DATA_PORT);

    // SAFETY: 0x60/0x64 are the PS/2 controller ports; reading them only
    // consumes the pending byte.
    let scancode = unsafe {
        if status.read() & OUTPUT_FULL == 0 {
            return;
        }
        data.read()
    };

    let mut decoder = DECODER.lock();
    match MAILBOX.get() {
        Some(mailbox) => mailbox.deliver(&mut decoder, scancode),
        None => {
            decoder.decode(scancode);
        }
    }
}
