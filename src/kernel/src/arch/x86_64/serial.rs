//! COM1 serial output.
//!
//! Carries the `log` records from boot on and the self-test report; the
//! VGA console belongs to the shell once it starts.

use core::fmt::{self, Write};
use spin::Mutex;
use uart_16550::SerialPort;
use x86_64::instructions::interrupts;

/// COM1 I/O port address.
const COM1_PORT: u16 = 0x3F8;

/// COM1, programmed on first use.
pub static SERIAL: spin::Once<Mutex<SerialPort>> = spin::Once::new();

/// Programs COM1 if that has not happened yet, and returns it.
pub fn init() -> &'static Mutex<SerialPort> {
    SERIAL.call_once(|| {
        // SAFETY: 0x3F8 is COM1 on every PC the kernel boots on, and ring 0
        // has port access.
        let mut serial = unsafe { SerialPort::new(COM1_PORT) };
        serial.init();
        Mutex::new(serial)
    })
}

/// Prints to the serial port without a newline.
#[macro_export]
macro_rules! serial_print {
    ($($arg:tt)*) => {
        $crate::arch::x86_64::serial::_print(format_args!($($arg)*))
    };
}

/// Prints to the serial port with a newline.
#[macro_export]
macro_rules! serial_println {
    () => ($crate::serial_print!("\n"));
    ($($arg:tt)*) => ($crate::serial_print!("{}\n", format_args!($($arg)*)))
}

/// Internal print function used by macros.
///
/// Interrupts stay masked while the port is locked.
#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    let serial = init();
    interrupts::without_interrupts(|| {
        // A lost log line is not worth a panic that would log again.
        let _ = serial.lock().write_fmt(args);
    });
}
