//! EdgeOS text console.
//!
//! The console core of the kernel, free of any hardware access so it runs
//! against a real VGA buffer or a memory-backed stand-in alike.
//!
//! # Architecture
//!
//! - `display`: bounds-checked cell writes over a [`TextSurface`]
//! - `console`: cursor arithmetic, line wrap, newline scrolling and the
//!   scroll-back page ring
//! - `format`: the `%d`/`%u`/`%x`/`%s` formatter
//! - `line`: blocking line input with erase and history recall
//! - `history`: fixed-capacity command history ring
//! - `keyboard`: scancode decoding with shift/caps-lock latches
//! - `mailbox`: interrupt-to-foreground key handoff
//! - `virt`: memory-backed surface and scripted keys
//!
//! [`TextSurface`]: edgeos_hal::TextSurface

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod console;
pub mod display;
pub mod format;
pub mod history;
pub mod keyboard;
pub mod line;
pub mod mailbox;
pub mod virt;

pub use console::{Console, ScrollDirection, MAXIMUM_PAGES, TAB_WIDTH};
pub use display::DisplayBuffer;
pub use format::{itoa, Arg, Itoa, INT_BUFFER_LEN};
pub use history::{History, HISTORY_CAPACITY, LINE_CAPACITY};
pub use keyboard::{alternate_char, Decoded, Decoder, Scancode, KEY_DOWN, KEY_UP};
pub use mailbox::{KeyEvent, Mailbox};
pub use virt::{KeyScript, MemorySurface};

/// Writes a `%`-template through [`Console::format_write`].
///
/// Each argument is converted with [`Arg::from`].
///
/// ```ignore
/// console_printf!(console, "%s: %03d\n", "count", 7);
/// ```
#[macro_export]
macro_rules! console_printf {
    ($console:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $console.format_write($template, &[$($crate::Arg::from($arg)),*])
    };
}
