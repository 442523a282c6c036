//! Boot logging with colored status indicators.
//!
//! Provides Linux-style boot messages with colored status brackets. Every
//! line also goes to the serial log.

pub mod banner;

use edgeos_common::Color;
use edgeos_console::{console_printf, Console};
use edgeos_hal::TextSurface;

/// Boot status indicators.
#[derive(Debug, Clone, Copy)]
pub enum Status {
    /// Success - `[ OK ]` in green
    Ok,
    /// Failure - `[FAIL]` in red
    Fail,
    /// Warning - `[WARN]` in yellow
    Warn,
    /// Informational - `[INFO]` in cyan
    Info,
}

/// Log a boot stage with status.
///
/// Format: `[ OK ] Message text`
pub fn log<S: TextSurface>(console: &mut Console<S>, status: Status, message: &str) {
    print_status(console, status);
    console_printf!(console, " %s\n", message);
    match status {
        Status::Fail => log::error!("{}", message),
        Status::Warn => log::warn!("{}", message),
        Status::Ok | Status::Info => log::info!("{}", message),
    }
}

/// Log an indented detail line (for sub-items).
///
/// Format: `       Detail text` (aligned with message after status)
pub fn log_detail<S: TextSurface>(console: &mut Console<S>, message: &str) {
    console_printf!(console, "       %s\n", message);
}

fn print_status<S: TextSurface>(console: &mut Console<S>, status: Status) {
    let (text, color) = match status {
        Status::Ok => ("[ OK ]", Color::LightGreen),
        Status::Fail => ("[FAIL]", Color::LightRed),
        Status::Warn => ("[WARN]", Color::Yellow),
        Status::Info => ("[INFO]", Color::LightCyan),
    };
    console.format_write_color(color, text, &[]);
}
