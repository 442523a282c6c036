//! Boot banner and branding.

use edgeos_common::Color;
use edgeos_console::{console_printf, Console};
use edgeos_hal::TextSurface;
use edgeos_shell::VERSION;

/// Print the EdgeOS boot banner.
pub fn print_banner<S: TextSurface>(console: &mut Console<S>) {
    const ART: [&str; 5] = [
        "  _____    _             ___  ____  ",
        " | ____|__| | __ _  ___ / _ \\/ ___| ",
        " |  _| / _` |/ _` |/ _ \\ | | \\___ \\ ",
        " | |__| (_| | (_| |  __/ |_| |___) |",
        " |_____\\__,_|\\__, |\\___|\\___/|____/ ",
    ];

    for line in ART {
        console.format_write_color(Color::Cyan, line, &[]);
        console.put_char(b'\n');
    }
    console.format_write_color(Color::Cyan, "             |___/\n", &[]);
    console_printf!(console, "\n EdgeOS v%s\n\n", VERSION);
}
