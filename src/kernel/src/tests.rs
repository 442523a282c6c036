//! Kernel-level self-tests, run once at boot.
//!
//! They run the console stack against an off-screen surface so the real
//! screen is untouched, and report over serial.

use crate::serial_println;
use alloc::boxed::Box;
use alloc::vec::Vec;
use edgeos_common::{Color, TEXT_HEIGHT};
use edgeos_console::{
    Console, Decoder, KeyEvent, KeyScript, Mailbox, MemorySurface, ScrollDirection, KEY_UP,
};
use edgeos_shell::{Fat12, FileSystem};

/// Runs all kernel tests.
pub fn run_all() {
    serial_println!("Running kernel tests...");

    test_allocation();
    test_console_scrollback();
    test_formatter();
    test_line_editing();
    test_decoder();
    test_mailbox();
    test_fat12();

    serial_println!("All kernel tests passed!");
}

fn console() -> Console<MemorySurface> {
    Console::new(MemorySurface::new(), Color::White, Color::Black)
}

fn test_allocation() {
    serial_println!("test_allocation... ");
    let x = Box::new(42);
    assert_eq!(*x, 42);

    let mut v = Vec::new();
    for i in 0..100 {
        v.push(i);
    }
    assert_eq!(v.len(), 100);
    assert_eq!(v[50], 50);

    // The volume and a console's page ring fit side by side.
    let console = console();
    let fs = Fat12::new();
    assert_eq!(console.current_page(), 0);
    assert!(fs.list().is_empty());
    serial_println!("[ok]");
}

fn test_console_scrollback() {
    serial_println!("test_console_scrollback... ");
    let mut console = console();
    console.put_string("first");
    for _ in 0..TEXT_HEIGHT {
        console.put_char(b'\n');
    }
    assert_eq!(console.cursor_y(), TEXT_HEIGHT - 1);
    assert_eq!(console.current_page(), 0);

    console.scroll(ScrollDirection::Up);
    assert_eq!(console.surface().row_text(0), "first");
    serial_println!("[ok]");
}

fn test_formatter() {
    serial_println!("test_formatter... ");
    let mut console = console();
    edgeos_console::console_printf!(console, "%s=%03d %x", "n", 7, 255);
    assert_eq!(console.surface().row_text(0), "n=007 ff");
    serial_println!("[ok]");
}

fn test_line_editing() {
    serial_println!("test_line_editing... ");
    let mut console = console();
    let mut keys = KeyScript::new(b"ab\x08c\n");
    let mut buffer = [0u8; 16];
    let len = console.read_line(&mut keys, &mut buffer);
    assert_eq!(&buffer[..len], b"ac");
    assert_eq!(buffer[len], 0);
    serial_println!("[ok]");
}

fn test_decoder() {
    serial_println!("test_decoder... ");
    let mut decoder = Decoder::new();
    assert_eq!(decoder.decode(0x1E).char(), Some(b'a'));
    decoder.decode(0x2A);
    assert_eq!(decoder.decode(0x1E).char(), Some(b'A'));
    assert_eq!(decoder.decode(0x48).char(), Some(KEY_UP));
    serial_println!("[ok]");
}

fn test_mailbox() {
    serial_println!("test_mailbox... ");
    let mailbox = Mailbox::new();
    mailbox.post(KeyEvent::new(b'x', 0x2D));
    mailbox.post(KeyEvent::new(b'y', 0x15));
    assert_eq!(mailbox.try_get_char(), Some(b'y'));
    assert!(mailbox.is_empty());
    serial_println!("[ok]");
}

fn test_fat12() {
    serial_println!("test_fat12... ");
    let mut fs = Fat12::new();
    fs.create("boot.txt", b"EdgeOS").expect("create failed");

    let mut content = Vec::new();
    fs.read("boot.txt", &mut content).expect("read failed");
    assert_eq!(content, b"EdgeOS");

    fs.remove("boot.txt").expect("remove failed");
    assert!(fs.list().is_empty());
    serial_println!("[ok]");
}
