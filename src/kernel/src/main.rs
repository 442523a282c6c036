//! EdgeOS Kernel Entry Point
//!
//! This is the main entry point for the EdgeOS kernel.

#![no_std]
#![no_main]

extern crate alloc;

use ::x86_64::VirtAddr;
use bootloader::{entry_point, BootInfo};
use core::fmt::Write;
use core::panic::PanicInfo;
use edgeos_common::Color;
use edgeos_console::Console;
use edgeos_kernel::arch::x86_64::{self, vga::PanicWriter, VgaSurface};
use edgeos_kernel::boot::{self, Status};
use edgeos_kernel::serial_println;
use edgeos_shell::Shell;

entry_point!(kernel_main);

/// Kernel entry point.
///
/// Called by the bootloader after setting up the initial environment.
fn kernel_main(boot_info: &'static BootInfo) -> ! {
    // ========================================================================
    // Phase 1: Core Initialization (serial log only)
    // ========================================================================
    edgeos_kernel::init();
    log::info!("EdgeOS booting");

    // Memory initialization
    let phys_mem_offset = VirtAddr::new(boot_info.physical_memory_offset);
    let mut mapper = unsafe { edgeos_kernel::memory::init_mapper(phys_mem_offset) };
    let mut frame_allocator =
        unsafe { edgeos_kernel::memory::BootInfoFrameAllocator::init(&boot_info.memory_map) };

    edgeos_kernel::allocator::init_heap(&mut mapper, &mut frame_allocator)
        .expect("heap initialization failed");

    // The mailbox lives on the heap and must exist before IRQ 1 is unmasked.
    let mailbox = edgeos_kernel::keyboard::init();
    x86_64::interrupts::init_idt();

    // SAFETY: this console is the only VGA writer until a panic.
    let surface = unsafe { VgaSurface::new() };
    let mut console = Console::new(surface, Color::White, Color::Black);
    boot::banner::print_banner(&mut console);

    // ========================================================================
    // Phase 2: Boot Logging
    // ========================================================================
    boot::log(&mut console, Status::Ok, "Serial port initialized");
    boot::log(&mut console, Status::Ok, "Kernel heap ready");
    boot::log_detail(
        &mut console,
        &alloc::format!("{} KiB", edgeos_kernel::allocator::HEAP_SIZE / 1024),
    );
    boot::log(&mut console, Status::Ok, "IDT configured, PICs remapped");
    boot::log(&mut console, Status::Ok, "Keyboard mailbox ready");

    // Run kernel tests
    edgeos_kernel::tests::run_all();
    boot::log(&mut console, Status::Ok, "Kernel self-tests passed");

    // Test exception handling
    ::x86_64::instructions::interrupts::int3();
    boot::log(&mut console, Status::Ok, "Exception handling verified");

    // ========================================================================
    // Phase 3: Shell
    // ========================================================================
    let mut shell = Shell::new();
    boot::log(&mut console, Status::Ok, "FAT12 volume formatted");
    boot::log(&mut console, Status::Info, "Boot complete!");
    console.put_char(b'\n');

    let mut keys = mailbox;
    shell.run(&mut console, &mut keys)
}

/// Panic handler.
///
/// Called when the kernel encounters an unrecoverable error.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    // Use the already-initialized serial port
    serial_println!("KERNEL PANIC: {}", info);

    // SAFETY: nothing else writes to the screen after this point.
    let mut writer = unsafe { PanicWriter::new() };
    let _ = write!(writer, "!!! KERNEL PANIC !!!\n{}", info);

    x86_64::halt_loop()
}
