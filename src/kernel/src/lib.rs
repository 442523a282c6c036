//! EdgeOS Kernel
//!
//! A single-core teaching kernel for x86_64: VGA text console, PS/2
//! keyboard and an interactive shell over an in-memory FAT12 volume.
//!
//! # Architecture
//!
//! The kernel is structured into the following modules:
//! - `arch`: Platform-specific code (VGA, serial, interrupts, PIC)
//! - `keyboard`: IRQ 1 glue feeding the console mailbox
//! - `logger`: `log` backend on COM1
//! - `memory` / `allocator`: paging setup and the kernel heap
//! - `boot`: boot banner and status lines
//!
//! # Safety
//!
//! This is a `#![no_std]` kernel. All unsafe code is documented with safety
//! invariants explaining why the usage is correct.

#![no_std]
#![cfg_attr(target_arch = "x86_64", feature(abi_x86_interrupt))]
#![warn(missing_docs)]

extern crate alloc;

pub mod allocator;
pub mod arch;
pub mod boot;
pub mod keyboard;
pub mod logger;
pub mod memory;
pub mod tests;
pub mod testutil;

/// Initializes core kernel subsystems.
///
/// Called first in the boot process; brings up the serial port and the
/// logger so everything after it can log.
pub fn init() {
    #[cfg(target_arch = "x86_64")]
    arch::x86_64::serial::init();
    logger::init();
}
