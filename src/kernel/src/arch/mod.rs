//! Architecture-specific implementations.
//!
//! Only x86_64 is supported: VGA text surface, COM1, IDT and the 8259 PICs.

#[cfg(target_arch = "x86_64")]
pub mod x86_64;
