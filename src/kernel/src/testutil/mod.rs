//! Harness for the QEMU integration tests under `tests/`.
//!
//! Each test binary boots the kernel, runs its `#[test_case]` functions
//! against the real VGA buffer and reports over COM1. The outcome leaves
//! QEMU through the isa-debug-exit device that `bootimage test` attaches.

use crate::serial_println;

/// Port of the isa-debug-exit device in `package.metadata.bootimage`.
const DEBUG_EXIT_PORT: u16 = 0xf4;

/// Value written to the debug-exit port.
///
/// QEMU exits with `(value << 1) | 1`, so `Success` surfaces as 33, the
/// `test-success-exit-code` bootimage expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum QemuExitCode {
    /// Every case passed.
    Success = 0x10,
    /// A case panicked.
    Failed = 0x11,
}

/// Stops QEMU with `exit_code`.
pub fn exit_qemu(exit_code: QemuExitCode) {
    #[cfg(target_arch = "x86_64")]
    {
        use x86_64::instructions::port::Port;

        // SAFETY: the port only exists under the test QEMU configuration,
        // where writing it ends the run.
        unsafe {
            Port::<u32>::new(DEBUG_EXIT_PORT).write(exit_code as u32);
        }
    }
}

/// A `#[test_case]` item.
pub trait Testable {
    /// Runs the case and reports it on serial.
    fn run(&self);
}

impl<T: Fn()> Testable for T {
    fn run(&self) {
        let name = core::any::type_name::<T>();
        serial_println!("test {} ... ", name);
        self();
        log::debug!("{} passed", name);
        serial_println!("[ok]");
    }
}

/// Runs every test case in order, then exits QEMU with success.
///
/// A failing case panics into [`test_panic_handler`] instead.
pub fn test_runner(tests: &[&dyn Testable]) {
    serial_println!("Running {} tests", tests.len());
    for test in tests {
        test.run();
    }
    exit_qemu(QemuExitCode::Success);
}

/// Reports the panic as a failed case and exits QEMU with failure.
pub fn test_panic_handler(info: &core::panic::PanicInfo) -> ! {
    serial_println!("[failed]");
    serial_println!("Error: {}", info);
    exit_qemu(QemuExitCode::Failed);
    crate::arch::x86_64::halt_loop()
}
