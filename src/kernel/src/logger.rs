//! `log` backend writing to COM1.
//!
//! Lines look like `[INFO] edgeos_kernel: message`.

use log::{LevelFilter, Log, Metadata, Record};

use crate::serial_println;

/// Maximum level compiled in by the build features.
#[cfg(feature = "debug-console")]
const LEVEL: LevelFilter = LevelFilter::Trace;
#[cfg(not(feature = "debug-console"))]
const LEVEL: LevelFilter = LevelFilter::Info;

struct SerialLogger;

static LOGGER: SerialLogger = SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= LEVEL
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            serial_println!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs the serial logger.
///
/// Safe to call more than once; later calls do nothing.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LEVEL);
    }
}
