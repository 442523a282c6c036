//! EdgeOS command shell.
//!
//! # Architecture
//!
//! - `shell`: prompt, line input and dispatch loop
//! - `commands`: built-in commands
//! - `fs`: the in-memory FAT12 volume the commands operate on

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod commands;
pub mod fs;
pub mod shell;

pub use commands::Command;
pub use fs::{Fat12, FileInfo, FileSystem};
pub use shell::{Shell, VERSION};
