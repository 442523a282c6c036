//! Types shared by every EdgeOS crate.
//!
//! - `screen`: text-mode geometry, colors and packed screen cells
//! - `error`: error enums returned across crate boundaries
//! - `attributes`: FAT directory entry attribute flags

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod attributes;
pub mod error;
pub mod screen;

pub use attributes::FileAttributes;
pub use error::FsError;
pub use screen::{Color, ScreenCell, TEXT_CELLS, TEXT_HEIGHT, TEXT_WIDTH};
