//! Filesystem traits and types.

use alloc::string::String;
use alloc::vec::Vec;

pub use edgeos_common::{FileAttributes, FsError};

pub mod fat12;

pub use fat12::Fat12;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Stored name.
    pub name: String,
    /// Content length in bytes.
    pub size: u32,
    /// Attribute flags.
    pub attributes: FileAttributes,
}

/// Trait for a flat, single-directory filesystem.
pub trait FileSystem {
    /// Create a file holding `content`.
    fn create(&mut self, name: &str, content: &[u8]) -> Result<(), FsError>;

    /// Append the content of a file to `out`, returning the bytes read.
    fn read(&self, name: &str, out: &mut Vec<u8>) -> Result<usize, FsError>;

    /// Delete a file.
    fn remove(&mut self, name: &str) -> Result<(), FsError>;

    /// List every file.
    fn list(&self) -> Vec<FileInfo>;
}
