//! System-wide error types for EdgeOS.

use core::fmt;

/// Filesystem error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FsError {
    /// No directory entry with that name
    NotFound,
    /// A directory entry with that name already exists
    AlreadyExists,
    /// Every root directory slot is in use
    DirectoryFull,
    /// The FAT has no cluster left for the content
    NoFreeClusters,
    /// Empty name or a name with a reserved leading byte
    InvalidName,
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::NotFound => write!(f, "file not found"),
            FsError::AlreadyExists => write!(f, "file already exists"),
            FsError::DirectoryFull => write!(f, "root directory is full"),
            FsError::NoFreeClusters => write!(f, "no free clusters"),
            FsError::InvalidName => write!(f, "invalid file name"),
        }
    }
}
