//! FAT directory entry attributes.

use bitflags::bitflags;

bitflags! {
    /// Attribute byte of a FAT directory entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FileAttributes: u8 {
        const READ_ONLY = 0x01;
        const HIDDEN    = 0x02;
        const SYSTEM    = 0x04;
        const VOLUME_ID = 0x08;
        const DIRECTORY = 0x10;
        const ARCHIVE   = 0x20; // regular file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_file_byte() {
        assert_eq!(FileAttributes::ARCHIVE.bits(), 0x20);
        let attrs = FileAttributes::from_bits_truncate(0x21);
        assert!(attrs.contains(FileAttributes::READ_ONLY));
        assert!(attrs.contains(FileAttributes::ARCHIVE));
    }
}
