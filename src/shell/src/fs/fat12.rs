//! In-memory FAT12 floppy image.
//!
//! Lays out a 1.44 MB disk the way FAT12 does: boot sector, two FAT copies,
//! a fixed root directory and a data area of one-sector clusters. Nothing
//! leaves memory.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use super::{FileAttributes, FileInfo, FileSystem, FsError};

/// Bytes per sector, and per cluster.
pub const SECTOR_SIZE: usize = 512;

/// Width of the name field of a directory entry.
pub const NAME_LEN: usize = 11;

/// Root directory slots.
pub const ROOT_ENTRIES: usize = 224;

const TOTAL_SECTORS: usize = 2880;
const RESERVED_SECTORS: usize = 1;
const FAT_COUNT: usize = 2;
const FAT_SECTORS: usize = 9;
const ROOT_DIR_SECTORS: usize = 14;

/// Bytes of a whole formatted volume.
pub const IMAGE_SIZE: usize = TOTAL_SECTORS * SECTOR_SIZE;

/// Sectors in the data area.
pub const DATA_SECTORS: usize =
    TOTAL_SECTORS - (RESERVED_SECTORS + FAT_COUNT * FAT_SECTORS + ROOT_DIR_SECTORS);

const FAT_BYTES: usize = FAT_SECTORS * SECTOR_SIZE;

/// First cluster of the data area.
const FIRST_CLUSTER: u16 = 2;

/// One past the last cluster backed by both the FAT and the data area.
const CLUSTER_LIMIT: u16 = {
    let by_fat = FAT_BYTES * 8 / 12;
    let by_data = DATA_SECTORS + FIRST_CLUSTER as usize;
    (if by_fat < by_data { by_fat } else { by_data }) as u16
};

const FREE: u16 = 0x000;
const END_OF_CHAIN: u16 = 0xFFF;

/// First name byte of a deleted entry.
const DELETED: u8 = 0xE5;

/// Media descriptor of a 1.44 MB floppy.
const MEDIA_DESCRIPTOR: u8 = 0xF0;

#[derive(Debug, Clone, Copy)]
struct DirEntry {
    name: [u8; NAME_LEN],
    attributes: FileAttributes,
    start_cluster: u16,
    size: u32,
}

impl DirEntry {
    const EMPTY: DirEntry = DirEntry {
        name: [0; NAME_LEN],
        attributes: FileAttributes::empty(),
        start_cluster: 0,
        size: 0,
    };

    fn is_free(&self) -> bool {
        self.name[0] == 0 || self.name[0] == DELETED
    }

    fn display_name(&self) -> String {
        let len = self.name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        String::from_utf8_lossy(&self.name[..len]).into_owned()
    }
}

/// Truncates `name` into a zero-padded name field.
fn encode_name(name: &str) -> Result<[u8; NAME_LEN], FsError> {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes[0] == DELETED || bytes.contains(&0) {
        return Err(FsError::InvalidName);
    }
    let mut field = [0; NAME_LEN];
    let len = bytes.len().min(NAME_LEN);
    field[..len].copy_from_slice(&bytes[..len]);
    Ok(field)
}

/// A FAT12 volume held in memory.
pub struct Fat12 {
    boot_sector: [u8; SECTOR_SIZE],
    fats: Vec<[u8; FAT_BYTES]>,
    root: Vec<DirEntry>,
    data: Vec<[u8; SECTOR_SIZE]>,
}

impl Fat12 {
    /// A freshly formatted, empty volume.
    pub fn new() -> Self {
        let mut fs = Self {
            boot_sector: [0; SECTOR_SIZE],
            fats: vec![[0; FAT_BYTES]; FAT_COUNT],
            root: vec![DirEntry::EMPTY; ROOT_ENTRIES],
            data: vec![[0; SECTOR_SIZE]; DATA_SECTORS],
        };
        fs.format();
        fs
    }

    fn format(&mut self) {
        let boot = &mut self.boot_sector;
        boot[0x00..0x03].copy_from_slice(&[0xEB, 0x3C, 0x90]);
        boot[0x03..0x0B].copy_from_slice(b"MSDOS5.0");
        boot[0x0B..0x0D].copy_from_slice(&(SECTOR_SIZE as u16).to_le_bytes());
        boot[0x0D] = 1; // sectors per cluster
        boot[0x0E..0x10].copy_from_slice(&(RESERVED_SECTORS as u16).to_le_bytes());
        boot[0x10] = FAT_COUNT as u8;
        boot[0x11..0x13].copy_from_slice(&(ROOT_ENTRIES as u16).to_le_bytes());
        boot[0x13..0x15].copy_from_slice(&(TOTAL_SECTORS as u16).to_le_bytes());
        boot[0x15] = MEDIA_DESCRIPTOR;
        boot[0x16..0x18].copy_from_slice(&(FAT_SECTORS as u16).to_le_bytes());
        boot[0x1FE..0x200].copy_from_slice(&[0x55, 0xAA]);

        for fat in self.fats.iter_mut() {
            fat[..3].copy_from_slice(&[MEDIA_DESCRIPTOR, 0xFF, 0xFF]);
        }
    }

    /// The boot sector.
    pub fn boot_sector(&self) -> &[u8; SECTOR_SIZE] {
        &self.boot_sector
    }

    /// Reads the 12-bit FAT entry of `cluster`.
    ///
    /// Two entries share three bytes: an even cluster owns the first byte
    /// and the low nibble of the second, an odd one the high nibble of the
    /// second byte and the whole third.
    pub fn fat_entry(&self, cluster: u16) -> u16 {
        let fat = &self.fats[0];
        let offset = usize::from(cluster) * 3 / 2;
        let pair = u16::from(fat[offset]) | (u16::from(fat[offset + 1]) << 8);
        if cluster % 2 == 0 {
            pair & 0x0FFF
        } else {
            pair >> 4
        }
    }

    /// Writes the 12-bit FAT entry of `cluster` into every FAT copy.
    fn set_fat_entry(&mut self, cluster: u16, value: u16) {
        let offset = usize::from(cluster) * 3 / 2;
        for fat in self.fats.iter_mut() {
            if cluster % 2 == 0 {
                fat[offset] = (value & 0xFF) as u8;
                fat[offset + 1] = (fat[offset + 1] & 0xF0) | ((value >> 8) & 0x0F) as u8;
            } else {
                fat[offset] = (fat[offset] & 0x0F) | ((value << 4) & 0xF0) as u8;
                fat[offset + 1] = ((value >> 4) & 0xFF) as u8;
            }
        }
    }

    fn find_free_cluster(&self) -> Option<u16> {
        (FIRST_CLUSTER..CLUSTER_LIMIT).find(|&cluster| self.fat_entry(cluster) == FREE)
    }

    /// Clusters available for new content.
    pub fn free_clusters(&self) -> usize {
        (FIRST_CLUSTER..CLUSTER_LIMIT)
            .filter(|&cluster| self.fat_entry(cluster) == FREE)
            .count()
    }

    /// Clusters of the chain starting at `start`, in order.
    ///
    /// Stops at the end-of-chain mark, at any value outside the data area,
    /// and after visiting as many clusters as exist.
    fn chain(&self, start: u16) -> impl Iterator<Item = u16> + '_ {
        let valid = |cluster: &u16| (FIRST_CLUSTER..CLUSTER_LIMIT).contains(cluster);
        core::iter::successors(Some(start).filter(valid), move |&cluster| {
            Some(self.fat_entry(cluster)).filter(valid)
        })
        .take(usize::from(CLUSTER_LIMIT - FIRST_CLUSTER))
    }

    /// Links enough free clusters for `len` bytes, at least one.
    fn allocate_chain(&mut self, len: usize) -> Result<u16, FsError> {
        let needed = len.div_ceil(SECTOR_SIZE).max(1);
        let mut start = None;
        let mut previous = None;
        for _ in 0..needed {
            let Some(cluster) = self.find_free_cluster() else {
                if let Some(start) = start {
                    self.free_chain(start);
                }
                return Err(FsError::NoFreeClusters);
            };
            self.set_fat_entry(cluster, END_OF_CHAIN);
            match previous {
                Some(previous) => self.set_fat_entry(previous, cluster),
                None => start = Some(cluster),
            }
            previous = Some(cluster);
        }
        start.ok_or(FsError::NoFreeClusters)
    }

    fn free_chain(&mut self, start: u16) {
        let clusters: Vec<u16> = self.chain(start).collect();
        for cluster in clusters {
            self.set_fat_entry(cluster, FREE);
        }
    }

    fn find(&self, field: &[u8; NAME_LEN]) -> Option<usize> {
        self.root
            .iter()
            .position(|entry| !entry.is_free() && entry.name == *field)
    }
}

impl Default for Fat12 {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for Fat12 {
    fn create(&mut self, name: &str, content: &[u8]) -> Result<(), FsError> {
        let field = encode_name(name)?;
        if self.find(&field).is_some() {
            return Err(FsError::AlreadyExists);
        }
        let slot = self
            .root
            .iter()
            .position(DirEntry::is_free)
            .ok_or(FsError::DirectoryFull)?;
        let start = self.allocate_chain(content.len())?;

        let clusters: Vec<u16> = self.chain(start).collect();
        let mut chunks = content.chunks(SECTOR_SIZE);
        for cluster in clusters {
            let sector = &mut self.data[usize::from(cluster - FIRST_CLUSTER)];
            let chunk = chunks.next().unwrap_or(&[]);
            sector[..chunk.len()].copy_from_slice(chunk);
            sector[chunk.len()..].fill(0);
        }

        self.root[slot] = DirEntry {
            name: field,
            attributes: FileAttributes::ARCHIVE,
            start_cluster: start,
            size: content.len() as u32,
        };
        log::debug!("created {} ({} bytes) at cluster {}", name, content.len(), start);
        Ok(())
    }

    fn read(&self, name: &str, out: &mut Vec<u8>) -> Result<usize, FsError> {
        let field = encode_name(name).map_err(|_| FsError::NotFound)?;
        let entry = self.root[self.find(&field).ok_or(FsError::NotFound)?];

        let mut remaining = entry.size as usize;
        for cluster in self.chain(entry.start_cluster) {
            if remaining == 0 {
                break;
            }
            let len = remaining.min(SECTOR_SIZE);
            out.extend_from_slice(&self.data[usize::from(cluster - FIRST_CLUSTER)][..len]);
            remaining -= len;
        }
        Ok(entry.size as usize - remaining)
    }

    fn remove(&mut self, name: &str) -> Result<(), FsError> {
        let field = encode_name(name).map_err(|_| FsError::NotFound)?;
        let slot = self.find(&field).ok_or(FsError::NotFound)?;
        let start = self.root[slot].start_cluster;
        self.free_chain(start);
        self.root[slot].name[0] = DELETED;
        log::debug!("removed {}", name);
        Ok(())
    }

    fn list(&self) -> Vec<FileInfo> {
        self.root
            .iter()
            .filter(|entry| !entry.is_free())
            .map(|entry| FileInfo {
                name: entry.display_name(),
                size: entry.size,
                attributes: entry.attributes,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(fs: &Fat12, name: &str) -> Result<Vec<u8>, FsError> {
        let mut out = Vec::new();
        fs.read(name, &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_format_layout() {
        let fs = Fat12::new();
        let boot = fs.boot_sector();
        assert_eq!(&boot[..3], &[0xEB, 0x3C, 0x90]);
        assert_eq!(&boot[3..11], b"MSDOS5.0");
        assert_eq!(&boot[0x1FE..], &[0x55, 0xAA]);
        assert_eq!(DATA_SECTORS, 2847);
        assert_eq!(fs.fat_entry(0), 0xFF0);
        assert_eq!(fs.fat_entry(1), 0xFFF);
        assert_eq!(fs.free_clusters(), DATA_SECTORS);
    }

    #[test]
    fn test_fat_entry_packing() {
        let mut fs = Fat12::new();
        fs.set_fat_entry(2, 0xABC);
        fs.set_fat_entry(3, 0x123);
        assert_eq!(fs.fat_entry(2), 0xABC);
        assert_eq!(fs.fat_entry(3), 0x123);
        // Clusters 2 and 3 share bytes 3..6.
        assert_eq!(&fs.fats[0][3..6], &[0xBC, 0x3A, 0x12]);
        assert_eq!(fs.fats[0][3..6], fs.fats[1][3..6]);

        fs.set_fat_entry(2, 0);
        assert_eq!(fs.fat_entry(3), 0x123);
    }

    #[test]
    fn test_create_and_read() {
        let mut fs = Fat12::new();
        fs.create("notes", b"hello world").unwrap();

        assert_eq!(read_all(&fs, "notes").unwrap(), b"hello world");
        let listing = fs.list();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].name, "notes");
        assert_eq!(listing[0].size, 11);
        assert_eq!(listing[0].attributes, FileAttributes::ARCHIVE);
    }

    #[test]
    fn test_multi_cluster_file() {
        let mut fs = Fat12::new();
        let content: Vec<u8> = (0..1300u32).map(|i| (i % 251) as u8).collect();
        fs.create("big", &content).unwrap();

        assert_eq!(fs.free_clusters(), DATA_SECTORS - 3);
        assert_eq!(read_all(&fs, "big").unwrap(), content);
    }

    #[test]
    fn test_empty_file_takes_one_cluster() {
        let mut fs = Fat12::new();
        fs.create("empty", b"").unwrap();
        assert_eq!(fs.free_clusters(), DATA_SECTORS - 1);
        assert_eq!(read_all(&fs, "empty").unwrap(), b"");
    }

    #[test]
    fn test_long_names_are_truncated() {
        let mut fs = Fat12::new();
        fs.create("averyverylongname.txt", b"x").unwrap();
        assert_eq!(fs.list()[0].name, "averyverylo");
        assert_eq!(read_all(&fs, "averyverylongname.txt").unwrap(), b"x");
        assert_eq!(fs.create("averyverylo", b"y"), Err(FsError::AlreadyExists));
    }

    #[test]
    fn test_remove_frees_clusters_and_slot() {
        let mut fs = Fat12::new();
        fs.create("a", &[1; 700]).unwrap();
        fs.create("b", b"keep").unwrap();
        fs.remove("a").unwrap();

        assert_eq!(fs.free_clusters(), DATA_SECTORS - 1);
        assert_eq!(read_all(&fs, "a"), Err(FsError::NotFound));
        assert_eq!(fs.remove("a"), Err(FsError::NotFound));
        assert_eq!(read_all(&fs, "b").unwrap(), b"keep");

        // The deleted slot and clusters are reused.
        fs.create("c", b"new").unwrap();
        assert_eq!(fs.list().len(), 2);
        assert_eq!(read_all(&fs, "c").unwrap(), b"new");
    }

    #[test]
    fn test_invalid_names() {
        let mut fs = Fat12::new();
        assert_eq!(fs.create("", b"x"), Err(FsError::InvalidName));
        assert_eq!(fs.create("a\0b", b"x"), Err(FsError::InvalidName));
    }

    #[test]
    fn test_directory_full() {
        let mut fs = Fat12::new();
        for i in 0..ROOT_ENTRIES {
            fs.create(&format!("f{}", i), b"").unwrap();
        }
        assert_eq!(fs.create("one-more", b""), Err(FsError::DirectoryFull));
    }

    #[test]
    fn test_out_of_clusters_rolls_back() {
        let mut fs = Fat12::new();
        fs.create("huge", &vec![0; (DATA_SECTORS - 2) * SECTOR_SIZE]).unwrap();
        assert_eq!(fs.free_clusters(), 2);

        assert_eq!(
            fs.create("toolarge", &[0; 3 * SECTOR_SIZE]),
            Err(FsError::NoFreeClusters)
        );
        assert_eq!(fs.free_clusters(), 2);
        fs.create("fits", &[0; 2 * SECTOR_SIZE]).unwrap();
        assert_eq!(fs.free_clusters(), 0);
    }
}
