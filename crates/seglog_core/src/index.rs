//! Memory-mapped offset index.

use crate::config::Config;
use crate::encoding::{ENT_WIDTH, OFF_WIDTH, POS_WIDTH};
use crate::error::{LogError, LogResult};
use memmap2::MmapMut;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Fixed-width index mapping a relative record offset to the byte
/// position of its frame in the paired store.
///
/// The backing file is pre-extended to `max_index_bytes` and mapped
/// read/write shared for the index's lifetime; the mapped length is the
/// capacity. The logical size (bytes actually used by entries) is tracked
/// separately and is what [`Index::close`] truncates the file back to.
///
/// The index has no internal lock: the owning segment serializes writes,
/// and readers go through the log-level lock.
pub struct Index {
    file: File,
    path: PathBuf,
    mmap: MmapMut,
    /// Logical size: bytes used by written entries.
    size: u64,
}

impl Index {
    /// Opens the index over `file`, which is extended to the configured
    /// maximum index size and mapped in full.
    ///
    /// The file's size before extension becomes the logical size, so an
    /// index reopened from disk starts exactly where it left off.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidConfig`] if the file already holds more
    /// entry bytes than the configured maximum, since extending to the
    /// maximum would shrink the file and destroy persisted entries.
    /// Otherwise returns an error if the stat, resize, or mapping fails.
    pub fn open(file: File, path: &Path, config: &Config) -> LogResult<Self> {
        let size = file.metadata()?.len();
        if size > config.max_index_bytes {
            return Err(LogError::invalid_config(format!(
                "index {} holds {size} bytes, more than max_index_bytes {}",
                path.display(),
                config.max_index_bytes
            )));
        }
        file.set_len(config.max_index_bytes)?;

        // SAFETY: the file is kept open for the lifetime of the mapping,
        // the process is the single writer of the log directory, and all
        // access goes through the bounds-checked entry accessors below.
        let mmap = unsafe { MmapMut::map_mut(&file)? };

        Ok(Self {
            file,
            path: path.to_path_buf(),
            mmap,
            size,
        })
    }

    /// Byte range of entry slot `slot` within the mapped region.
    fn entry_range(slot: u64) -> std::ops::Range<usize> {
        let start = (slot * ENT_WIDTH) as usize;
        start..start + ENT_WIDTH as usize
    }

    /// Appends one entry at the logical tail.
    ///
    /// Entries must be written in increasing relative-offset order; the
    /// index does not validate monotonicity itself.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::IndexFull`] if one more entry would exceed the
    /// mapped region.
    pub fn write(&mut self, relative_offset: u32, position: u64) -> LogResult<()> {
        if (self.mmap.len() as u64) < self.size + ENT_WIDTH {
            return Err(LogError::IndexFull);
        }

        let range = Self::entry_range(self.size / ENT_WIDTH);
        let entry = &mut self.mmap[range];
        entry[..OFF_WIDTH as usize].copy_from_slice(&relative_offset.to_be_bytes());
        entry[OFF_WIDTH as usize..].copy_from_slice(&position.to_be_bytes());

        self.size += ENT_WIDTH;
        Ok(())
    }

    /// Reads entry `n`, where `-1` means the last written entry.
    ///
    /// Returns the stored relative offset and byte position.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::EndOfIndex`] if the index is empty or the
    /// requested entry lies past the logical size.
    pub fn read(&self, n: i64) -> LogResult<(u32, u64)> {
        if self.size == 0 {
            return Err(LogError::EndOfIndex);
        }

        let entries = self.size / ENT_WIDTH;
        let slot = match n {
            -1 => entries - 1,
            n if n < 0 => return Err(LogError::EndOfIndex),
            n => n as u64,
        };

        if slot >= entries {
            return Err(LogError::EndOfIndex);
        }

        let entry = &self.mmap[Self::entry_range(slot)];
        let mut off_bytes = [0u8; OFF_WIDTH as usize];
        off_bytes.copy_from_slice(&entry[..OFF_WIDTH as usize]);
        let mut pos_bytes = [0u8; POS_WIDTH as usize];
        pos_bytes.copy_from_slice(&entry[OFF_WIDTH as usize..]);

        Ok((u32::from_be_bytes(off_bytes), u64::from_be_bytes(pos_bytes)))
    }

    /// Returns the logical size in bytes (entry count times entry width).
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Syncs the mapped region and the file, then truncates the file down
    /// to the logical size, discarding the pre-allocated tail.
    ///
    /// Without this truncation every index file on disk would occupy the
    /// full configured maximum regardless of content.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync or truncation fails.
    pub fn close(&self) -> LogResult<()> {
        self.mmap.flush()?;
        self.file.sync_all()?;
        self.file.set_len(self.size)?;
        Ok(())
    }
}

impl std::fmt::Debug for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("path", &self.path)
            .field("size", &self.size)
            .field("capacity", &self.mmap.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;
    use tempfile::tempdir;

    fn open_index(path: &Path, config: &Config) -> Index {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .unwrap();
        Index::open(file, path, config).unwrap()
    }

    #[test]
    fn read_empty_fails() {
        let dir = tempdir().unwrap();
        let index = open_index(&dir.path().join("0.index"), &Config::default());

        assert!(matches!(index.read(-1), Err(LogError::EndOfIndex)));
        assert!(matches!(index.read(0), Err(LogError::EndOfIndex)));
    }

    #[test]
    fn write_and_read_entries() {
        let dir = tempdir().unwrap();
        let index = &mut open_index(&dir.path().join("0.index"), &Config::default());

        let entries = [(0u32, 0u64), (1, 19), (2, 40)];
        for (off, pos) in entries {
            index.write(off, pos).unwrap();
        }

        for (i, (off, pos)) in entries.iter().enumerate() {
            assert_eq!(index.read(i as i64).unwrap(), (*off, *pos));
        }

        // -1 reads the last entry
        assert_eq!(index.read(-1).unwrap(), (2, 40));
    }

    #[test]
    fn read_past_logical_size_fails() {
        let dir = tempdir().unwrap();
        let index = &mut open_index(&dir.path().join("0.index"), &Config::default());

        index.write(0, 0).unwrap();
        assert!(matches!(index.read(1), Err(LogError::EndOfIndex)));
    }

    #[test]
    fn write_full_region_fails() {
        let dir = tempdir().unwrap();
        let config = Config::default().max_index_bytes(ENT_WIDTH * 2);
        let index = &mut open_index(&dir.path().join("0.index"), &config);

        index.write(0, 0).unwrap();
        index.write(1, 19).unwrap();
        assert!(matches!(index.write(2, 40), Err(LogError::IndexFull)));
    }

    #[test]
    fn reopen_with_smaller_capacity_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("0.index");
        let config = Config::default().max_index_bytes(ENT_WIDTH * 4);

        {
            let index = &mut open_index(&path, &config);
            index.write(0, 0).unwrap();
            index.write(1, 19).unwrap();
            index.write(2, 40).unwrap();
            index.close().unwrap();
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .unwrap();
        let shrunk = Config::default().max_index_bytes(ENT_WIDTH * 2);
        let result = Index::open(file, &path, &shrunk);
        assert!(matches!(result, Err(LogError::InvalidConfig { .. })));

        // The persisted entries are untouched by the rejected open.
        assert_eq!(std::fs::metadata(&path).unwrap().len(), ENT_WIDTH * 3);

        let index = open_index(&path, &config);
        assert_eq!(index.read(-1).unwrap(), (2, 40));
    }

    #[test]
    fn close_truncates_to_logical_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("0.index");
        let config = Config::default();

        {
            let index = &mut open_index(&path, &config);
            index.write(0, 0).unwrap();
            index.write(1, 19).unwrap();

            // While open the file occupies the full configured maximum.
            assert_eq!(
                std::fs::metadata(&path).unwrap().len(),
                config.max_index_bytes
            );

            index.close().unwrap();
        }

        assert_eq!(std::fs::metadata(&path).unwrap().len(), ENT_WIDTH * 2);

        // Reopening resumes from the persisted entries.
        let index = open_index(&path, &config);
        assert_eq!(index.read(-1).unwrap(), (1, 19));
    }
}
