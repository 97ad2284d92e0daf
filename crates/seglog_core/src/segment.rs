//! A bounded unit of the log: one store plus one index under a base offset.

use crate::config::Config;
use crate::error::{LogError, LogResult};
use crate::index::Index;
use crate::record::Record;
use crate::store::Store;
use std::fs::OpenOptions;
use std::path::Path;

/// Pairs one [`Store`] and one [`Index`] sharing a base offset.
///
/// The segment translates absolute log offsets to the relative offsets
/// the index is keyed by, assigns offsets on append, and reports when it
/// has grown past the configured size ceilings so the owning log can
/// rotate.
///
/// Invariant: `next_offset == base_offset + index entry count`.
#[derive(Debug)]
pub struct Segment {
    store: Store,
    index: Index,
    base_offset: u64,
    next_offset: u64,
    config: Config,
}

impl Segment {
    /// Opens (creating if absent) `<base_offset>.store` and
    /// `<base_offset>.index` inside `dir`.
    ///
    /// The next offset to assign is reconstructed from the index's last
    /// entry; an empty index means a fresh segment starting at
    /// `base_offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be opened or the index
    /// cannot be mapped.
    pub fn open(dir: &Path, base_offset: u64, config: Config) -> LogResult<Self> {
        let store = Store::open(&dir.join(format!("{base_offset}.store")))?;

        let index_path = dir.join(format!("{base_offset}.index"));
        let index_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&index_path)?;
        let index = Index::open(index_file, &index_path, &config)?;

        let next_offset = match index.read(-1) {
            Ok((relative, _)) => base_offset + u64::from(relative) + 1,
            Err(LogError::EndOfIndex) => base_offset,
            Err(err) => return Err(err),
        };

        Ok(Self {
            store,
            index,
            base_offset,
            next_offset,
            config,
        })
    }

    /// Appends a record, assigning it the segment's next offset.
    ///
    /// Returns the assigned absolute offset. The offset counter advances
    /// only after both the store append and the index write succeed; a
    /// failed append never consumes an offset.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::IndexFull`] when the index region is
    /// exhausted, which tells the owning log to rotate.
    pub fn append(&mut self, record: &mut Record) -> LogResult<u64> {
        record.offset = self.next_offset;

        let (_, position) = self.store.append(&record.encode())?;
        self.index
            .write((self.next_offset - self.base_offset) as u32, position)?;

        let offset = self.next_offset;
        self.next_offset += 1;
        Ok(offset)
    }

    /// Reads the record stored at an absolute offset.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::EndOfIndex`] if the offset lies below the base
    /// or has no entry in this segment, or a corruption error if the
    /// frame cannot be decoded.
    pub fn read(&self, offset: u64) -> LogResult<Record> {
        let relative = offset
            .checked_sub(self.base_offset)
            .ok_or(LogError::EndOfIndex)?;
        let (_, position) = self.index.read(relative as i64)?;
        let payload = self.store.read(position)?;
        Record::decode(&payload)
    }

    /// True once the store or the index has reached its configured
    /// ceiling.
    pub fn is_maxed(&self) -> bool {
        self.store.size() >= self.config.max_store_bytes
            || self.index.size() >= self.config.max_index_bytes
    }

    /// The lowest absolute offset this segment can hold.
    pub fn base_offset(&self) -> u64 {
        self.base_offset
    }

    /// The absolute offset the next append would be assigned.
    pub fn next_offset(&self) -> u64 {
        self.next_offset
    }

    /// Access to the paired store, for the log's consolidated reader.
    pub(crate) fn store(&self) -> &Store {
        &self.store
    }

    /// Closes the segment, then deletes both backing files.
    ///
    /// Used only during truncation and reset.
    pub fn remove(self) -> LogResult<()> {
        self.close()?;
        std::fs::remove_file(self.index.path())?;
        std::fs::remove_file(self.store.path())?;
        Ok(())
    }

    /// Closes the index (sync + truncate to logical size) then the store
    /// (flush + sync).
    pub fn close(&self) -> LogResult<()> {
        self.index.close()?;
        self.store.close()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{ENT_WIDTH, LEN_WIDTH};
    use tempfile::tempdir;

    fn test_config() -> Config {
        Config::default().max_store_bytes(1024).max_index_bytes(1024)
    }

    #[test]
    fn append_and_read() {
        let dir = tempdir().unwrap();
        let mut segment = Segment::open(dir.path(), 16, test_config()).unwrap();

        assert_eq!(segment.next_offset(), 16);

        let mut record = Record::new(b"hello world".to_vec());
        let offset = segment.append(&mut record).unwrap();
        assert_eq!(offset, 16);
        assert_eq!(record.offset, 16);

        let read_back = segment.read(offset).unwrap();
        assert_eq!(read_back.value, b"hello world");
        assert_eq!(read_back.offset, 16);
    }

    #[test]
    fn next_offset_survives_reopen() {
        let dir = tempdir().unwrap();

        {
            let mut segment = Segment::open(dir.path(), 0, test_config()).unwrap();
            for i in 0..3u8 {
                segment.append(&mut Record::new(vec![i])).unwrap();
            }
            segment.close().unwrap();
        }

        let segment = Segment::open(dir.path(), 0, test_config()).unwrap();
        assert_eq!(segment.next_offset(), 3);
        assert_eq!(segment.read(2).unwrap().value, vec![2]);
    }

    #[test]
    fn maxed_by_index() {
        let dir = tempdir().unwrap();
        let config = Config::default()
            .max_store_bytes(1024)
            .max_index_bytes(ENT_WIDTH * 3);
        let mut segment = Segment::open(dir.path(), 0, config).unwrap();

        for _ in 0..3 {
            assert!(!segment.is_maxed());
            segment.append(&mut Record::new(b"x".to_vec())).unwrap();
        }
        assert!(segment.is_maxed());

        // Region exhausted: the next append fails without consuming an offset.
        let next_before = segment.next_offset();
        assert!(matches!(
            segment.append(&mut Record::new(b"y".to_vec())),
            Err(LogError::IndexFull)
        ));
        assert_eq!(segment.next_offset(), next_before);
    }

    #[test]
    fn maxed_by_store() {
        let dir = tempdir().unwrap();
        let value = b"12345".to_vec();
        let frame_len = LEN_WIDTH + Record::new(value.clone()).encoded_len();
        let config = Config::default()
            .max_store_bytes(frame_len * 2)
            .max_index_bytes(1024);
        let mut segment = Segment::open(dir.path(), 0, config).unwrap();

        segment.append(&mut Record::new(value.clone())).unwrap();
        assert!(!segment.is_maxed());
        segment.append(&mut Record::new(value)).unwrap();
        assert!(segment.is_maxed());
    }

    #[test]
    fn read_unwritten_offset_fails() {
        let dir = tempdir().unwrap();
        let mut segment = Segment::open(dir.path(), 0, test_config()).unwrap();

        segment.append(&mut Record::new(b"one".to_vec())).unwrap();
        assert!(matches!(segment.read(1), Err(LogError::EndOfIndex)));
    }

    #[test]
    fn read_below_base_fails() {
        let dir = tempdir().unwrap();
        let mut segment = Segment::open(dir.path(), 16, test_config()).unwrap();
        segment.append(&mut Record::new(b"one".to_vec())).unwrap();

        assert!(matches!(segment.read(3), Err(LogError::EndOfIndex)));
    }

    #[test]
    fn remove_deletes_files() {
        let dir = tempdir().unwrap();
        let mut segment = Segment::open(dir.path(), 0, test_config()).unwrap();
        segment.append(&mut Record::new(b"gone".to_vec())).unwrap();

        segment.remove().unwrap();

        assert!(!dir.path().join("0.store").exists());
        assert!(!dir.path().join("0.index").exists());
    }
}
