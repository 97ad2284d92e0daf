//! Append-only byte storage with length-prefixed framing.

use crate::encoding::LEN_WIDTH;
use crate::error::LogResult;
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};

/// File handle, buffered writer, and size bookkeeping, all guarded by one
/// lock so appends and reads never interleave.
struct StoreInner {
    file: File,
    writer: BufWriter<File>,
    size: u64,
}

/// Durable append-only byte storage.
///
/// Every append writes one frame: an 8-byte big-endian length prefix
/// followed by the payload. Writes go through a buffered writer; any read
/// flushes the buffer first so it always observes appended frames. The
/// current size is authoritative state, mutated only by `append`.
pub struct Store {
    path: PathBuf,
    inner: Mutex<StoreInner>,
}

impl Store {
    /// Opens or creates the store file at the given path.
    ///
    /// The file is opened read/write in append mode, and its current size
    /// becomes the position of the next frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its metadata read.
    pub fn open(path: &Path) -> LogResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(path)?;

        let size = file.metadata()?.len();
        let writer = BufWriter::new(file.try_clone()?);

        Ok(Self {
            path: path.to_path_buf(),
            inner: Mutex::new(StoreInner { file, writer, size }),
        })
    }

    /// Appends one framed payload.
    ///
    /// Returns the total bytes written (length prefix plus payload) and
    /// the byte position at which the frame begins.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffered write fails. The size is only
    /// advanced after both writes succeed.
    pub fn append(&self, payload: &[u8]) -> LogResult<(u64, u64)> {
        let mut inner = self.inner.lock();

        let pos = inner.size;
        inner
            .writer
            .write_all(&(payload.len() as u64).to_be_bytes())?;
        inner.writer.write_all(payload)?;

        let written = LEN_WIDTH + payload.len() as u64;
        inner.size += written;

        Ok((written, pos))
    }

    /// Reads the framed payload that begins at `pos`.
    ///
    /// Buffered writes are flushed first so the read observes every
    /// preceding append.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush or either positional read fails.
    pub fn read(&self, pos: u64) -> LogResult<Vec<u8>> {
        let mut inner = self.inner.lock();
        inner.writer.flush()?;

        let mut len_bytes = [0u8; LEN_WIDTH as usize];
        inner.file.read_exact_at(&mut len_bytes, pos)?;

        let mut payload = vec![0u8; u64::from_be_bytes(len_bytes) as usize];
        inner.file.read_exact_at(&mut payload, pos + LEN_WIDTH)?;

        Ok(payload)
    }

    /// Raw positional read into `buf` starting at `offset`.
    ///
    /// Does not interpret framing; used for the log's consolidated byte
    /// stream. Flushes buffered writes first.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush or the read fails.
    pub fn read_at(&self, buf: &mut [u8], offset: u64) -> LogResult<usize> {
        let mut inner = self.inner.lock();
        inner.writer.flush()?;

        let n = inner.file.read_at(buf, offset)?;
        Ok(n)
    }

    /// Returns the current store size in bytes.
    pub fn size(&self) -> u64 {
        self.inner.lock().size
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes buffered writes and syncs the file to disk.
    ///
    /// The file handle itself is released when the store is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush or sync fails.
    pub fn close(&self) -> LogResult<()> {
        let mut inner = self.inner.lock();
        inner.writer.flush()?;
        inner.file.sync_all()?;
        Ok(())
    }

    /// Clones the underlying read handle and captures the current size,
    /// for an independent sequential reader over the raw frames.
    pub(crate) fn raw_reader(&self) -> LogResult<(File, u64)> {
        let mut inner = self.inner.lock();
        inner.writer.flush()?;
        Ok((inner.file.try_clone()?, inner.size))
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .field("size", &self.size())
            .finish()
    }
}
