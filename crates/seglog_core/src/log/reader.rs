//! Consolidated raw byte stream over every segment's store.

use std::fs::File;
use std::io::{self, Read};
use std::os::unix::fs::FileExt;

/// One store's worth of the stream: an independent file handle plus the
/// store size captured when the reader was built, so the stream stays
/// finite while the log keeps accepting appends.
struct StorePart {
    file: File,
    len: u64,
    pos: u64,
}

impl StorePart {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos >= self.len {
            return Ok(0);
        }

        let remaining = (self.len - self.pos).min(buf.len() as u64) as usize;
        let n = self.file.read_at(&mut buf[..remaining], self.pos)?;
        self.pos += n as u64;
        Ok(n)
    }
}

/// Finite [`Read`] stream concatenating every segment's store file, raw
/// from position 0, in segment order.
///
/// Frames keep their `[8-byte big-endian length][payload]` encoding;
/// consumers parse them themselves. Used for bulk snapshot transfer, not
/// single-record access.
pub struct LogReader {
    parts: Vec<StorePart>,
    current: usize,
}

impl LogReader {
    pub(crate) fn new(parts: Vec<(File, u64)>) -> Self {
        Self {
            parts: parts
                .into_iter()
                .map(|(file, len)| StorePart { file, len, pos: 0 })
                .collect(),
            current: 0,
        }
    }
}

impl Read for LogReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.current < self.parts.len() {
            let n = self.parts[self.current].read(buf)?;
            if n > 0 {
                return Ok(n);
            }
            self.current += 1;
        }
        Ok(0)
    }
}

impl std::fmt::Debug for LogReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogReader")
            .field("parts", &self.parts.len())
            .field("current", &self.current)
            .finish()
    }
}
