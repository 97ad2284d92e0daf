//! The log: an ordered collection of segments behaving as one contiguous,
//! growable commit log.

mod reader;

pub use reader::LogReader;

use crate::config::Config;
use crate::encoding::ENT_WIDTH;
use crate::error::{LogError, LogResult};
use crate::record::Record;
use crate::segment::Segment;
use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An append-only commit log over a directory of rotating segments.
///
/// Appends route to the active (highest base offset) segment; reads route
/// to the segment whose offset range contains the requested offset. One
/// read/write lock guards segment-list membership and the active-segment
/// pointer: appends, truncation, close, and reset take the write lock,
/// reads and metadata queries the read lock. All I/O is synchronous; a
/// blocked append stalls other callers until it completes.
#[derive(Debug)]
pub struct Log {
    dir: PathBuf,
    config: Config,
    segments: RwLock<Vec<Segment>>,
}

impl Log {
    /// Opens the log over `dir`, creating the directory if needed.
    ///
    /// Existing segment file pairs are discovered by scanning the
    /// directory for `<base>.store` / `<base>.index` names; one segment
    /// is opened per distinct base offset, ascending. A fresh directory
    /// gets a single segment based at `config.initial_offset`.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidConfig`] for unusable size limits or a
    /// malformed segment filename, or an I/O error from the scan.
    pub fn open(dir: &Path, config: Config) -> LogResult<Self> {
        if config.max_store_bytes == 0 {
            return Err(LogError::invalid_config("max_store_bytes must be non-zero"));
        }
        if config.max_index_bytes < ENT_WIDTH {
            return Err(LogError::invalid_config(format!(
                "max_index_bytes must hold at least one {ENT_WIDTH}-byte entry"
            )));
        }

        fs::create_dir_all(dir)?;
        let segments = Self::setup(dir, &config)?;

        Ok(Self {
            dir: dir.to_path_buf(),
            config,
            segments: RwLock::new(segments),
        })
    }

    /// Scans the directory and opens one segment per base offset found,
    /// or creates the initial segment when the directory holds none.
    fn setup(dir: &Path, config: &Config) -> LogResult<Vec<Segment>> {
        let mut base_offsets = BTreeSet::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_segment_file = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("store" | "index")
            );
            if !is_segment_file {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            let base = stem.parse::<u64>().map_err(|_| {
                LogError::invalid_config(format!(
                    "malformed segment filename: {}",
                    path.display()
                ))
            })?;
            base_offsets.insert(base);
        }

        let mut segments = Vec::with_capacity(base_offsets.len().max(1));
        for base in &base_offsets {
            segments.push(Segment::open(dir, *base, config.clone())?);
        }

        if segments.is_empty() {
            segments.push(Segment::open(dir, config.initial_offset, config.clone())?);
        }

        debug!(dir = %dir.display(), segments = segments.len(), "log setup complete");
        Ok(segments)
    }

    /// Appends a record to the active segment and returns its assigned
    /// absolute offset.
    ///
    /// If the active segment is maxed *after* a successful append, a new
    /// segment based at `offset + 1` becomes active; the append that
    /// crosses the threshold still lands in the old segment.
    ///
    /// # Errors
    ///
    /// Propagates store/index failures. [`LogError::IndexFull`] from a
    /// freshly rotated segment means the configured limits cannot hold a
    /// single record.
    pub fn append(&self, record: &mut Record) -> LogResult<u64> {
        let mut segments = self.segments.write();

        let active = segments
            .last_mut()
            .ok_or_else(|| LogError::invalid_config("log has no active segment"))?;
        let offset = active.append(record)?;

        if active.is_maxed() {
            debug!(base_offset = offset + 1, "rotating to new active segment");
            segments.push(Segment::open(&self.dir, offset + 1, self.config.clone())?);
        }

        Ok(offset)
    }

    /// Reads the record at an absolute offset.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::OffsetOutOfRange`] if no segment's range
    /// contains the offset.
    pub fn read(&self, offset: u64) -> LogResult<Record> {
        let segments = self.segments.read();

        let segment = segments
            .iter()
            .find(|s| s.base_offset() <= offset && offset < s.next_offset())
            .ok_or(LogError::OffsetOutOfRange { offset })?;

        segment.read(offset)
    }

    /// The lowest offset currently held by the log.
    pub fn lowest_offset(&self) -> u64 {
        let segments = self.segments.read();
        segments.first().map_or(0, Segment::base_offset)
    }

    /// The highest offset currently held by the log, or 0 when empty.
    pub fn highest_offset(&self) -> u64 {
        let segments = self.segments.read();
        match segments.last().map_or(0, Segment::next_offset) {
            0 => 0,
            next => next - 1,
        }
    }

    /// Removes every segment fully consumed below the retention floor:
    /// those whose next offset is at most `lowest + 1`.
    ///
    /// Surviving segments are not rewritten. The active segment is always
    /// kept so the log retains exactly one segment accepting appends.
    ///
    /// # Errors
    ///
    /// Returns the first file-removal failure.
    pub fn truncate(&self, lowest: u64) -> LogResult<()> {
        let mut segments = self.segments.write();

        let mut kept = Vec::with_capacity(segments.len());
        let last_index = segments.len().saturating_sub(1);
        for (i, segment) in std::mem::take(&mut *segments).into_iter().enumerate() {
            if segment.next_offset() <= lowest + 1 && i != last_index {
                debug!(base_offset = segment.base_offset(), "removing segment");
                segment.remove()?;
            } else {
                kept.push(segment);
            }
        }

        *segments = kept;
        Ok(())
    }

    /// Returns a finite byte stream concatenating every segment's store,
    /// raw from position 0, in segment order.
    ///
    /// Consumers parse the length-prefixed frames themselves; this is the
    /// bulk snapshot-transfer path, not single-record access. Each call
    /// snapshots the current store sizes, so the stream is restartable by
    /// calling again.
    ///
    /// # Errors
    ///
    /// Returns an error if a store's buffered writes cannot be flushed.
    pub fn reader(&self) -> LogResult<LogReader> {
        let segments = self.segments.read();

        let mut parts = Vec::with_capacity(segments.len());
        for segment in segments.iter() {
            parts.push(segment.store().raw_reader()?);
        }

        Ok(LogReader::new(parts))
    }

    /// Closes every segment in order; the first failure aborts.
    ///
    /// # Errors
    ///
    /// Returns the first segment-close failure.
    pub fn close(&self) -> LogResult<()> {
        let segments = self.segments.write();
        for segment in segments.iter() {
            segment.close()?;
        }
        Ok(())
    }

    /// Removes the entire log directory and re-runs setup, leaving one
    /// fresh segment at the configured initial offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory removal or re-setup fails.
    pub fn reset(&self) -> LogResult<()> {
        let mut segments = self.segments.write();

        // Drop all file handles before deleting the directory.
        segments.clear();
        fs::remove_dir_all(&self.dir)?;
        fs::create_dir_all(&self.dir)?;

        debug!(dir = %self.dir.display(), "log reset");
        *segments = Self::setup(&self.dir, &self.config)?;
        Ok(())
    }

    /// The directory this log owns.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The configuration the log was opened with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Base and next offset of every segment, ascending. For inspection
    /// tooling; not part of the hot path.
    pub fn segment_ranges(&self) -> Vec<(u64, u64)> {
        let segments = self.segments.read();
        segments
            .iter()
            .map(|s| (s.base_offset(), s.next_offset()))
            .collect()
    }
}
