//! # seglog core
//!
//! Append-only commit-log storage engine: an ordered, durable sequence of
//! opaque byte records addressed by monotonically increasing offsets,
//! organized into rotating on-disk segments with a memory-mapped offset
//! index for fast lookup.
//!
//! This crate provides:
//! - [`Store`]: length-prefix framed append-only byte storage
//! - [`Index`]: mmap-backed mapping from relative offset to byte position
//! - [`Segment`]: one store plus one index under a common base offset
//! - [`Log`]: the ordered segment collection with rotation, truncation,
//!   and a consolidated raw reader
//!
//! The engine assumes a single writer process owning the log directory.
//!
//! # Example
//!
//! ```no_run
//! use seglog_core::{Config, Log, Record};
//!
//! let log = Log::open("/var/lib/seglog".as_ref(), Config::default())?;
//! let mut record = Record::new(b"hello".to_vec());
//! let offset = log.append(&mut record)?;
//! let read_back = log.read(offset)?;
//! assert_eq!(read_back.value, b"hello");
//! # Ok::<(), seglog_core::LogError>(())
//! ```

mod config;
mod encoding;
mod error;
mod index;
mod log;
mod record;
mod segment;
mod store;

pub use config::Config;
pub use error::{LogError, LogResult};
pub use index::Index;
pub use log::{Log, LogReader};
pub use record::Record;
pub use segment::Segment;
pub use store::Store;
