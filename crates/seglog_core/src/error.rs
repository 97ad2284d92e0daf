//! Error types for the log engine.

use std::io;
use thiserror::Error;

/// Result type for log engine operations.
pub type LogResult<T> = Result<T, LogError>;

/// Errors that can occur in log engine operations.
#[derive(Debug, Error)]
pub enum LogError {
    /// I/O error from the underlying file or mapped region.
    ///
    /// Fatal to the failing operation; the engine never retries.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Requested offset is outside the log's current bounds.
    ///
    /// This is a routine condition, not an internal failure. Network
    /// adapters are expected to map it to "not found" rather than to a
    /// server error.
    #[error("offset out of range: {offset}")]
    OffsetOutOfRange {
        /// The offset that was requested.
        offset: u64,
    },

    /// An index read went past the logical end of the index.
    #[error("end of index")]
    EndOfIndex,

    /// The index's mapped region has no room for another entry.
    ///
    /// Signals the owning log to rotate to a fresh segment.
    #[error("index full: no space for another entry")]
    IndexFull,

    /// Invalid configuration or startup state.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration problem.
        message: String,
    },

    /// A stored frame could not be decoded back into a record.
    #[error("corrupt record: {message}")]
    Corruption {
        /// Description of the corruption.
        message: String,
    },
}

impl LogError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a corruption error.
    pub fn corruption(message: impl Into<String>) -> Self {
        Self::Corruption {
            message: message.into(),
        }
    }

    /// Returns true if this error means the requested offset does not
    /// (yet) exist in the log.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OffsetOutOfRange { .. })
    }
}
