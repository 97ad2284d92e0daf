//! On-disk layout constants shared by the store, index, and segment.
//!
//! All integers persisted by the engine are big-endian:
//!
//! - store frame: `[8-byte length][length bytes of payload]`
//! - index entry: `[4-byte relative offset][8-byte byte position]`

/// Width of the length prefix on every store frame.
pub(crate) const LEN_WIDTH: u64 = 8;

/// Width of the relative-offset field of an index entry.
pub(crate) const OFF_WIDTH: u64 = 4;

/// Width of the byte-position field of an index entry.
pub(crate) const POS_WIDTH: u64 = 8;

/// Total width of one index entry.
pub(crate) const ENT_WIDTH: u64 = OFF_WIDTH + POS_WIDTH;
