//! Log record type and its frame-payload codec.

use crate::error::{LogError, LogResult};

/// A record stored in the log: an opaque byte payload plus the absolute
/// offset the engine assigned to it on append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Opaque record payload.
    pub value: Vec<u8>,
    /// Absolute offset, assigned by the engine. Any value supplied by the
    /// caller is overwritten on append.
    pub offset: u64,
}

impl Record {
    /// Offset field width: 8 bytes, big-endian.
    const HEADER_SIZE: usize = 8;

    /// Creates a record from a payload. The offset is stamped on append.
    #[must_use]
    pub fn new(value: Vec<u8>) -> Self {
        Self { value, offset: 0 }
    }

    /// Encodes the record into a store frame payload:
    /// `[8-byte BE offset][value bytes]`.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::HEADER_SIZE + self.value.len());
        buf.extend_from_slice(&self.offset.to_be_bytes());
        buf.extend_from_slice(&self.value);
        buf
    }

    /// Decodes a record from a store frame payload.
    ///
    /// # Errors
    ///
    /// Returns a corruption error if the payload is shorter than the
    /// offset header.
    pub fn decode(data: &[u8]) -> LogResult<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(LogError::corruption(format!(
                "record payload too short: {} bytes",
                data.len()
            )));
        }

        let mut offset_bytes = [0u8; Self::HEADER_SIZE];
        offset_bytes.copy_from_slice(&data[..Self::HEADER_SIZE]);

        Ok(Self {
            value: data[Self::HEADER_SIZE..].to_vec(),
            offset: u64::from_be_bytes(offset_bytes),
        })
    }

    /// Returns the encoded length of this record's frame payload.
    #[must_use]
    pub fn encoded_len(&self) -> u64 {
        (Self::HEADER_SIZE + self.value.len()) as u64
    }
}
