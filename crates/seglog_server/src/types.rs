//! Wire types for the produce/consume surface.

use seglog_core::Record;
use serde::{Deserialize, Serialize};

/// A record as it crosses the service boundary.
///
/// The offset is informational on the way in: the engine assigns the real
/// offset on append and overwrites whatever the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayload {
    /// Opaque record payload.
    pub value: Vec<u8>,
    /// Absolute offset; engine-assigned in responses.
    #[serde(default)]
    pub offset: u64,
}

impl RecordPayload {
    /// Creates a payload with no offset assigned yet.
    #[must_use]
    pub fn new(value: Vec<u8>) -> Self {
        Self { value, offset: 0 }
    }
}

impl From<Record> for RecordPayload {
    fn from(record: Record) -> Self {
        Self {
            value: record.value,
            offset: record.offset,
        }
    }
}

impl From<RecordPayload> for Record {
    fn from(payload: RecordPayload) -> Self {
        Self {
            value: payload.value,
            offset: payload.offset,
        }
    }
}

/// Request to append one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProduceRequest {
    /// The record to append.
    pub record: RecordPayload,
}

/// Response carrying the offset the engine assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProduceResponse {
    /// Assigned absolute offset.
    pub offset: u64,
}

/// Request to read the record at one offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumeRequest {
    /// Absolute offset to read.
    pub offset: u64,
}

/// Response carrying the record read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumeResponse {
    /// The record at the requested offset.
    pub record: RecordPayload,
}

/// Envelope for dispatching requests and responses over one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "body")]
pub enum LogMessage {
    /// Produce request.
    ProduceRequest(ProduceRequest),
    /// Produce response.
    ProduceResponse(ProduceResponse),
    /// Consume request.
    ConsumeRequest(ConsumeRequest),
    /// Consume response.
    ConsumeResponse(ConsumeResponse),
}
