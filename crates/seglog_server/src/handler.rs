//! Request handlers for the produce/consume endpoints.

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::types::{ConsumeRequest, ConsumeResponse, ProduceRequest, ProduceResponse};
use seglog_core::{Log, Record};
use std::sync::Arc;
use tracing::debug;

/// Context shared by all handlers.
pub struct HandlerContext {
    /// Server configuration.
    pub config: ServerConfig,
    /// The commit log (shared with the embedding process).
    pub log: Arc<Log>,
}

impl HandlerContext {
    /// Creates a new handler context.
    pub fn new(config: ServerConfig, log: Arc<Log>) -> Self {
        Self { config, log }
    }
}

/// Handler for produce and consume requests.
#[derive(Clone)]
pub struct RequestHandler {
    context: Arc<HandlerContext>,
}

impl RequestHandler {
    /// Creates a new request handler.
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self { context }
    }

    /// Handles a produce request: appends the record and returns the
    /// offset the engine assigned.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for oversized payloads, or a storage
    /// error from the engine.
    pub fn handle_produce(&self, request: ProduceRequest) -> ServerResult<ProduceResponse> {
        if request.record.value.len() > self.context.config.max_record_bytes {
            return Err(ServerError::InvalidRequest(format!(
                "record too large: {} > {} bytes",
                request.record.value.len(),
                self.context.config.max_record_bytes
            )));
        }

        let mut record = Record::from(request.record);
        let offset = self.context.log.append(&mut record)?;
        debug!(offset, bytes = record.value.len(), "produced record");

        Ok(ProduceResponse { offset })
    }

    /// Handles a consume request: reads the record at the requested
    /// offset.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the offset is outside the log's bounds;
    /// any other engine failure surfaces as a storage error.
    pub fn handle_consume(&self, request: ConsumeRequest) -> ServerResult<ConsumeResponse> {
        let record = self.context.log.read(request.offset).map_err(|err| {
            if err.is_out_of_range() {
                ServerError::NotFound {
                    offset: request.offset,
                }
            } else {
                ServerError::Storage(err)
            }
        })?;

        Ok(ConsumeResponse {
            record: record.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordPayload;
    use seglog_core::Config;
    use tempfile::tempdir;

    fn make_handler(dir: &std::path::Path, config: ServerConfig) -> RequestHandler {
        let log = Arc::new(Log::open(dir, Config::default()).unwrap());
        RequestHandler::new(Arc::new(HandlerContext::new(config, log)))
    }

    #[test]
    fn produce_then_consume() {
        let dir = tempdir().unwrap();
        let handler = make_handler(dir.path(), ServerConfig::default());

        let response = handler
            .handle_produce(ProduceRequest {
                record: RecordPayload::new(b"hello".to_vec()),
            })
            .unwrap();
        assert_eq!(response.offset, 0);

        let response = handler
            .handle_consume(ConsumeRequest { offset: 0 })
            .unwrap();
        assert_eq!(response.record.value, b"hello");
        assert_eq!(response.record.offset, 0);
    }

    #[test]
    fn caller_offset_is_overwritten() {
        let dir = tempdir().unwrap();
        let handler = make_handler(dir.path(), ServerConfig::default());

        let response = handler
            .handle_produce(ProduceRequest {
                record: RecordPayload {
                    value: b"x".to_vec(),
                    offset: 999,
                },
            })
            .unwrap();
        assert_eq!(response.offset, 0);
    }

    #[test]
    fn consume_missing_offset_is_not_found() {
        let dir = tempdir().unwrap();
        let handler = make_handler(dir.path(), ServerConfig::default());

        let err = handler
            .handle_consume(ConsumeRequest { offset: 5 })
            .unwrap_err();
        assert!(matches!(err, ServerError::NotFound { offset: 5 }));
        assert!(err.is_client_error());
    }

    #[test]
    fn oversized_record_rejected() {
        let dir = tempdir().unwrap();
        let config = ServerConfig::default().with_max_record_bytes(4);
        let handler = make_handler(dir.path(), config);

        let err = handler
            .handle_produce(ProduceRequest {
                record: RecordPayload::new(vec![0u8; 5]),
            })
            .unwrap_err();
        assert!(matches!(err, ServerError::InvalidRequest(_)));
    }
}
