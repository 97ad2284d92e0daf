//! Streaming consume: poll forward, wait on offsets not yet written.

use crate::error::{ServerError, ServerResult};
use crate::handler::RequestHandler;
use crate::types::{ConsumeRequest, ConsumeResponse};
use std::time::Duration;
use tracing::trace;

/// A consume stream that advances through the log one record at a time.
///
/// Each call to [`ConsumeStream::next`] reads the current offset and then
/// advances. An offset that has not been written yet is not a terminal
/// error: the stream sleeps for the configured poll interval and retries,
/// so a consumer can tail the log while producers keep appending. Every
/// other error ends the stream.
pub struct ConsumeStream {
    handler: RequestHandler,
    offset: u64,
    poll_interval: Duration,
}

impl ConsumeStream {
    pub(crate) fn new(handler: RequestHandler, offset: u64, poll_interval: Duration) -> Self {
        Self {
            handler,
            offset,
            poll_interval,
        }
    }

    /// The offset the next call will read.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Reads the record at the stream's current offset, waiting for it to
    /// be written if necessary.
    ///
    /// # Errors
    ///
    /// Returns any handler error other than not-found.
    pub async fn next(&mut self) -> ServerResult<ConsumeResponse> {
        loop {
            match self.handler.handle_consume(ConsumeRequest {
                offset: self.offset,
            }) {
                Ok(response) => {
                    self.offset += 1;
                    return Ok(response);
                }
                Err(ServerError::NotFound { offset }) => {
                    trace!(offset, "offset not yet written; polling");
                    tokio::time::sleep(self.poll_interval).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::server::LogServer;
    use crate::types::{ProduceRequest, RecordPayload};
    use seglog_core::{Config, Log};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn make_server(dir: &std::path::Path) -> LogServer {
        let log = Arc::new(Log::open(dir, Config::default()).unwrap());
        let config = ServerConfig::default().with_poll_interval(Duration::from_millis(5));
        LogServer::new(config, log)
    }

    #[tokio::test]
    async fn streams_existing_records_in_order() {
        let dir = tempdir().unwrap();
        let server = make_server(dir.path());

        for i in 0..3u8 {
            server
                .handle_produce(ProduceRequest {
                    record: RecordPayload::new(vec![i]),
                })
                .unwrap();
        }

        let mut stream = server.consume_stream(0);
        for i in 0..3u8 {
            let response = stream.next().await.unwrap();
            assert_eq!(response.record.offset, u64::from(i));
            assert_eq!(response.record.value, vec![i]);
        }
        assert_eq!(stream.offset(), 3);
    }

    #[tokio::test]
    async fn waits_for_records_written_later() {
        let dir = tempdir().unwrap();
        let server = Arc::new(make_server(dir.path()));

        let mut stream = server.consume_stream(0);

        let producer = Arc::clone(&server);
        let writer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            producer
                .handle_produce(ProduceRequest {
                    record: RecordPayload::new(b"late".to_vec()),
                })
                .unwrap();
        });

        // next() blocks until the producer catches up.
        let response = stream.next().await.unwrap();
        assert_eq!(response.record.value, b"late");
        writer.await.unwrap();
    }
}
