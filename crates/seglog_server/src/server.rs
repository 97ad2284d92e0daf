//! The service facade.

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::{HandlerContext, RequestHandler};
use crate::stream::ConsumeStream;
use crate::types::{
    ConsumeRequest, ConsumeResponse, LogMessage, ProduceRequest, ProduceResponse,
};
use seglog_core::Log;
use std::sync::Arc;

/// The produce/consume server.
///
/// Wraps the commit log behind request handlers a transport can call.
/// A real deployment exposes HTTP or RPC endpoints that delegate to
/// [`LogServer::handle_produce`], [`LogServer::handle_consume`], and the
/// streaming variants.
pub struct LogServer {
    handler: RequestHandler,
    context: Arc<HandlerContext>,
}

impl LogServer {
    /// Creates a new server over a shared log.
    pub fn new(config: ServerConfig, log: Arc<Log>) -> Self {
        let context = Arc::new(HandlerContext::new(config, log));
        let handler = RequestHandler::new(Arc::clone(&context));

        Self { handler, context }
    }

    /// Handles a produce request.
    pub fn handle_produce(&self, request: ProduceRequest) -> ServerResult<ProduceResponse> {
        self.handler.handle_produce(request)
    }

    /// Handles a consume request.
    pub fn handle_consume(&self, request: ConsumeRequest) -> ServerResult<ConsumeResponse> {
        self.handler.handle_consume(request)
    }

    /// Handles a request message, dispatching to the matching handler.
    pub fn handle_message(&self, message: LogMessage) -> ServerResult<LogMessage> {
        match message {
            LogMessage::ProduceRequest(req) => self
                .handle_produce(req)
                .map(LogMessage::ProduceResponse),
            LogMessage::ConsumeRequest(req) => self
                .handle_consume(req)
                .map(LogMessage::ConsumeResponse),
            _ => Err(ServerError::InvalidRequest(
                "expected a request message".into(),
            )),
        }
    }

    /// Handles a continuous produce stream: one response per request, in
    /// order. The first failure aborts the stream.
    pub fn produce_stream(
        &self,
        requests: impl IntoIterator<Item = ProduceRequest>,
    ) -> ServerResult<Vec<ProduceResponse>> {
        let mut responses = Vec::new();
        for request in requests {
            responses.push(self.handle_produce(request)?);
        }
        Ok(responses)
    }

    /// Returns a consume stream that polls forward from `offset`.
    ///
    /// The stream treats a not-yet-written offset as "wait and poll
    /// again" rather than a terminal error.
    pub fn consume_stream(&self, offset: u64) -> ConsumeStream {
        ConsumeStream::new(
            self.handler.clone(),
            offset,
            self.context.config.poll_interval,
        )
    }

    /// The lowest offset currently held by the log.
    pub fn lowest_offset(&self) -> u64 {
        self.context.log.lowest_offset()
    }

    /// The highest offset currently held by the log.
    pub fn highest_offset(&self) -> u64 {
        self.context.log.highest_offset()
    }
}
