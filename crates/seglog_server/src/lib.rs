//! # seglog server
//!
//! Produce/consume service adapter over the seglog engine.
//!
//! This crate provides:
//! - Transport-agnostic request handlers (produce, consume)
//! - Streaming variants: sequential produce streams and a consume stream
//!   that polls forward and treats "not yet written" as wait, not error
//! - serde wire types for embedding behind an HTTP or RPC transport
//!
//! # Architecture
//!
//! The adapter consumes the engine only through its public operations:
//! append a record, read a record by offset, and the offset metadata
//! queries. HTTP/RPC framing is left to the embedder; handlers here
//! accept and return plain request/response types, the same way a real
//! deployment would call them from its route handlers.
//!
//! ```no_run
//! use seglog_core::{Config, Log};
//! use seglog_server::{LogServer, ProduceRequest, RecordPayload, ServerConfig};
//! use std::sync::Arc;
//!
//! let log = Arc::new(Log::open("/var/lib/seglog".as_ref(), Config::default())?);
//! let server = LogServer::new(ServerConfig::default(), log);
//!
//! let response = server.handle_produce(ProduceRequest {
//!     record: RecordPayload::new(b"hello".to_vec()),
//! })?;
//! println!("assigned offset {}", response.offset);
//! # Ok::<(), seglog_server::ServerError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod handler;
mod server;
mod stream;
mod types;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{HandlerContext, RequestHandler};
pub use server::LogServer;
pub use stream::ConsumeStream;
pub use types::{
    ConsumeRequest, ConsumeResponse, LogMessage, ProduceRequest, ProduceResponse, RecordPayload,
};
