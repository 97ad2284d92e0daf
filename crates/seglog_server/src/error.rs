//! Error types for the service adapter.

use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur in the service adapter.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Invalid request format or content.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No record exists at the requested offset.
    ///
    /// Maps the engine's out-of-range condition; transports should
    /// surface this as "not found", never as an internal error.
    #[error("no record at offset {offset}")]
    NotFound {
        /// The offset that was requested.
        offset: u64,
    },

    /// Engine failure (I/O, corruption, capacity).
    #[error("storage error: {0}")]
    Storage(#[from] seglog_core::LogError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServerError::InvalidRequest(_) | ServerError::NotFound { .. }
        )
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_classification() {
        assert!(ServerError::NotFound { offset: 1 }.is_client_error());
        assert!(ServerError::InvalidRequest("bad".into()).is_client_error());
        assert!(ServerError::Internal("oops".into()).is_server_error());
        assert!(
            ServerError::Storage(seglog_core::LogError::IndexFull).is_server_error()
        );
    }

    #[test]
    fn error_display() {
        let err = ServerError::NotFound { offset: 17 };
        assert!(err.to_string().contains("17"));
    }
}
