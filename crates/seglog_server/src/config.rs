//! Server configuration.

use std::net::SocketAddr;
use std::time::Duration;

/// Configuration for the service adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address a transport embedding this adapter should bind to.
    pub bind_addr: SocketAddr,
    /// Maximum accepted record payload size.
    pub max_record_bytes: usize,
    /// How long a consume stream waits before re-polling an offset that
    /// has not been written yet.
    pub poll_interval: Duration,
}

impl ServerConfig {
    /// Creates a new server configuration.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            max_record_bytes: 1024 * 1024,
            poll_interval: Duration::from_millis(100),
        }
    }

    /// Sets the maximum accepted record payload size.
    #[must_use]
    pub fn with_max_record_bytes(mut self, max: usize) -> Self {
        self.max_record_bytes = max;
        self
    }

    /// Sets the consume stream poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 8080)))
    }
}
