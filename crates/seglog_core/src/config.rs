//! Engine configuration.

/// Configuration for opening a log.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum size of a segment's store file before rotation.
    pub max_store_bytes: u64,

    /// Maximum size of a segment's index file before rotation.
    pub max_index_bytes: u64,

    /// Base offset of the first segment of a fresh log.
    pub initial_offset: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_store_bytes: 4 * 1024 * 1024, // 4 MB
            max_index_bytes: 1024 * 1024,     // 1 MB (~87k entries)
            initial_offset: 0,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum store file size per segment.
    #[must_use]
    pub const fn max_store_bytes(mut self, size: u64) -> Self {
        self.max_store_bytes = size;
        self
    }

    /// Sets the maximum index file size per segment.
    #[must_use]
    pub const fn max_index_bytes(mut self, size: u64) -> Self {
        self.max_index_bytes = size;
        self
    }

    /// Sets the base offset of the first segment of a fresh log.
    #[must_use]
    pub const fn initial_offset(mut self, offset: u64) -> Self {
        self.initial_offset = offset;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.max_store_bytes, 4 * 1024 * 1024);
        assert_eq!(config.initial_offset, 0);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .max_store_bytes(32)
            .max_index_bytes(36)
            .initial_offset(7);

        assert_eq!(config.max_store_bytes, 32);
        assert_eq!(config.max_index_bytes, 36);
        assert_eq!(config.initial_offset, 7);
    }
}
