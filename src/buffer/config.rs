//! Buffer pool construction parameters.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::buffer::replacer::ReplacementStrategy;
use crate::common::config::DEFAULT_POOL_SIZE;
use crate::common::{Error, Result};

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

/// Everything needed to open a [`BufferPool`](super::BufferPool) over a
/// page file.
///
/// Can be deserialized from any serde format:
/// ```
/// use pagepool::{BufferPoolConfig, ReplacementStrategy};
///
/// let config = BufferPoolConfig::new("data.bin")
///     .with_pool_size(8)
///     .with_strategy(ReplacementStrategy::Clock);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferPoolConfig {
    /// Page file backing the pool.
    pub page_file: PathBuf,

    /// Number of frames (must be > 0).
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Replacement policy, fixed for the pool's lifetime.
    #[serde(default)]
    pub strategy: ReplacementStrategy,

    /// Opaque policy parameters. None of the built-in policies read it.
    #[serde(default)]
    pub strategy_data: Option<String>,
}

impl BufferPoolConfig {
    /// A config for `page_file` with the default size and FIFO replacement.
    pub fn new<P: AsRef<Path>>(page_file: P) -> Self {
        Self {
            page_file: page_file.as_ref().to_path_buf(),
            pool_size: DEFAULT_POOL_SIZE,
            strategy: ReplacementStrategy::default(),
            strategy_data: None,
        }
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_strategy(mut self, strategy: ReplacementStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_strategy_data(mut self, data: impl Into<String>) -> Self {
        self.strategy_data = Some(data.into());
        self
    }

    /// Reject configurations the pool cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(Error::InvalidPoolSize(self.pool_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = BufferPoolConfig::new("pool.bin")
            .with_pool_size(3)
            .with_strategy(ReplacementStrategy::Lfu)
            .with_strategy_data("k=2");

        assert_eq!(config.page_file, PathBuf::from("pool.bin"));
        assert_eq!(config.pool_size, 3);
        assert_eq!(config.strategy, ReplacementStrategy::Lfu);
        assert_eq!(config.strategy_data.as_deref(), Some("k=2"));
    }

    #[test]
    fn test_defaults() {
        let config = BufferPoolConfig::new("pool.bin");
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(config.strategy, ReplacementStrategy::Fifo);
        assert!(config.strategy_data.is_none());
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        let config = BufferPoolConfig::new("pool.bin").with_pool_size(0);
        assert!(matches!(config.validate(), Err(Error::InvalidPoolSize(0))));
    }

    #[test]
    fn test_deserialize_lowercase_strategy() {
        let config: BufferPoolConfig =
            serde_json::from_str(r#"{ "page_file": "db.bin", "pool_size": 3, "strategy": "clock" }"#)
                .unwrap();
        assert_eq!(config.strategy, ReplacementStrategy::Clock);
        assert_eq!(config.pool_size, 3);

        let config: BufferPoolConfig = serde_json::from_str(r#"{ "page_file": "db.bin" }"#).unwrap();
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(config.strategy, ReplacementStrategy::Fifo);
    }
}
