//! Buffer pool statistics tracking.

use std::fmt;

/// Counters kept by the buffer pool since it was created.
///
/// The pool is single-threaded, so these are plain integers; the pool hands
/// out copies via [`BufferPool::stats`](super::BufferPool::stats).
///
/// # Example
/// ```
/// use pagepool::BufferPoolStats;
///
/// let stats = BufferPoolStats {
///     cache_hits: 3,
///     cache_misses: 1,
///     ..Default::default()
/// };
/// assert_eq!(stats.hit_rate(), 0.75);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BufferPoolStats {
    /// Pins served from an already cached frame.
    pub cache_hits: u64,

    /// Pins that had to load the page.
    pub cache_misses: u64,

    /// Pages displaced to make room for another.
    pub evictions: u64,

    /// Blocks read from storage.
    pub pages_read: u64,

    /// Blocks written to storage.
    pub pages_written: u64,
}

impl BufferPoolStats {
    /// Calculate cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}

impl fmt::Display for BufferPoolStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ hits: {}, misses: {}, evictions: {}, reads: {}, writes: {}, hit_rate: {:.2}% }}",
            self.cache_hits,
            self.cache_misses,
            self.evictions,
            self.pages_read,
            self.pages_written,
            self.hit_rate() * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = BufferPoolStats::default();
        assert_eq!(stats.cache_hits, 0);
        assert_eq!(stats.pages_written, 0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_stats_hit_rate() {
        let stats = BufferPoolStats {
            cache_hits: 7,
            cache_misses: 3,
            ..Default::default()
        };
        assert_eq!(stats.hit_rate(), 0.7);
    }

    #[test]
    fn test_stats_display() {
        let stats = BufferPoolStats {
            cache_hits: 80,
            cache_misses: 20,
            evictions: 5,
            pages_read: 20,
            pages_written: 4,
        };

        let display = format!("{}", stats);
        assert!(display.contains("hits: 80"));
        assert!(display.contains("misses: 20"));
        assert!(display.contains("writes: 4"));
        assert!(display.contains("80.00%"));
    }
}
