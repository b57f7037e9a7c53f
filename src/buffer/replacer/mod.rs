//! Eviction policy implementations (replacers).
//!
//! Implements:
//! - [`FifoReplacer`] - Rotating cursor over the slots
//! - [`LruReplacer`] - Least Recently Used
//! - [`ClockReplacer`] - Second chance
//! - [`LfuReplacer`] - Least Frequently Used
//!
//! A replacer is only consulted when every frame holds a page. It must never
//! return a pinned frame.

mod clock;
mod fifo;
mod lfu;
mod lru;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::buffer::Frame;
use crate::common::FrameId;

pub use clock::ClockReplacer;
pub use fifo::FifoReplacer;
pub use lfu::LfuReplacer;
pub use lru::LruReplacer;

/// Victim selection over the pool's frames.
pub trait Replacer {
    /// Pick a frame with a fix count of zero, or `None` if there is none.
    ///
    /// Implementations read the bookkeeping kept on each frame. CLOCK also
    /// clears reference bits as its hand passes them.
    fn victim(&mut self, frames: &mut [Frame]) -> Option<FrameId>;

    /// The strategy this replacer implements.
    fn strategy(&self) -> ReplacementStrategy;
}

/// The built-in replacement policies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementStrategy {
    #[default]
    Fifo,
    Lru,
    Clock,
    Lfu,
}

impl ReplacementStrategy {
    /// Every built-in strategy.
    pub const ALL: [ReplacementStrategy; 4] = [
        ReplacementStrategy::Fifo,
        ReplacementStrategy::Lru,
        ReplacementStrategy::Clock,
        ReplacementStrategy::Lfu,
    ];

    /// Construct the replacer for this strategy.
    pub fn build(self) -> Box<dyn Replacer> {
        match self {
            ReplacementStrategy::Fifo => Box::new(FifoReplacer::new()),
            ReplacementStrategy::Lru => Box::new(LruReplacer),
            ReplacementStrategy::Clock => Box::new(ClockReplacer::new()),
            ReplacementStrategy::Lfu => Box::new(LfuReplacer),
        }
    }
}

impl fmt::Display for ReplacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReplacementStrategy::Fifo => "FIFO",
            ReplacementStrategy::Lru => "LRU",
            ReplacementStrategy::Clock => "CLOCK",
            ReplacementStrategy::Lfu => "LFU",
        };
        f.write_str(name)
    }
}

/// Index of the unpinned frame with the smallest `key`.
///
/// Scans in slot order; a later frame only wins with a strictly smaller key.
pub(crate) fn min_unpinned_by<K, F>(frames: &[Frame], key: F) -> Option<FrameId>
where
    K: Ord,
    F: Fn(&Frame) -> K,
{
    let mut best: Option<(usize, K)> = None;
    for (idx, frame) in frames.iter().enumerate() {
        if !frame.is_evictable() {
            continue;
        }
        let k = key(frame);
        let better = match &best {
            Some((_, best_key)) => k < *best_key,
            None => true,
        };
        if better {
            best = Some((idx, k));
        }
    }
    best.map(|(idx, _)| FrameId::new(idx))
}
