//! LRU (Least Recently Used) replacement policy.

use crate::buffer::replacer::{min_unpinned_by, ReplacementStrategy, Replacer};
use crate::buffer::Frame;
use crate::common::FrameId;

/// Evicts the unpinned frame with the oldest recency stamp.
///
/// Ties go to the lowest slot.
#[derive(Debug, Default, Clone, Copy)]
pub struct LruReplacer;

impl Replacer for LruReplacer {
    fn victim(&mut self, frames: &mut [Frame]) -> Option<FrameId> {
        min_unpinned_by(frames, Frame::last_used)
    }

    fn strategy(&self) -> ReplacementStrategy {
        ReplacementStrategy::Lru
    }
}
