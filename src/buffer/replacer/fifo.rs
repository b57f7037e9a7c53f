//! FIFO (First-In-First-Out) replacement policy.

use crate::buffer::replacer::{ReplacementStrategy, Replacer};
use crate::buffer::Frame;
use crate::common::FrameId;

/// Evicts pages in slot-rotation order.
///
/// A cursor starts at slot 0 (the slot after the last one filled, since
/// empty slots are filled in ascending order) and moves one past every
/// victim. Pinned frames are skipped. Re-accessing a page does not move it.
#[derive(Debug, Default)]
pub struct FifoReplacer {
    /// Slot the next scan starts from.
    cursor: usize,
}

impl FifoReplacer {
    /// Create a new FIFO replacer.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Replacer for FifoReplacer {
    fn victim(&mut self, frames: &mut [Frame]) -> Option<FrameId> {
        let n = frames.len();
        for offset in 0..n {
            let idx = (self.cursor + offset) % n;
            if frames[idx].is_evictable() {
                self.cursor = (idx + 1) % n;
                return Some(FrameId::new(idx));
            }
        }
        None
    }

    fn strategy(&self) -> ReplacementStrategy {
        ReplacementStrategy::Fifo
    }
}
