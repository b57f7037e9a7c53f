//! LFU (Least Frequently Used) replacement policy.

use crate::buffer::replacer::{min_unpinned_by, ReplacementStrategy, Replacer};
use crate::buffer::Frame;
use crate::common::FrameId;

/// Evicts the unpinned frame pinned the fewest times since it was loaded.
///
/// Ties go to the lowest slot.
#[derive(Debug, Default, Clone, Copy)]
pub struct LfuReplacer;

impl Replacer for LfuReplacer {
    fn victim(&mut self, frames: &mut [Frame]) -> Option<FrameId> {
        min_unpinned_by(frames, Frame::use_count)
    }

    fn strategy(&self) -> ReplacementStrategy {
        ReplacementStrategy::Lfu
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::replacer::test_util::unpinned_frames;

    #[test]
    fn test_lfu_picks_lowest_use_count() {
        let mut frames = unpinned_frames(3);
        for idx in [0, 2] {
            frames[idx].pin(10);
            frames[idx].unpin();
        }
        assert_eq!(LfuReplacer.victim(&mut frames), Some(FrameId::new(1)));
    }

    #[test]
    fn test_lfu_equal_counts_keep_first() {
        let mut frames = unpinned_frames(3);
        frames[0].pin(10);
        frames[0].unpin();
        // Frames 1 and 2 both have use_count 1
        assert_eq!(LfuReplacer.victim(&mut frames), Some(FrameId::new(1)));
    }

    #[test]
    fn test_lfu_ignores_pinned_cold_frame() {
        let mut frames = unpinned_frames(2);
        frames[1].pin(10);
        frames[1].pin(11);
        frames[1].unpin();
        frames[1].unpin();
        // Frame 0 is coldest but pinned
        frames[0].pin(12);
        assert_eq!(frames[0].use_count(), 2);
        assert_eq!(LfuReplacer.victim(&mut frames), Some(FrameId::new(1)));
    }
}
