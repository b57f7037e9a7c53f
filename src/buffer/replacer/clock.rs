//! CLOCK (second chance) replacement policy.

use crate::buffer::replacer::{ReplacementStrategy, Replacer};
use crate::buffer::Frame;
use crate::common::FrameId;

/// Sweeps a hand around the slots, giving referenced frames a second chance.
///
/// At each frame the hand visits:
/// 1. If the reference bit is set, clear it and move on
/// 2. Else if the frame is unpinned, select it and park the hand after it
/// 3. Else move on
///
/// Reference bits of pinned frames are cleared too. The first full sweep
/// clears every bit, so two sweeps always find an unpinned frame if one
/// exists.
#[derive(Debug, Default)]
pub struct ClockReplacer {
    /// Slot the hand points at.
    hand: usize,
}

impl ClockReplacer {
    /// Create a new clock replacer with the hand at slot 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current hand position.
    pub fn hand(&self) -> usize {
        self.hand
    }
}

impl Replacer for ClockReplacer {
    fn victim(&mut self, frames: &mut [Frame]) -> Option<FrameId> {
        let n = frames.len();
        if n == 0 || !frames.iter().any(Frame::is_evictable) {
            return None;
        }

        for _ in 0..2 * n {
            let idx = self.hand;
            self.hand = (self.hand + 1) % n;

            let frame = &mut frames[idx];
            if frame.reference_bit() {
                frame.clear_reference_bit();
            } else if frame.is_evictable() {
                return Some(FrameId::new(idx));
            }
        }
        None
    }

    fn strategy(&self) -> ReplacementStrategy {
        ReplacementStrategy::Clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::replacer::test_util::unpinned_frames;

    #[test]
    fn test_clock_second_pass_takes_first_slot() {
        let mut frames = unpinned_frames(2);
        let mut replacer = ClockReplacer::new();

        assert_eq!(replacer.victim(&mut frames), Some(FrameId::new(0)));
        assert_eq!(replacer.hand(), 1);
        assert!(!frames[1].reference_bit());
    }

    #[test]
    fn test_clock_gives_referenced_frame_second_chance() {
        let mut frames = unpinned_frames(3);
        for frame in frames.iter_mut() {
            frame.clear_reference_bit();
        }
        frames[0].pin(10);
        frames[0].unpin();

        let mut replacer = ClockReplacer::new();
        assert_eq!(replacer.victim(&mut frames), Some(FrameId::new(1)));
        assert!(!frames[0].reference_bit());
        assert_eq!(replacer.hand(), 2);
    }

    #[test]
    fn test_clock_hand_persists_and_wraps() {
        let mut frames = unpinned_frames(3);
        for frame in frames.iter_mut() {
            frame.clear_reference_bit();
        }
        let mut replacer = ClockReplacer::new();

        assert_eq!(replacer.victim(&mut frames), Some(FrameId::new(0)));
        assert_eq!(replacer.victim(&mut frames), Some(FrameId::new(1)));
        assert_eq!(replacer.victim(&mut frames), Some(FrameId::new(2)));
        assert_eq!(replacer.hand(), 0);
        assert_eq!(replacer.victim(&mut frames), Some(FrameId::new(0)));
    }

    #[test]
    fn test_clock_clears_bits_of_pinned_frames() {
        let mut frames = unpinned_frames(2);
        frames[0].pin(10);

        let mut replacer = ClockReplacer::new();
        assert_eq!(replacer.victim(&mut frames), Some(FrameId::new(1)));
        assert!(!frames[0].reference_bit());
    }

    #[test]
    fn test_clock_all_pinned_leaves_bits_alone() {
        let mut frames = unpinned_frames(2);
        frames[0].pin(10);
        frames[1].pin(11);

        let mut replacer = ClockReplacer::new();
        assert_eq!(replacer.victim(&mut frames), None);
        assert!(frames[0].reference_bit());
        assert_eq!(replacer.hand(), 0);
    }
}
