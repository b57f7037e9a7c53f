//! Frame table - the fixed array of frames plus its page index.
//!
//! Occupancy and the index are changed together by [`FrameTable::install`],
//! so a frame is occupied exactly when the index has an entry for it.

use crate::buffer::frame::Frame;
use crate::buffer::page_index::PageIndex;
use crate::common::{FrameId, PageId};
use crate::storage::Page;

pub(crate) struct FrameTable {
    frames: Vec<Frame>,
    index: PageIndex,
    /// Empty slots are handed out in ascending order; everything from here
    /// on has never been filled.
    next_free: usize,
}

impl FrameTable {
    /// Allocate `capacity` empty frames.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            frames: (0..capacity).map(|_| Frame::new()).collect(),
            index: PageIndex::with_capacity(capacity),
            next_free: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub(crate) fn lookup(&self, page_id: PageId) -> Option<FrameId> {
        self.index.get(page_id)
    }

    #[inline]
    pub(crate) fn frame(&self, frame_id: FrameId) -> &Frame {
        &self.frames[frame_id.index()]
    }

    #[inline]
    pub(crate) fn frame_mut(&mut self, frame_id: FrameId) -> &mut Frame {
        &mut self.frames[frame_id.index()]
    }

    #[inline]
    pub(crate) fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Mutable view for the replacers. They only touch reference bits.
    #[inline]
    pub(crate) fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    /// The next never-used slot, if the table is not yet full.
    #[inline]
    pub(crate) fn next_free_slot(&self) -> Option<FrameId> {
        (self.next_free < self.frames.len()).then(|| FrameId::new(self.next_free))
    }

    /// Whether any occupied frame has a fix count of zero.
    pub(crate) fn has_evictable(&self) -> bool {
        self.frames.iter().any(Frame::is_evictable)
    }

    pub(crate) fn pinned_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_pinned()).count()
    }

    /// Number of cached pages.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    /// Load `page_id` into `frame_id`, replacing whatever it held.
    ///
    /// Returns the page that was displaced, if any.
    pub(crate) fn install(
        &mut self,
        frame_id: FrameId,
        page_id: PageId,
        data: &Page,
        stamp: u64,
    ) -> Option<PageId> {
        let frame = &mut self.frames[frame_id.index()];
        let evicted = frame.page_id();
        debug_assert!(!frame.is_pinned(), "installing into pinned {}", frame_id);

        if let Some(old) = evicted {
            self.index.remove(old);
        }
        frame.load(page_id, data, stamp);
        self.index.insert(page_id, frame_id);

        if frame_id.0 == self.next_free {
            self.next_free += 1;
        }
        evicted
    }

    /// Check that the index and frame occupancy agree.
    pub(crate) fn is_consistent(&self) -> bool {
        let occupied = self.frames.iter().filter(|f| !f.is_empty()).count();
        occupied == self.index.len()
            && self
                .index
                .iter()
                .all(|(pid, fid)| self.frames[fid.index()].page_id() == Some(pid))
    }
}
