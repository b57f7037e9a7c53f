//! Checked handles to pinned pages.

use crate::common::{FrameId, PageId};

/// Token returned by [`BufferPool::pin`](super::BufferPool::pin).
///
/// A handle is not a borrow. It records which frame held the page and that
/// frame's generation at pin time; the pool checks both on every
/// [`page`](super::BufferPool::page) / [`page_mut`](super::BufferPool::page_mut)
/// call and returns `Error::StaleHandle` once the frame has been reloaded
/// with another page.
///
/// # Example
/// ```ignore
/// let handle = pool.pin(PageId::new(0))?;
/// pool.page_mut(&handle)?.as_mut_slice()[0] = 0xAB;
/// pool.mark_dirty(handle.page_id())?;
/// pool.unpin(handle.page_id())?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageHandle {
    page_id: PageId,
    frame_id: FrameId,
    generation: u64,
}

impl PageHandle {
    pub(crate) fn new(page_id: PageId, frame_id: FrameId, generation: u64) -> Self {
        Self {
            page_id,
            frame_id,
            generation,
        }
    }

    /// Get the page ID.
    #[inline]
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Get the frame ID.
    #[inline]
    pub fn frame_id(&self) -> FrameId {
        self.frame_id
    }

    #[inline]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}
