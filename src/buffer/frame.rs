//! Frame - a slot in the buffer pool.
//!
//! A [`Frame`] holds a [`Page`] plus metadata needed for buffer management:
//! - Which page is loaded (if any)
//! - Fix count for reference counting
//! - Dirty flag for write-back tracking
//! - Recency stamp, reference bit and use count for the replacers
//! - A generation number that invalidates stale handles

use crate::common::PageId;
use crate::storage::Page;

/// A frame in the buffer pool.
///
/// The pool allocates a fixed number of frames at startup. The recency
/// stamp, reference bit and use count are maintained on every frame no
/// matter which replacement policy is active.
pub struct Frame {
    /// The cached page content.
    page: Page,

    /// Which page is currently loaded, or None if the frame is empty.
    page_id: Option<PageId>,

    /// Whether the page has been modified since it was loaded or written.
    is_dirty: bool,

    /// Number of outstanding pins.
    fix_count: u32,

    /// Logical time of the most recent pin (LRU).
    last_used: u64,

    /// Set on every pin, cleared by the CLOCK sweep.
    reference_bit: bool,

    /// Pins since the page was loaded (LFU).
    use_count: u64,

    /// Bumped each time a page is loaded into this frame.
    generation: u64,
}

impl Frame {
    /// Create a new empty frame.
    pub fn new() -> Self {
        Self {
            page: Page::new(),
            page_id: None,
            is_dirty: false,
            fix_count: 0,
            last_used: 0,
            reference_bit: false,
            use_count: 0,
            generation: 0,
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// The cached page content.
    #[inline]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The loaded page, or None if the frame is empty.
    #[inline]
    pub fn page_id(&self) -> Option<PageId> {
        self.page_id
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    #[inline]
    pub fn fix_count(&self) -> u32 {
        self.fix_count
    }

    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.fix_count > 0
    }

    #[inline]
    pub fn last_used(&self) -> u64 {
        self.last_used
    }

    #[inline]
    pub fn reference_bit(&self) -> bool {
        self.reference_bit
    }

    #[inline]
    pub fn use_count(&self) -> u64 {
        self.use_count
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Check if the frame is empty (no page loaded).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.page_id.is_none()
    }

    /// Check if the frame can be chosen as an eviction victim.
    #[inline]
    pub fn is_evictable(&self) -> bool {
        self.page_id.is_some() && !self.is_pinned()
    }

    // ========================================================================
    // Mutation (buffer pool only)
    // ========================================================================

    #[inline]
    pub(crate) fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Record a pin on an already loaded page. Returns the new fix count.
    pub(crate) fn pin(&mut self, stamp: u64) -> u32 {
        self.fix_count += 1;
        self.last_used = stamp;
        self.reference_bit = true;
        self.use_count += 1;
        self.fix_count
    }

    /// Drop one pin. Returns the new fix count.
    ///
    /// Unpinning a frame that is not pinned leaves it at zero.
    pub(crate) fn unpin(&mut self) -> u32 {
        self.fix_count = self.fix_count.saturating_sub(1);
        self.fix_count
    }

    /// Load `page_id` with `data`, pinned once by the caller.
    pub(crate) fn load(&mut self, page_id: PageId, data: &Page, stamp: u64) {
        self.page.copy_from(data);
        self.page_id = Some(page_id);
        self.is_dirty = false;
        self.fix_count = 1;
        self.last_used = stamp;
        self.reference_bit = true;
        self.use_count = 1;
        self.generation += 1;
    }

    #[inline]
    pub(crate) fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    #[inline]
    pub(crate) fn clear_dirty(&mut self) {
        self.is_dirty = false;
    }

    #[inline]
    pub(crate) fn clear_reference_bit(&mut self) {
        self.reference_bit = false;
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(page_id: u32, stamp: u64) -> Frame {
        let mut frame = Frame::new();
        frame.load(PageId::new(page_id), &Page::new(), stamp);
        frame
    }

    #[test]
    fn test_frame_new() {
        let frame = Frame::new();
        assert!(frame.is_empty());
        assert!(!frame.is_pinned());
        assert!(!frame.is_dirty());
        assert!(!frame.reference_bit());
        assert_eq!(frame.fix_count(), 0);
        assert_eq!(frame.last_used(), 0);
        assert_eq!(frame.use_count(), 0);
        assert_eq!(frame.generation(), 0);
        assert_eq!(frame.page_id(), None);
    }

    #[test]
    fn test_frame_load() {
        let mut data = Page::new();
        data.as_mut_slice()[7] = 0x99;

        let mut frame = Frame::new();
        frame.mark_dirty();
        frame.load(PageId::new(4), &data, 12);

        assert_eq!(frame.page_id(), Some(PageId::new(4)));
        assert_eq!(frame.page().as_slice()[7], 0x99);
        assert!(!frame.is_dirty());
        assert_eq!(frame.fix_count(), 1);
        assert_eq!(frame.last_used(), 12);
        assert!(frame.reference_bit());
        assert_eq!(frame.use_count(), 1);
        assert_eq!(frame.generation(), 1);
    }

    #[test]
    fn test_frame_pin_updates_bookkeeping() {
        let mut frame = loaded(1, 1);
        frame.clear_reference_bit();

        assert_eq!(frame.pin(5), 2);
        assert_eq!(frame.last_used(), 5);
        assert!(frame.reference_bit());
        assert_eq!(frame.use_count(), 2);
        assert_eq!(frame.generation(), 1);
    }

    #[test]
    fn test_frame_unpin_never_underflows() {
        let mut frame = loaded(1, 1);
        assert_eq!(frame.unpin(), 0);
        assert_eq!(frame.unpin(), 0);
        assert!(!frame.is_pinned());
    }

    #[test]
    fn test_reload_resets_use_count() {
        let mut frame = loaded(1, 1);
        frame.pin(2);
        frame.pin(3);
        assert_eq!(frame.use_count(), 3);

        frame.load(PageId::new(2), &Page::new(), 4);
        assert_eq!(frame.use_count(), 1);
        assert_eq!(frame.generation(), 2);
    }

    #[test]
    fn test_frame_evictable() {
        let mut frame = Frame::new();
        assert!(!frame.is_evictable());

        frame.load(PageId::new(1), &Page::new(), 1);
        assert!(!frame.is_evictable());

        frame.unpin();
        assert!(frame.is_evictable());
    }
}
