//! Page index - maps cached page numbers to frame slots.

use std::collections::HashMap;

use crate::common::{FrameId, PageId};

/// Mapping from page number to the frame caching it.
///
/// Keys are unique. The [`FrameTable`](super::frame_table::FrameTable)
/// keeps exactly one entry per occupied frame.
#[derive(Debug, Default)]
pub(crate) struct PageIndex {
    map: HashMap<PageId, FrameId>,
}

impl PageIndex {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn get(&self, page_id: PageId) -> Option<FrameId> {
        self.map.get(&page_id).copied()
    }

    /// Insert a mapping. The page must not already be indexed.
    pub(crate) fn insert(&mut self, page_id: PageId, frame_id: FrameId) {
        let previous = self.map.insert(page_id, frame_id);
        debug_assert!(previous.is_none(), "{} indexed twice", page_id);
    }

    pub(crate) fn remove(&mut self, page_id: PageId) -> Option<FrameId> {
        self.map.remove(&page_id)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (PageId, FrameId)> + '_ {
        self.map.iter().map(|(&pid, &fid)| (pid, fid))
    }
}
