//! Page number type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::config::PAGE_SIZE;

/// Number of a block in a page file.
///
/// Page `n` lives at byte offset `n * PAGE_SIZE`. `u32::MAX` is reserved
/// as the "no page" sentinel.
///
/// # Example
/// ```
/// use pagepool::PageId;
///
/// let page_id = PageId::new(3);
/// assert!(page_id.is_valid());
/// assert_eq!(page_id.file_offset(), 3 * 4096);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageId(pub u32);

impl PageId {
    /// Sentinel meaning "no page".
    pub const INVALID: PageId = PageId(u32::MAX);

    /// Create a new PageId.
    #[inline]
    pub fn new(id: u32) -> Self {
        PageId(id)
    }

    /// Check if this page ID is valid (not the sentinel value).
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    /// Byte offset of this page within its page file.
    #[inline]
    pub fn file_offset(&self) -> u64 {
        u64::from(self.0) * PAGE_SIZE as u64
    }

    /// Number of pages a file needs to contain this page.
    ///
    /// Returns `None` for the sentinel.
    #[inline]
    pub fn required_pages(&self) -> Option<u32> {
        if self.is_valid() {
            Some(self.0 + 1)
        } else {
            None
        }
    }

    /// The page before this one, if any.
    #[inline]
    pub fn prev(&self) -> Option<PageId> {
        self.0.checked_sub(1).map(PageId)
    }

    /// The page after this one, if it is addressable.
    #[inline]
    pub fn next(&self) -> Option<PageId> {
        self.0
            .checked_add(1)
            .map(PageId)
            .filter(PageId::is_valid)
    }
}

impl From<u32> for PageId {
    fn from(id: u32) -> Self {
        PageId(id)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::INVALID {
            write!(f, "Page(NONE)")
        } else {
            write!(f, "Page({})", self.0)
        }
    }
}
