//! Page - the fixed-size unit of storage.
//!
//! A [`Page`] is a raw 4KB byte array. It is the unit of I/O between a
//! storage backend and the buffer pool, and each buffer frame owns one.

use std::fmt;

use crate::common::config::PAGE_SIZE;

/// A page of data (4KB, 4KB-aligned).
///
/// # Clone Implementation
/// `Page` does not implement `Clone` outside of tests. Copying 4KB should be
/// explicit, so production code uses [`Page::copy_from`].
///
/// # Example
/// ```
/// use pagepool::Page;
///
/// let mut page = Page::new();
/// page.as_mut_slice()[0] = 0xFF;
/// assert_eq!(page.as_slice()[0], 0xFF);
/// ```
#[repr(align(4096))]
pub struct Page {
    data: [u8; PAGE_SIZE],
}

impl Page {
    /// Create a new zeroed page.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: [0u8; PAGE_SIZE],
        }
    }

    /// Get immutable slice of page data.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable slice of page data.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Overwrite this page with the contents of `other`.
    #[inline]
    pub fn copy_from(&mut self, other: &Page) {
        self.data.copy_from_slice(&other.data);
    }

}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let used = self.data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        f.debug_struct("Page").field("used_bytes", &used).finish()
    }
}

// Clone only available in tests - forces explicit copying in production
#[cfg(test)]
impl Clone for Page {
    fn clone(&self) -> Self {
        let mut new_page = Page::new();
        new_page.copy_from(self);
        new_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_and_alignment() {
        assert_eq!(std::mem::size_of::<Page>(), PAGE_SIZE);
        assert_eq!(std::mem::align_of::<Page>(), 4096);
    }

    #[test]
    fn test_page_copy_from() {
        let mut src = Page::new();
        src.as_mut_slice()[0] = 0xAB;
        src.as_mut_slice()[4095] = 0xCD;

        let mut dst = Page::new();
        dst.copy_from(&src);
        assert_eq!(dst.as_slice()[0], 0xAB);
        assert_eq!(dst.as_slice()[4095], 0xCD);

        // Independent after the copy
        src.as_mut_slice()[0] = 0;
        assert_eq!(dst.as_slice()[0], 0xAB);
    }

    #[test]
    fn test_page_debug_reports_used_bytes() {
        let mut page = Page::new();
        assert_eq!(format!("{:?}", page), "Page { used_bytes: 0 }");
        page.as_mut_slice()[9] = 1;
        assert_eq!(format!("{:?}", page), "Page { used_bytes: 10 }");
    }
}
