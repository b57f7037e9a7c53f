//! The block storage interface consumed by the buffer pool.

use crate::common::{PageId, Result};
use crate::storage::page::Page;

/// A block-addressed, uncached page store.
///
/// The buffer pool owns one backend for its whole lifetime and calls it
/// synchronously. Implementations must make every write visible to
/// subsequent reads before returning.
pub trait StorageBackend {
    /// Number of pages currently stored.
    fn total_pages(&self) -> u32;

    /// Read one page.
    ///
    /// # Errors
    /// `Error::ReadNonExistingPage` if `page_id` is outside `[0, total_pages)`.
    fn read_block(&mut self, page_id: PageId) -> Result<Page>;

    /// Write one page.
    ///
    /// # Errors
    /// `Error::WriteFailed` if the page could not be written.
    fn write_block(&mut self, page_id: PageId, page: &Page) -> Result<()>;

    /// Grow the store with zeroed pages until it holds at least `min_pages`.
    fn ensure_capacity(&mut self, min_pages: u32) -> Result<()>;
}

impl<S: StorageBackend + ?Sized> StorageBackend for Box<S> {
    fn total_pages(&self) -> u32 {
        (**self).total_pages()
    }

    fn read_block(&mut self, page_id: PageId) -> Result<Page> {
        (**self).read_block(page_id)
    }

    fn write_block(&mut self, page_id: PageId, page: &Page) -> Result<()> {
        (**self).write_block(page_id, page)
    }

    fn ensure_capacity(&mut self, min_pages: u32) -> Result<()> {
        (**self).ensure_capacity(min_pages)
    }
}
