//! In-memory storage backend.

use crate::common::{Error, PageId, Result};
use crate::storage::backend::StorageBackend;
use crate::storage::page::Page;

/// A [`StorageBackend`] that keeps every page in a `Vec`.
///
/// Useful for tests and benchmarks. It also counts the block reads and
/// writes it serves so callers can cross-check the pool's own counters.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pages: Vec<Page>,
    reads: u64,
    writes: u64,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `num_pages` zeroed pages.
    pub fn with_pages(num_pages: u32) -> Self {
        let mut storage = Self::new();
        storage.grow_to(num_pages);
        storage
    }

    /// Borrow a stored page without counting a read.
    pub fn page(&self, page_id: PageId) -> Option<&Page> {
        self.pages.get(page_id.0 as usize)
    }

    /// Number of `read_block` calls served.
    pub fn reads(&self) -> u64 {
        self.reads
    }

    /// Number of `write_block` calls served.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    fn grow_to(&mut self, num_pages: u32) {
        while self.pages.len() < num_pages as usize {
            self.pages.push(Page::new());
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn total_pages(&self) -> u32 {
        self.pages.len() as u32
    }

    fn read_block(&mut self, page_id: PageId) -> Result<Page> {
        let stored = self
            .pages
            .get(page_id.0 as usize)
            .ok_or(Error::ReadNonExistingPage {
                page_id,
                total_pages: self.pages.len() as u32,
            })?;

        let mut page = Page::new();
        page.copy_from(stored);
        self.reads += 1;
        Ok(page)
    }

    fn write_block(&mut self, page_id: PageId, page: &Page) -> Result<()> {
        let required = page_id.required_pages().ok_or_else(|| Error::WriteFailed {
            page_id,
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid page id"),
        })?;

        self.grow_to(required);
        self.pages[page_id.0 as usize].copy_from(page);
        self.writes += 1;
        Ok(())
    }

    fn ensure_capacity(&mut self, min_pages: u32) -> Result<()> {
        self.grow_to(min_pages);
        Ok(())
    }
}
