//! Page file - block-addressed file I/O.
//!
//! The [`PageFile`] handles all direct file operations:
//! - Creating, opening, closing and destroying page files
//! - Reading and writing blocks by number or relative to the current position
//! - Growing the file with zeroed blocks

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::common::config::{MAX_FILE_SIZE_BYTES, PAGE_SIZE};
use crate::common::{Error, PageId, Result};
use crate::storage::backend::StorageBackend;
use crate::storage::page::Page;

/// A file of fixed-size pages.
///
/// # File Layout
/// The file has no header. Pages are laid out back to back:
/// ```text
/// ┌─────────┬─────────┬─────────┬─────────┬─────────┐
/// │ Page 0  │ Page 1  │ Page 2  │  ...    │ Page N  │
/// │ (4KB)   │ (4KB)   │ (4KB)   │         │ (4KB)   │
/// └─────────┴─────────┴─────────┴─────────┴─────────┘
/// Offset:  0      4096     8192    ...    N×4096
/// ```
///
/// The page count is the file size rounded up to whole pages; a partial
/// trailing block reads back zero-padded.
///
/// # Position
/// Every successful read or write moves the current position to the page it
/// touched. The `read_*_block` helpers navigate relative to that position.
///
/// # Durability
/// All writes are followed by `fsync()`.
#[derive(Debug)]
pub struct PageFile {
    file: File,
    path: PathBuf,
    total_pages: u32,
    cur_page: u32,
}

impl PageFile {
    /// Create a page file holding a single zeroed page.
    ///
    /// An existing file at `path` is truncated.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;

        let mut page_file = Self {
            file,
            path,
            total_pages: 0,
            cur_page: 0,
        };
        page_file.append_empty_block()?;

        debug!(path = %page_file.path.display(), "created page file");
        Ok(page_file)
    }

    /// Open an existing page file.
    ///
    /// # Errors
    /// Returns `Error::FileNotFound` if there is no file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = match OpenOptions::new().read(true).write(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(Error::FileNotFound(path)),
            Err(e) => return Err(e.into()),
        };

        let file_size = file.metadata()?.len();
        if file_size > MAX_FILE_SIZE_BYTES {
            return Err(io::Error::new(ErrorKind::InvalidData, "page file too large").into());
        }
        let total_pages = file_size.div_ceil(PAGE_SIZE as u64) as u32;

        debug!(path = %path.display(), total_pages, "opened page file");
        Ok(Self {
            file,
            path,
            total_pages,
            cur_page: 0,
        })
    }

    /// Flush and close the file.
    pub fn close(self) -> Result<()> {
        self.file.sync_all()?;
        debug!(path = %self.path.display(), "closed page file");
        Ok(())
    }

    /// Delete the page file at `path`.
    ///
    /// # Errors
    /// Returns `Error::FileNotFound` if there is no file at `path`.
    pub fn destroy<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        match fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "destroyed page file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(Error::FileNotFound(path.to_path_buf()))
            }
            Err(e) => Err(e.into()),
        }
    }

    // ========================================================================
    // Reading
    // ========================================================================

    /// Read a page by number.
    ///
    /// # Errors
    /// Returns `Error::ReadNonExistingPage` if the page is past the end.
    pub fn read_block(&mut self, page_id: PageId) -> Result<Page> {
        if page_id.0 >= self.total_pages {
            return Err(Error::ReadNonExistingPage {
                page_id,
                total_pages: self.total_pages,
            });
        }

        self.file.seek(SeekFrom::Start(page_id.file_offset()))?;

        let mut page = Page::new();
        let buf = page.as_mut_slice();
        let mut filled = 0;
        // The last block may be short; the rest of the page stays zeroed.
        while filled < buf.len() {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        self.cur_page = page_id.0;
        Ok(page)
    }

    /// Read the first page.
    pub fn read_first_block(&mut self) -> Result<Page> {
        self.read_block(PageId::new(0))
    }

    /// Read the page before the current position.
    pub fn read_previous_block(&mut self) -> Result<Page> {
        let page_id = PageId::new(self.cur_page).prev().unwrap_or(PageId::INVALID);
        self.read_block(page_id)
    }

    /// Read the page at the current position.
    pub fn read_current_block(&mut self) -> Result<Page> {
        self.read_block(PageId::new(self.cur_page))
    }

    /// Read the page after the current position.
    pub fn read_next_block(&mut self) -> Result<Page> {
        let page_id = PageId::new(self.cur_page).next().unwrap_or(PageId::INVALID);
        self.read_block(page_id)
    }

    /// Read the last page.
    pub fn read_last_block(&mut self) -> Result<Page> {
        let page_id = self
            .total_pages
            .checked_sub(1)
            .map_or(PageId::INVALID, PageId::new);
        self.read_block(page_id)
    }

    // ========================================================================
    // Writing
    // ========================================================================

    /// Write a page by number.
    ///
    /// Writing past the end extends the file; the page count grows to
    /// include `page_id`.
    ///
    /// # Errors
    /// Returns `Error::WriteFailed` if seeking, writing or syncing fails.
    pub fn write_block(&mut self, page_id: PageId, page: &Page) -> Result<()> {
        let write_failed = |source| Error::WriteFailed { page_id, source };

        let required = page_id.required_pages().ok_or_else(|| {
            write_failed(io::Error::new(ErrorKind::InvalidInput, "invalid page id"))
        })?;

        self.file
            .seek(SeekFrom::Start(page_id.file_offset()))
            .map_err(write_failed)?;
        self.file.write_all(page.as_slice()).map_err(write_failed)?;
        self.file.sync_all().map_err(write_failed)?;

        self.total_pages = self.total_pages.max(required);
        self.cur_page = page_id.0;
        Ok(())
    }

    /// Write a page at the current position.
    pub fn write_current_block(&mut self, page: &Page) -> Result<()> {
        self.write_block(PageId::new(self.cur_page), page)
    }

    /// Append one zeroed page and move the position to it.
    pub fn append_empty_block(&mut self) -> Result<()> {
        let page_id = PageId::new(self.total_pages);
        self.write_block(page_id, &Page::new())
    }

    /// Append zeroed pages until the file holds at least `min_pages`.
    ///
    /// The new pages are written as one run followed by a single sync. The
    /// position moves to the last page appended.
    ///
    /// # Errors
    /// Returns `Error::WriteFailed`, naming the first new page, if the run
    /// cannot be written.
    pub fn ensure_capacity(&mut self, min_pages: u32) -> Result<()> {
        if self.total_pages >= min_pages {
            return Ok(());
        }

        let first = PageId::new(self.total_pages);
        let write_failed = |source| Error::WriteFailed {
            page_id: first,
            source,
        };
        debug!(
            path = %self.path.display(),
            from = self.total_pages,
            to = min_pages,
            "growing page file"
        );

        let zeroed = Page::new();
        self.file
            .seek(SeekFrom::Start(first.file_offset()))
            .map_err(write_failed)?;
        for _ in self.total_pages..min_pages {
            self.file.write_all(zeroed.as_slice()).map_err(write_failed)?;
        }
        self.file.sync_all().map_err(write_failed)?;

        self.total_pages = min_pages;
        self.cur_page = min_pages - 1;
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of pages in the file.
    #[inline]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Page number of the last block read or written.
    #[inline]
    pub fn block_pos(&self) -> u32 {
        self.cur_page
    }

    /// Path of the underlying file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the file in bytes, counting whole pages.
    #[inline]
    pub fn file_size(&self) -> u64 {
        u64::from(self.total_pages) * PAGE_SIZE as u64
    }
}

impl StorageBackend for PageFile {
    fn total_pages(&self) -> u32 {
        PageFile::total_pages(self)
    }

    fn read_block(&mut self, page_id: PageId) -> Result<Page> {
        PageFile::read_block(self, page_id)
    }

    fn write_block(&mut self, page_id: PageId, page: &Page) -> Result<()> {
        PageFile::write_block(self, page_id, page)
    }

    fn ensure_capacity(&mut self, min_pages: u32) -> Result<()> {
        PageFile::ensure_capacity(self, min_pages)
    }
}
