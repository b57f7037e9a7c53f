//! Buffer Pool - the core page caching layer.
//!
//! The [`BufferPool`] provides:
//! - Page caching between a storage backend and memory
//! - Pin-based reference counting
//! - Dirty page write-back on eviction, flush and shutdown
//! - Pluggable replacement policies

use std::fmt;

use tracing::{debug, info, trace, warn};

use crate::buffer::config::BufferPoolConfig;
use crate::buffer::frame_table::FrameTable;
use crate::buffer::replacer::{ReplacementStrategy, Replacer};
use crate::buffer::{BufferPoolStats, PageHandle};
use crate::common::{Error, FrameId, PageId, Result};
use crate::storage::{Page, PageFile, StorageBackend};

/// Caches a fixed number of pages from a storage backend.
///
/// # Architecture
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │                        BufferPool                           │
/// │  ┌──────────────────────────────────────────────────────┐   │
/// │  │ FrameTable                                           │   │
/// │  │  ┌──────────────┐   ┌─────────────────────────────┐  │   │
/// │  │  │ PageIndex    │   │     frames: Vec<Frame>      │  │   │
/// │  │  │PageId → Fid  │──▶│ [Frame0] [Frame1] [Frame2]  │  │   │
/// │  │  └──────────────┘   └─────────────────────────────┘  │   │
/// │  └──────────────────────────────────────────────────────┘   │
/// │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐       │
/// │  │   replacer   │  │   storage    │  │    stats     │       │
/// │  │ Box<dyn ..>  │  │ S: Backend   │  │  counters    │       │
/// │  └──────────────┘  └──────────────┘  └──────────────┘       │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// # Protocol
/// Callers [`pin`](Self::pin) a page, read or modify it through the
/// returned handle, call [`mark_dirty`](Self::mark_dirty) after modifying,
/// and [`unpin`](Self::unpin) when done. A page with outstanding pins is
/// never evicted.
///
/// # Thread Safety
/// None. Every mutating operation takes `&mut self`.
///
/// # Usage
/// ```ignore
/// let mut pool = BufferPool::open(BufferPoolConfig::new("data.bin").with_pool_size(3))?;
///
/// let handle = pool.pin(PageId::new(0))?;
/// pool.page_mut(&handle)?.as_mut_slice()[0] = 0xAB;
/// pool.mark_dirty(handle.page_id())?;
/// pool.unpin(handle.page_id())?;
///
/// let page_file = pool.shutdown()?;
/// ```
pub struct BufferPool<S = PageFile> {
    /// Fixed pool of frames plus the page index.
    frames: FrameTable,

    /// Eviction policy for selecting victim frames.
    replacer: Box<dyn Replacer>,

    /// Handles all block I/O.
    storage: S,

    /// Opaque policy parameters from the config.
    strategy_data: Option<String>,

    /// Logical clock stamped onto frames on every pin.
    time_counter: u64,

    /// Performance statistics.
    stats: BufferPoolStats,
}

impl BufferPool<PageFile> {
    /// Open the page file named in `config` and build a pool over it.
    ///
    /// # Errors
    /// - `Error::InvalidPoolSize` if the pool size is 0
    /// - `Error::FileNotFound` if the page file does not exist
    pub fn open(config: BufferPoolConfig) -> Result<Self> {
        config.validate()?;
        let storage = PageFile::open(&config.page_file)?;

        let mut pool = Self::new(config.pool_size, config.strategy, storage)?;
        pool.strategy_data = config.strategy_data;
        Ok(pool)
    }
}

impl<S: StorageBackend> BufferPool<S> {
    /// Create a buffer pool over any storage backend.
    ///
    /// # Errors
    /// Returns `Error::InvalidPoolSize` if `pool_size` is 0.
    pub fn new(pool_size: usize, strategy: ReplacementStrategy, storage: S) -> Result<Self> {
        if pool_size == 0 {
            return Err(Error::InvalidPoolSize(pool_size));
        }

        debug!(pool_size, %strategy, "created buffer pool");
        Ok(Self {
            frames: FrameTable::new(pool_size),
            replacer: strategy.build(),
            storage,
            strategy_data: None,
            time_counter: 0,
            stats: BufferPoolStats::default(),
        })
    }

    // ========================================================================
    // Public API: Pin protocol
    // ========================================================================

    /// Pin a page, loading it if it is not cached.
    ///
    /// On a hit no I/O happens. On a miss the page goes into the next empty
    /// frame (growing the backing store first if needed) or, once the pool
    /// is full, into a victim chosen by the replacer. The page is read
    /// before the replacer is consulted, and a dirty victim is written back
    /// before it is reused.
    ///
    /// # Errors
    /// - `Error::NoFreeFrame` if the pool is full and every frame is pinned
    /// - `Error::ReadNonExistingPage` if the page is past the end of storage
    ///   (only possible when replacing a victim)
    /// - I/O errors from the write-back or the read
    pub fn pin(&mut self, page_id: PageId) -> Result<PageHandle> {
        if let Some(frame_id) = self.frames.lookup(page_id) {
            let stamp = self.tick();
            let frame = self.frames.frame_mut(frame_id);
            let fix_count = frame.pin(stamp);
            self.stats.cache_hits += 1;

            trace!(%page_id, %frame_id, fix_count, "pin hit");
            return Ok(PageHandle::new(page_id, frame_id, frame.generation()));
        }

        let required = page_id
            .required_pages()
            .ok_or(Error::ReadNonExistingPage {
                page_id,
                total_pages: self.storage.total_pages(),
            })?;

        let free_slot = self.frames.next_free_slot();
        match free_slot {
            Some(_) => self.storage.ensure_capacity(required)?,
            None if !self.frames.has_evictable() => return Err(Error::NoFreeFrame),
            None => {}
        }

        // Read before consulting the replacer so a failed read changes
        // neither the frames nor the policy state.
        let data = self.storage.read_block(page_id)?;
        self.stats.pages_read += 1;

        let frame_id = match free_slot {
            Some(frame_id) => frame_id,
            None => self.select_victim()?,
        };

        let stamp = self.tick();
        let evicted = self.frames.install(frame_id, page_id, &data, stamp);
        self.stats.cache_misses += 1;
        debug_assert!(self.frames.is_consistent());

        match evicted {
            Some(old) => {
                self.stats.evictions += 1;
                debug!(evicted = %old, %page_id, %frame_id, "replaced page");
            }
            None => debug!(%page_id, %frame_id, "loaded page into empty frame"),
        }

        let generation = self.frames.frame(frame_id).generation();
        Ok(PageHandle::new(page_id, frame_id, generation))
    }

    /// Release one pin on a cached page.
    ///
    /// Unpinning a page whose fix count is already 0 does nothing.
    ///
    /// # Errors
    /// Returns `Error::PageNotFound` if the page is not cached.
    pub fn unpin(&mut self, page_id: PageId) -> Result<()> {
        let frame_id = self.lookup(page_id)?;
        let fix_count = self.frames.frame_mut(frame_id).unpin();

        trace!(%page_id, %frame_id, fix_count, "unpinned page");
        Ok(())
    }

    /// Record that a cached page has been modified.
    ///
    /// # Errors
    /// Returns `Error::PageNotFound` if the page is not cached.
    pub fn mark_dirty(&mut self, page_id: PageId) -> Result<()> {
        let frame_id = self.lookup(page_id)?;
        self.frames.frame_mut(frame_id).mark_dirty();
        Ok(())
    }

    // ========================================================================
    // Public API: Page access through handles
    // ========================================================================

    /// Read access to a pinned page.
    ///
    /// # Errors
    /// Returns `Error::StaleHandle` if the frame now holds another page.
    pub fn page(&self, handle: &PageHandle) -> Result<&Page> {
        self.check_handle(handle)?;
        Ok(self.frames.frame(handle.frame_id()).page())
    }

    /// Write access to a pinned page.
    ///
    /// This does not mark the page dirty; call [`mark_dirty`](Self::mark_dirty).
    ///
    /// # Errors
    /// Returns `Error::StaleHandle` if the frame now holds another page.
    pub fn page_mut(&mut self, handle: &PageHandle) -> Result<&mut Page> {
        self.check_handle(handle)?;
        Ok(self.frames.frame_mut(handle.frame_id()).page_mut())
    }

    // ========================================================================
    // Public API: Write-back
    // ========================================================================

    /// Write a cached page to storage now, pinned or not, and mark it clean.
    ///
    /// # Errors
    /// - `Error::PageNotFound` if the page is not cached
    /// - `Error::WriteFailed` if the write fails (the page stays dirty)
    pub fn force_page(&mut self, page_id: PageId) -> Result<()> {
        let frame_id = self.lookup(page_id)?;

        self.storage
            .write_block(page_id, self.frames.frame(frame_id).page())?;
        self.frames.frame_mut(frame_id).clear_dirty();
        self.stats.pages_written += 1;

        debug!(%page_id, %frame_id, "forced page");
        Ok(())
    }

    /// Write every dirty, unpinned page to storage.
    ///
    /// Dirty pages that are still pinned are left for later.
    ///
    /// # Errors
    /// Stops at the first failed write; that page stays dirty.
    pub fn flush_all(&mut self) -> Result<()> {
        for idx in 0..self.frames.capacity() {
            let frame_id = FrameId::new(idx);
            if !self.frames.frame(frame_id).is_pinned() {
                self.write_back(frame_id)?;
            }
        }
        Ok(())
    }

    /// Flush everything and tear the pool down, returning the backend.
    ///
    /// # Errors
    /// If a flush fails or any page is still pinned, the pool is handed back
    /// inside [`ShutdownError`] with its frames intact. Pinned pages yield
    /// `Error::PoolHasPinnedPages`.
    pub fn shutdown(mut self) -> std::result::Result<S, ShutdownError<S>> {
        if let Err(error) = self.flush_all() {
            warn!(%error, "buffer pool shutdown aborted");
            return Err(ShutdownError::new(self, error));
        }

        let pinned = self.frames.pinned_count();
        if pinned > 0 {
            warn!(pinned, "refusing to shut down buffer pool with pinned pages");
            return Err(ShutdownError::new(self, Error::PoolHasPinnedPages(pinned)));
        }

        info!(stats = %self.stats, "buffer pool shut down");
        Ok(self.storage)
    }

    // ========================================================================
    // Public API: Statistics
    // ========================================================================

    /// Page held by each frame, in slot order.
    pub fn frame_contents(&self) -> Vec<Option<PageId>> {
        self.frames.frames().iter().map(|f| f.page_id()).collect()
    }

    /// Dirty flag of each frame, in slot order.
    pub fn dirty_flags(&self) -> Vec<bool> {
        self.frames.frames().iter().map(|f| f.is_dirty()).collect()
    }

    /// Fix count of each frame, in slot order.
    pub fn fix_counts(&self) -> Vec<u32> {
        self.frames.frames().iter().map(|f| f.fix_count()).collect()
    }

    /// Blocks read from storage since the pool was created.
    pub fn read_io_count(&self) -> u64 {
        self.stats.pages_read
    }

    /// Blocks written to storage since the pool was created.
    pub fn write_io_count(&self) -> u64 {
        self.stats.pages_written
    }

    /// Snapshot of all counters.
    pub fn stats(&self) -> BufferPoolStats {
        self.stats
    }

    /// Fix count of a cached page, or None if it is not cached.
    pub fn fix_count(&self, page_id: PageId) -> Option<u32> {
        self.frames
            .lookup(page_id)
            .map(|fid| self.frames.frame(fid).fix_count())
    }

    /// Number of frames in the pool.
    pub fn pool_size(&self) -> usize {
        self.frames.capacity()
    }

    /// Number of pages currently cached.
    pub fn cached_page_count(&self) -> usize {
        self.frames.len()
    }

    /// The active replacement policy.
    pub fn strategy(&self) -> ReplacementStrategy {
        self.replacer.strategy()
    }

    /// Opaque policy parameters supplied at construction.
    pub fn strategy_data(&self) -> Option<&str> {
        self.strategy_data.as_deref()
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn tick(&mut self) -> u64 {
        self.time_counter += 1;
        self.time_counter
    }

    fn lookup(&self, page_id: PageId) -> Result<FrameId> {
        self.frames
            .lookup(page_id)
            .ok_or(Error::PageNotFound(page_id))
    }

    fn check_handle(&self, handle: &PageHandle) -> Result<()> {
        let current = self
            .frames
            .frames()
            .get(handle.frame_id().index())
            .filter(|f| f.generation() == handle.generation())
            .and_then(|f| f.page_id());

        if current == Some(handle.page_id()) {
            Ok(())
        } else {
            Err(Error::StaleHandle(handle.page_id()))
        }
    }

    /// Ask the replacer for a victim and make it safe to overwrite.
    ///
    /// A failed write-back leaves the victim cached and dirty.
    fn select_victim(&mut self) -> Result<FrameId> {
        let frame_id = self
            .replacer
            .victim(self.frames.frames_mut())
            .ok_or(Error::NoFreeFrame)?;
        debug_assert!(!self.frames.frame(frame_id).is_pinned());

        self.write_back(frame_id)?;
        Ok(frame_id)
    }

    /// Write a frame to storage if it is dirty.
    fn write_back(&mut self, frame_id: FrameId) -> Result<()> {
        let frame = self.frames.frame(frame_id);
        let page_id = match frame.page_id() {
            Some(page_id) if frame.is_dirty() => page_id,
            _ => return Ok(()),
        };

        self.storage.write_block(page_id, frame.page())?;
        self.frames.frame_mut(frame_id).clear_dirty();
        self.stats.pages_written += 1;

        debug!(%page_id, %frame_id, "wrote back dirty page");
        Ok(())
    }
}

impl<S> fmt::Debug for BufferPool<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("pool_size", &self.frames.capacity())
            .field("cached", &self.frames.len())
            .field("strategy", &self.replacer.strategy())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// A failed [`BufferPool::shutdown`], carrying the untouched pool.
pub struct ShutdownError<S> {
    pool: Box<BufferPool<S>>,
    error: Error,
}

impl<S> ShutdownError<S> {
    fn new(pool: BufferPool<S>, error: Error) -> Self {
        Self {
            pool: Box::new(pool),
            error,
        }
    }

    /// Why shutdown failed.
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Take the pool back, e.g. to unpin and retry.
    pub fn into_pool(self) -> BufferPool<S> {
        *self.pool
    }
}

impl<S> fmt::Debug for ShutdownError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShutdownError")
            .field("error", &self.error)
            .field("pool", &self.pool)
            .finish()
    }
}

impl<S> fmt::Display for ShutdownError<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer pool shutdown failed: {}", self.error)
    }
}

impl<S> std::error::Error for ShutdownError<S> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
