//! Error types for pagepool.

use std::path::PathBuf;

use thiserror::Error;

use crate::common::PageId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors surfaced by the buffer pool and its storage backends.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from disk operations that has no more specific kind.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The page file does not exist.
    #[error("page file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Requested page lies outside `[0, total_pages)`.
    #[error("{page_id} does not exist (file holds {total_pages} pages)")]
    ReadNonExistingPage { page_id: PageId, total_pages: u32 },

    /// Seek or write failed on the backend.
    #[error("failed to write {page_id}: {source}")]
    WriteFailed {
        page_id: PageId,
        #[source]
        source: std::io::Error,
    },

    /// Shutdown attempted while callers still hold pins.
    #[error("cannot shut down: {0} frame(s) still pinned")]
    PoolHasPinnedPages(usize),

    /// Eviction required, but every frame is pinned.
    ///
    /// Callers must unpin something before retrying.
    #[error("no free frames available in buffer pool")]
    NoFreeFrame,

    /// The page is not currently cached.
    #[error("{0} is not cached in the buffer pool")]
    PageNotFound(PageId),

    /// The handle's frame has since been reloaded with another page.
    #[error("stale handle for {0}: its frame has been reused")]
    StaleHandle(PageId),

    /// A pool must hold at least one frame.
    #[error("invalid buffer pool size: {0}")]
    InvalidPoolSize(usize),
}
