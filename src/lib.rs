//! pagepool - a page-based storage layer with a pluggable buffer pool.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           Caller                                │
//! │          pin → page / page_mut → mark_dirty → unpin             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Buffer Pool (buffer/)                     │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  Replacement Policies: FIFO | LRU | CLOCK | LFU │   │   │
//! │  │   │          (chosen when the pool is built)         │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │      BufferPool + FrameTable + Statistics               │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │             Storage Layer (storage/)                     │   │
//! │  │       StorageBackend: PageFile | MemoryStorage           │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, FrameId, Error, config)
//! - [`buffer`] - Buffer pool management and replacement policies
//! - [`storage`] - Page files and block I/O
//!
//! # Quick Start
//! ```no_run
//! use pagepool::{BufferPool, BufferPoolConfig, PageFile, PageId, ReplacementStrategy};
//!
//! PageFile::create("my_pages.bin").unwrap();
//!
//! let config = BufferPoolConfig::new("my_pages.bin")
//!     .with_pool_size(3)
//!     .with_strategy(ReplacementStrategy::Lru);
//! let mut pool = BufferPool::open(config).unwrap();
//!
//! let handle = pool.pin(PageId::new(0)).unwrap();
//! pool.page_mut(&handle).unwrap().as_mut_slice()[0] = 0xAB;
//! pool.mark_dirty(handle.page_id()).unwrap();
//! pool.unpin(handle.page_id()).unwrap();
//!
//! let file = pool.shutdown().unwrap();
//! file.close().unwrap();
//! ```

pub mod buffer;
pub mod common;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::PAGE_SIZE;
pub use common::{Error, FrameId, PageId, Result};

pub use buffer::{
    BufferPool, BufferPoolConfig, BufferPoolStats, Frame, PageHandle, ReplacementStrategy,
    ShutdownError,
};
pub use storage::{MemoryStorage, Page, PageFile, StorageBackend};
