//! Buffer pool management.
//!
//! The buffer pool is the in-memory cache layer between callers and a
//! [`StorageBackend`](crate::storage::StorageBackend). It manages a fixed
//! pool of frames, each holding one page.
//!
//! # Components
//! - [`BufferPool`] - The main page cache
//! - [`BufferPoolConfig`] - Construction parameters
//! - [`Frame`] - A slot in the buffer pool holding a page + metadata
//! - [`PageHandle`] - Checked reference to a pinned page
//! - [`BufferPoolStats`] - Performance statistics
//! - [`replacer`] - Eviction policy implementations

mod buffer_pool;
mod config;
mod frame;
mod frame_table;
mod page_handle;
mod page_index;
pub mod replacer;
mod stats;

pub use buffer_pool::{BufferPool, ShutdownError};
pub use config::BufferPoolConfig;
pub use frame::Frame;
pub use page_handle::PageHandle;
pub use replacer::{ReplacementStrategy, Replacer};
pub use stats::BufferPoolStats;
