//! Storage layer - page format and block I/O.
//!
//! This module handles persistent storage:
//! - [`Page`] - The raw 4KB data container
//! - [`StorageBackend`] - The block interface the buffer pool consumes
//! - [`PageFile`] - File-backed implementation
//! - [`MemoryStorage`] - In-memory implementation

mod backend;
mod memory;
mod page;
mod page_file;

pub use backend::StorageBackend;
pub use memory::MemoryStorage;
pub use page::Page;
pub use page_file::PageFile;
