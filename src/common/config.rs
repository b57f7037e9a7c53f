//! Configuration constants for pagepool.

/// Size of a page in bytes (4KB).
///
/// Every block in a page file and every frame in the buffer pool holds
/// exactly this many bytes. Pages are aligned to 4096 bytes in memory.
pub const PAGE_SIZE: usize = 4096;

/// Number of frames used when a config does not name a pool size.
pub const DEFAULT_POOL_SIZE: usize = 64;

/// Maximum number of addressable pages.
///
/// `u32::MAX` is reserved for [`PageId::INVALID`](crate::PageId::INVALID).
pub const MAX_PAGES: u64 = u32::MAX as u64;

/// Maximum size of a page file in bytes.
pub const MAX_FILE_SIZE_BYTES: u64 = MAX_PAGES * PAGE_SIZE as u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_power_of_two() {
        assert!(PAGE_SIZE.is_power_of_two());
        assert_eq!(PAGE_SIZE, 4096);
    }

    #[test]
    fn test_max_file_size() {
        assert_eq!(MAX_FILE_SIZE_BYTES, (u32::MAX as u64) * 4096);
        assert!(DEFAULT_POOL_SIZE > 0);
    }
}
