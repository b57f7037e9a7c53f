//! Property tests: random pin/unpin/write/flush sequences against a model.

use std::collections::{HashMap, HashSet};

use pagepool::{BufferPool, Error, MemoryStorage, PageHandle, PageId, ReplacementStrategy};
use proptest::prelude::*;

const NUM_PAGES: u32 = 8;

#[derive(Debug, Clone)]
enum Op {
    Pin(u32),
    Unpin(usize),
    Write(usize, u8),
    Force(usize),
    Flush,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..NUM_PAGES).prop_map(Op::Pin),
        3 => any::<usize>().prop_map(Op::Unpin),
        2 => (any::<usize>(), any::<u8>()).prop_map(|(i, b)| Op::Write(i, b)),
        1 => any::<usize>().prop_map(Op::Force),
        1 => Just(Op::Flush),
    ]
}

fn strategy_strategy() -> impl Strategy<Value = ReplacementStrategy> {
    prop::sample::select(ReplacementStrategy::ALL.to_vec())
}

/// Checks that hold after every operation.
fn check_pool(
    pool: &BufferPool<MemoryStorage>,
    held: &[PageHandle],
) -> Result<(), TestCaseError> {
    let contents = pool.frame_contents();
    let cached: Vec<PageId> = contents.iter().flatten().copied().collect();
    let distinct: HashSet<PageId> = cached.iter().copied().collect();

    prop_assert_eq!(cached.len(), distinct.len(), "page cached twice: {:?}", contents);
    prop_assert_eq!(pool.cached_page_count(), cached.len());

    let total_fixes: u32 = pool.fix_counts().iter().sum();
    prop_assert_eq!(total_fixes as usize, held.len());

    for handle in held {
        let expected = held.iter().filter(|h| h.page_id() == handle.page_id()).count();
        prop_assert_eq!(pool.fix_count(handle.page_id()), Some(expected as u32));
        prop_assert!(pool.page(handle).is_ok());
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_pool_matches_model(
        pool_size in 1usize..5,
        strategy in strategy_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..120),
    ) {
        let storage = MemoryStorage::with_pages(NUM_PAGES);
        let mut pool = BufferPool::new(pool_size, strategy, storage).unwrap();
        let mut held: Vec<PageHandle> = Vec::new();
        let mut model: HashMap<u32, u8> = HashMap::new();

        for op in ops {
            match op {
                Op::Pin(id) => match pool.pin(PageId::new(id)) {
                    Ok(handle) => {
                        let first_byte = pool.page(&handle).unwrap().as_slice()[0];
                        prop_assert_eq!(first_byte, model.get(&id).copied().unwrap_or(0));
                        held.push(handle);
                    }
                    Err(Error::NoFreeFrame) => {
                        prop_assert!(pool.fix_counts().iter().all(|&c| c > 0));
                        prop_assert_eq!(pool.fix_count(PageId::new(id)), None);
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {}", e),
                },
                Op::Unpin(i) if !held.is_empty() => {
                    let handle = held.swap_remove(i % held.len());
                    pool.unpin(handle.page_id()).unwrap();
                }
                Op::Write(i, byte) if !held.is_empty() => {
                    let handle = held[i % held.len()];
                    pool.page_mut(&handle).unwrap().as_mut_slice()[0] = byte;
                    pool.mark_dirty(handle.page_id()).unwrap();
                    model.insert(handle.page_id().0, byte);
                }
                Op::Force(i) if !held.is_empty() => {
                    let handle = held[i % held.len()];
                    pool.force_page(handle.page_id()).unwrap();
                }
                Op::Flush => pool.flush_all().unwrap(),
                _ => {}
            }
            check_pool(&pool, &held)?;
        }

        for handle in held.drain(..) {
            pool.unpin(handle.page_id()).unwrap();
        }
        prop_assert!(pool.fix_counts().iter().all(|&c| c == 0));

        let stats = pool.stats();
        prop_assert_eq!(stats.pages_read, pool.storage().reads());
        prop_assert_eq!(stats.pages_written, pool.storage().writes());

        // No dirty write may be lost
        let storage = pool.shutdown().unwrap();
        for (id, byte) in model {
            let page = storage.page(PageId::new(id)).unwrap();
            prop_assert_eq!(page.as_slice()[0], byte);
        }
    }

    #[test]
    fn prop_unpin_never_underflows(
        strategy in strategy_strategy(),
        extra_unpins in 1usize..5,
    ) {
        let mut pool = BufferPool::new(2, strategy, MemoryStorage::new()).unwrap();
        pool.pin(PageId::new(0)).unwrap();

        for _ in 0..=extra_unpins {
            pool.unpin(PageId::new(0)).unwrap();
        }
        prop_assert_eq!(pool.fix_count(PageId::new(0)), Some(0));
        prop_assert!(pool.shutdown().is_ok());
    }
}
