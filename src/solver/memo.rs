use hashbrown::HashMap;

use crate::cards::Card;

/// Canonical memo key for a search node: the packed count signatures of
/// the required and optional halves of the pool. Value-equal multisets
/// produce equal keys regardless of insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolKey {
    pub required: u128,
    pub optional: u128,
}

/// Cached outcome for a pool. Positive entries carry one witness
/// partition of the remaining pool; negative entries record exhaustion.
/// Deadline aborts are never cached.
#[derive(Debug, Clone)]
pub enum MemoEntry {
    Solved(Vec<Vec<Card>>),
    Exhausted,
}

pub trait MemoTable {
    fn get(&self, key: PoolKey) -> Option<&MemoEntry>;
    fn put(&mut self, key: PoolKey, entry: MemoEntry);
    fn clear(&mut self);
    fn len(&self) -> usize;
}

/// Hash map implementation. First write wins: a pool's outcome is
/// unique, so a second store for the same key is always redundant.
#[derive(Debug, Default)]
pub struct InMemoryMemo {
    map: HashMap<PoolKey, MemoEntry>,
}

impl InMemoryMemo {
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            map: HashMap::with_capacity(cap),
        }
    }
}

impl MemoTable for InMemoryMemo {
    #[inline]
    fn get(&self, key: PoolKey) -> Option<&MemoEntry> {
        self.map.get(&key)
    }

    #[inline]
    fn put(&mut self, key: PoolKey, entry: MemoEntry) {
        self.map.entry(key).or_insert(entry);
    }

    #[inline]
    fn clear(&mut self) {
        self.map.clear();
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }
}
