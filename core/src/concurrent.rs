//! Sharded accumulator for parallel relevance scoring.
//!
//! Keys are spread over independently locked shards by `id mod shard_count`,
//! so threads adding to different documents rarely wait on each other. The
//! only way in is [`ConcurrentAccumulator::accumulate`] and the only way out
//! is [`ConcurrentAccumulator::snapshot`], which takes the accumulator by
//! value: every writer must have released its borrow before the merge runs.

use crate::DocId;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::ops::AddAssign;

pub struct ConcurrentAccumulator<V> {
    shards: Vec<Mutex<BTreeMap<DocId, V>>>,
}

impl<V> ConcurrentAccumulator<V>
where
    V: Default + AddAssign,
{
    /// A shard count of zero is treated as one.
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1)).map(|_| Mutex::new(BTreeMap::new())).collect();
        Self { shards }
    }

    pub fn shard_count(&self) -> usize { self.shards.len() }

    fn shard_index(&self, id: DocId) -> usize {
        i64::from(id).rem_euclid(self.shards.len() as i64) as usize
    }

    /// Add `delta` to the value stored for `id`, holding only that id's shard.
    pub fn accumulate(&self, id: DocId, delta: V) {
        let mut shard = self.shards[self.shard_index(id)].lock();
        *shard.entry(id).or_default() += delta;
    }

    /// Merge all shards into one ordered map.
    pub fn snapshot(self) -> BTreeMap<DocId, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.extend(shard.into_inner());
        }
        merged
    }
}
