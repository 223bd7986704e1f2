// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::slice;

use hashbrown::HashTable as RawTable;
use log::debug;

use crate::hash::TableKey;
use crate::table::TableBackend;

/// Tombstones tolerated before compaction is considered at all.
pub(crate) const MIN_TOMBSTONES_BEFORE_COMPACTION: usize = 16;

#[derive(Debug, Clone)]
struct Slot<K, V> {
    key: K,
    // None once the slot is tombstoned.
    value: Option<V>,
}

/// Index-only buckets over a packed slot vector.
///
/// Each bucket of the raw table stores a position into `slots`, so an empty
/// bucket costs one index no matter how large keys and values are. Removal
/// unlinks the bucket and overwrites the slot key with the deleted-key
/// sentinel; once tombstones outnumber live entries the slots are repacked.
#[derive(Debug, Clone)]
pub struct SparseBackend<K, V> {
    index: RawTable<usize>,
    slots: Vec<Slot<K, V>>,
    tombstones: usize,
    deleted_key: K,
    seed: u32,
}

impl<K: TableKey, V> SparseBackend<K, V> {
    /// Number of tombstoned slots awaiting compaction.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Drops tombstoned slots and rebuilds the index.
    pub fn compact(&mut self) {
        if self.tombstones == 0 {
            return;
        }
        let dropped = self.tombstones;
        self.slots.retain(|slot| slot.value.is_some());
        self.tombstones = 0;

        let seed = self.seed;
        let slots = &self.slots;
        self.index.clear();
        self.index.reserve(slots.len(), |&pos| slots[pos].key.hash_with_seed(seed));
        for (pos, slot) in slots.iter().enumerate() {
            let hash = slot.key.hash_with_seed(seed);
            self.index
                .insert_unique(hash, pos, |&pos| slots[pos].key.hash_with_seed(seed));
        }
        debug!(
            "compacted sparse table: dropped {dropped} tombstones, {} live entries",
            slots.len()
        );
    }

    fn maybe_compact(&mut self) {
        if self.tombstones >= MIN_TOMBSTONES_BEFORE_COMPACTION && self.tombstones > self.index.len()
        {
            self.compact();
        }
    }

    fn find(&self, key: &K) -> Option<usize> {
        let hash = key.hash_with_seed(self.seed);
        let slots = &self.slots;
        self.index
            .find(hash, |&pos| slots[pos].key == *key)
            .copied()
    }
}

impl<K: TableKey, V> TableBackend<K, V> for SparseBackend<K, V> {
    type Iter<'a>
        = SparseIter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn with_options(deleted_key: K, seed: u32, capacity: usize) -> Self {
        Self {
            index: RawTable::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            tombstones: 0,
            deleted_key,
            seed,
        }
    }

    fn deleted_key(&self) -> &K {
        &self.deleted_key
    }

    fn set_deleted_key(&mut self, key: K) {
        // Tombstones still carry the old sentinel.
        self.compact();
        self.deleted_key = key;
    }

    fn seed(&self) -> u32 {
        self.seed
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(pos) = self.find(&key) {
            return self.slots[pos].value.replace(value);
        }

        let seed = self.seed;
        let hash = key.hash_with_seed(seed);
        let pos = self.slots.len();
        self.slots.push(Slot {
            key,
            value: Some(value),
        });
        let slots = &self.slots;
        self.index
            .insert_unique(hash, pos, |&pos| slots[pos].key.hash_with_seed(seed));
        None
    }

    fn get(&self, key: &K) -> Option<&V> {
        let pos = self.find(key)?;
        self.slots[pos].value.as_ref()
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let pos = self.find(key)?;
        self.slots[pos].value.as_mut()
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let hash = key.hash_with_seed(self.seed);
        let slots = &self.slots;
        let entry = self
            .index
            .find_entry(hash, |&pos| slots[pos].key == *key)
            .ok()?;
        let (pos, _) = entry.remove();

        let slot = &mut self.slots[pos];
        slot.key = self.deleted_key.clone();
        let value = slot.value.take();
        self.tombstones += 1;
        self.maybe_compact();
        value
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.tombstones = 0;
    }

    fn reserve(&mut self, additional: usize) {
        let seed = self.seed;
        let slots = &self.slots;
        self.index
            .reserve(additional, |&pos| slots[pos].key.hash_with_seed(seed));
        self.slots.reserve(additional);
    }

    fn iter(&self) -> Self::Iter<'_> {
        SparseIter {
            slots: self.slots.iter(),
            remaining: self.index.len(),
        }
    }
}

/// Iterator over the live entries of a [`SparseBackend`], in slot order.
pub struct SparseIter<'a, K, V> {
    slots: slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for SparseIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for slot in self.slots.by_ref() {
            if let Some(value) = slot.value.as_ref() {
                self.remaining -= 1;
                return Some((&slot.key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for SparseIter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::DEFAULT_SEED;

    fn backend() -> SparseBackend<String, u32> {
        SparseBackend::with_options(String::new(), DEFAULT_SEED, 0)
    }

    #[test]
    fn test_remove_leaves_sentinel_tombstone() {
        let mut sparse = backend();
        sparse.insert("a".to_string(), 1);
        sparse.insert("b".to_string(), 2);

        assert_eq!(sparse.remove(&"a".to_string()), Some(1));
        assert_eq!(sparse.tombstones(), 1);
        assert_eq!(sparse.slots[0].key, "");
        assert!(sparse.slots[0].value.is_none());
        assert_eq!(sparse.len(), 1);
        assert_eq!(sparse.remove(&"a".to_string()), None);
    }

    #[test]
    fn test_reinsert_after_remove_uses_new_slot() {
        let mut sparse = backend();
        sparse.insert("a".to_string(), 1);
        sparse.remove(&"a".to_string());
        assert_eq!(sparse.insert("a".to_string(), 5), None);
        assert_eq!(sparse.get(&"a".to_string()), Some(&5));
        assert_eq!(sparse.slots.len(), 2);
    }

    #[test]
    fn test_compaction_keeps_live_entries() {
        let mut sparse = backend();
        for i in 0..100u32 {
            sparse.insert(format!("k{i}"), i);
        }
        for i in 0..80u32 {
            sparse.remove(&format!("k{i}"));
        }
        // compacted after the 51st and 76th removals
        assert_eq!(sparse.tombstones(), 4);
        assert_eq!(sparse.slots.len(), 24);
        assert_eq!(sparse.len(), 20);
        for i in 80..100u32 {
            assert_eq!(sparse.get(&format!("k{i}")), Some(&i));
        }
        sparse.compact();
        assert_eq!(sparse.tombstones(), 0);
        assert_eq!(sparse.slots.len(), 20);
        assert_eq!(sparse.iter().count(), 20);
    }

    #[test]
    fn test_set_deleted_key_compacts_first() {
        let mut sparse = backend();
        sparse.insert("a".to_string(), 1);
        sparse.insert("b".to_string(), 2);
        sparse.remove(&"a".to_string());
        sparse.set_deleted_key("<gone>".to_string());
        assert_eq!(sparse.tombstones(), 0);
        assert!(sparse.slots.iter().all(|slot| slot.key != ""));
        assert_eq!(sparse.deleted_key(), "<gone>");
    }

    #[test]
    fn test_iter_skips_tombstones() {
        let mut sparse = backend();
        sparse.insert("a".to_string(), 1);
        sparse.insert("b".to_string(), 2);
        sparse.insert("c".to_string(), 3);
        sparse.remove(&"b".to_string());
        let iter = sparse.iter();
        assert_eq!(iter.len(), 2);
        let mut seen: Vec<_> = iter.map(|(k, v)| (k.clone(), *v)).collect();
        seen.sort();
        assert_eq!(seen, vec![("a".to_string(), 1), ("c".to_string(), 3)]);
    }
}
