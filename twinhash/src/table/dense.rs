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

use std::mem;

use hashbrown::HashTable as RawTable;
use hashbrown::hash_table;

use crate::hash::TableKey;
use crate::table::TableBackend;

/// Entries stored inline in the buckets of the raw table.
///
/// Erasure is handled by the raw table's control bytes, so the sentinel is
/// only kept to honour the shared contract.
#[derive(Debug, Clone)]
pub struct DenseBackend<K, V> {
    table: RawTable<(K, V)>,
    deleted_key: K,
    seed: u32,
}

impl<K: TableKey, V> TableBackend<K, V> for DenseBackend<K, V> {
    type Iter<'a>
        = DenseIter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn with_options(deleted_key: K, seed: u32, capacity: usize) -> Self {
        Self {
            table: RawTable::with_capacity(capacity),
            deleted_key,
            seed,
        }
    }

    fn deleted_key(&self) -> &K {
        &self.deleted_key
    }

    fn set_deleted_key(&mut self, key: K) {
        self.deleted_key = key;
    }

    fn seed(&self) -> u32 {
        self.seed
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        let seed = self.seed;
        let hash = key.hash_with_seed(seed);
        match self.table.entry(
            hash,
            |entry| entry.0 == key,
            |entry| entry.0.hash_with_seed(seed),
        ) {
            hash_table::Entry::Occupied(mut occupied) => {
                Some(mem::replace(&mut occupied.get_mut().1, value))
            }
            hash_table::Entry::Vacant(vacant) => {
                vacant.insert((key, value));
                None
            }
        }
    }

    fn get(&self, key: &K) -> Option<&V> {
        let hash = key.hash_with_seed(self.seed);
        self.table
            .find(hash, |entry| entry.0 == *key)
            .map(|entry| &entry.1)
    }

    fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = key.hash_with_seed(self.seed);
        self.table
            .find_mut(hash, |entry| entry.0 == *key)
            .map(|entry| &mut entry.1)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let hash = key.hash_with_seed(self.seed);
        let entry = self.table.find_entry(hash, |entry| entry.0 == *key).ok()?;
        let ((_, value), _) = entry.remove();
        Some(value)
    }

    fn len(&self) -> usize {
        self.table.len()
    }

    fn clear(&mut self) {
        self.table.clear();
    }

    fn reserve(&mut self, additional: usize) {
        let seed = self.seed;
        self.table
            .reserve(additional, |entry| entry.0.hash_with_seed(seed));
    }

    fn iter(&self) -> Self::Iter<'_> {
        DenseIter {
            inner: self.table.iter(),
        }
    }
}

/// Iterator over the entries of a [`DenseBackend`], in bucket order.
pub struct DenseIter<'a, K, V> {
    inner: hash_table::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for DenseIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for DenseIter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrite_and_remove() {
        let mut dense = DenseBackend::<Vec<u8>, i64>::with_options(Vec::new(), 1, 4);
        assert_eq!(dense.insert(b"k".to_vec(), 1), None);
        assert_eq!(dense.insert(b"k".to_vec(), 2), Some(1));
        assert_eq!(dense.len(), 1);

        *dense.get_mut(&b"k".to_vec()).unwrap() += 10;
        assert_eq!(dense.get(&b"k".to_vec()), Some(&12));

        assert_eq!(dense.remove(&b"k".to_vec()), Some(12));
        assert_eq!(dense.remove(&b"k".to_vec()), None);
        assert!(dense.is_empty());
    }

    #[test]
    fn test_grows_past_initial_capacity() {
        let mut dense = DenseBackend::<char, u32>::with_options('\0', 9001, 0);
        for (i, c) in ('a'..='z').enumerate() {
            dense.insert(c, i as u32);
        }
        dense.reserve(100);
        assert_eq!(dense.len(), 26);
        assert_eq!(dense.iter().len(), 26);
        assert_eq!(dense.get(&'q'), Some(&16));
    }
}
