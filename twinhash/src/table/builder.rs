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

use crate::hash::DEFAULT_SEED;
use crate::hash::TableKey;
use crate::table::HashTable;
use crate::table::TableBackend;

/// Builder for creating tables of either flavor.
///
/// # Examples
///
/// ```
/// use twinhash::table::{SparseHash, TableBuilder};
///
/// let table: SparseHash<String, u64> = TableBuilder::new()
///     .seed(42)
///     .capacity(1024)
///     .deleted_key("<deleted>".to_string())
///     .build();
///
/// assert_eq!(table.seed(), 42);
/// assert_eq!(table.deleted_key(), "<deleted>");
/// ```
#[derive(Debug, Clone)]
pub struct TableBuilder<K> {
    seed: u32,
    capacity: usize,
    deleted_key: K,
}

impl<K: TableKey> Default for TableBuilder<K> {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            capacity: 0,
            deleted_key: K::default(),
        }
    }
}

impl<K: TableKey> TableBuilder<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the seed keys are hashed with.
    ///
    /// The seed only affects in-memory placement; serialized tables do not
    /// carry it and read back under any seed.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets how many entries the table can hold before it first grows.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the sentinel that marks removed entries and can never be stored.
    pub fn deleted_key(mut self, deleted_key: K) -> Self {
        self.deleted_key = deleted_key;
        self
    }

    /// Builds an empty table of the flavor chosen by `B`.
    pub fn build<V, B: TableBackend<K, V>>(self) -> HashTable<K, V, B> {
        HashTable::from_backend(B::with_options(
            self.deleted_key,
            self.seed,
            self.capacity,
        ))
    }
}
