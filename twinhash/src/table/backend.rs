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

/// Storage capability a [`HashTable`](super::HashTable) delegates to.
///
/// A backend trusts its caller never to insert the deleted-key sentinel; the
/// wrapper enforces that before delegating.
pub trait TableBackend<K, V> {
    /// Iterator over live entries, in backend-specific order.
    type Iter<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    /// Creates an empty backend.
    fn with_options(deleted_key: K, seed: u32, capacity: usize) -> Self;

    fn deleted_key(&self) -> &K;

    /// Replaces the sentinel. The new sentinel must not be a live key.
    fn set_deleted_key(&mut self, key: K);

    fn seed(&self) -> u32;

    /// Inserts or overwrites, returning the previous value.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    fn get(&self, key: &K) -> Option<&V>;

    fn get_mut(&mut self, key: &K) -> Option<&mut V>;

    fn remove(&mut self, key: &K) -> Option<V>;

    /// Number of live entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn reserve(&mut self, additional: usize);

    fn iter(&self) -> Self::Iter<'_>;
}
