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

use std::fmt;
use std::io;
use std::io::Write;
use std::marker::PhantomData;

use log::debug;

use crate::error::Error;
use crate::hash::DEFAULT_SEED;
use crate::hash::TableKey;
use crate::table::SparseBackend;
use crate::table::TableBackend;
use crate::table::TableBuilder;

/// A map-like table over a [`TableBackend`].
///
/// The table owns a deleted-key sentinel that can never be stored: inserting
/// it fails with [`ErrorKind::ReservedKeyUsed`](crate::error::ErrorKind::ReservedKeyUsed)
/// and leaves the table untouched. Lookups report absence explicitly through
/// [`get`](Self::get); [`value`](Self::value) is the convenience form that
/// falls back to `V::default()`.
///
/// Not internally synchronized.
pub struct HashTable<K, V, B> {
    backend: B,
    _marker: PhantomData<(K, V)>,
}

impl<K: TableKey, V, B: TableBackend<K, V>> HashTable<K, V, B> {
    /// Creates an empty table whose sentinel is `K::default()`.
    pub fn new() -> Self {
        Self::with_deleted_key(K::default())
    }

    /// Creates an empty table with a caller-chosen sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use twinhash::table::DenseHash;
    ///
    /// let mut table = DenseHash::<String, u8>::with_deleted_key("<deleted>".to_string());
    /// table.insert(String::new(), 1).unwrap();
    /// assert!(table.insert("<deleted>".to_string(), 2).is_err());
    /// ```
    pub fn with_deleted_key(deleted_key: K) -> Self {
        Self::from_backend(B::with_options(deleted_key, DEFAULT_SEED, 0))
    }

    /// Returns a builder for configuring seed, capacity and sentinel.
    pub fn builder() -> TableBuilder<K> {
        TableBuilder::new()
    }

    pub(crate) fn from_backend(backend: B) -> Self {
        Self {
            backend,
            _marker: PhantomData,
        }
    }

    /// Builds a table from `entries`, failing if any key is the default sentinel.
    pub fn try_from_entries<I>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut table = Self::new();
        table.try_extend(entries)?;
        Ok(table)
    }

    /// Inserts `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ReservedKeyUsed`](crate::error::ErrorKind::ReservedKeyUsed)
    /// if `key` equals the table's sentinel.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), Error> {
        self.replace(key, value).map(|_| ())
    }

    /// Like [`insert`](Self::insert), but returns the value previously stored under `key`.
    pub fn replace(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        self.ensure_not_reserved(&key)?;
        Ok(self.backend.insert(key, value))
    }

    /// Inserts every entry, or none of them if one of the keys is the sentinel.
    pub fn try_extend<I>(&mut self, entries: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        for (key, _) in &entries {
            self.ensure_not_reserved(key)?;
        }
        self.backend.reserve(entries.len());
        for (key, value) in entries {
            self.backend.insert(key, value);
        }
        Ok(())
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.backend.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.backend.get_mut(key)
    }

    /// Returns a copy of the value under `key`, or `V::default()` when absent.
    pub fn value(&self, key: &K) -> V
    where
        V: Clone + Default,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Number of live entries.
    pub fn count(&self) -> usize {
        self.backend.len()
    }

    pub fn len(&self) -> usize {
        self.backend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.backend.remove(key)
    }

    /// Drops every entry. The sentinel stays registered.
    pub fn clear(&mut self) {
        self.backend.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.backend.reserve(additional);
    }

    pub fn deleted_key(&self) -> &K {
        self.backend.deleted_key()
    }

    /// Replaces the sentinel.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ReservedKeyUsed`](crate::error::ErrorKind::ReservedKeyUsed)
    /// if `key` is currently stored in the table.
    pub fn set_deleted_key(&mut self, key: K) -> Result<(), Error> {
        if self.contains(&key) {
            return Err(Error::reserved_key(&key.printable())
                .with_context("reason", "key is live in the table"));
        }
        debug!(
            "deleted key changed from {:?} to {:?}",
            self.deleted_key().printable(),
            key.printable()
        );
        self.backend.set_deleted_key(key);
        Ok(())
    }

    /// Seed the table hashes keys with.
    pub fn seed(&self) -> u32 {
        self.backend.seed()
    }

    /// Iterates over live entries in unspecified order.
    pub fn iter(&self) -> B::Iter<'_> {
        self.backend.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Writes every entry to stdout as `key: <key> value: <value>`.
    ///
    /// A debugging aid for text keys with integer values.
    pub fn print(&self) -> io::Result<()>
    where
        V: Copy + Into<i64>,
    {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.print_to(&mut out)
    }

    /// Same as [`print`](Self::print), writing to `out`.
    pub fn print_to<W: Write>(&self, out: &mut W) -> io::Result<()>
    where
        V: Copy + Into<i64>,
    {
        for (key, value) in self.iter() {
            let value: i64 = (*value).into();
            writeln!(out, "key: {} value: {}", key.printable(), value)?;
        }
        Ok(())
    }

    fn ensure_not_reserved(&self, key: &K) -> Result<(), Error> {
        if key == self.deleted_key() {
            return Err(Error::reserved_key(&key.printable()));
        }
        Ok(())
    }
}

impl<K: TableKey, V> HashTable<K, V, SparseBackend<K, V>> {
    /// Number of removed entries still occupying slots.
    pub fn tombstones(&self) -> usize {
        self.backend.tombstones()
    }

    /// Reclaims the slots of removed entries.
    pub fn compact(&mut self) {
        self.backend.compact();
    }
}

impl<K: TableKey, V, B: TableBackend<K, V>> Default for HashTable<K, V, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, B: Clone> Clone for HashTable<K, V, B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            _marker: PhantomData,
        }
    }
}

impl<K, V, B> fmt::Debug for HashTable<K, V, B>
where
    K: TableKey + fmt::Debug,
    V: fmt::Debug,
    B: TableBackend<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Equal when both hold the same key -> value mapping, whatever the flavor.
impl<K, V, B, B2> PartialEq<HashTable<K, V, B2>> for HashTable<K, V, B>
where
    K: TableKey,
    V: PartialEq,
    B: TableBackend<K, V>,
    B2: TableBackend<K, V>,
{
    fn eq(&self, other: &HashTable<K, V, B2>) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: TableKey, V: Eq, B: TableBackend<K, V>> Eq for HashTable<K, V, B> {}

impl<'a, K: TableKey, V, B: TableBackend<K, V>> IntoIterator for &'a HashTable<K, V, B> {
    type Item = (&'a K, &'a V);
    type IntoIter = B::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::table::{DenseHash, SparseHash};

    #[test]
    fn test_sentinel_rejected_on_insert() {
        let mut table = SparseHash::<String, i32>::new();
        let err = table.insert(String::new(), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReservedKeyUsed);
        assert!(table.is_empty());
    }

    #[test]
    fn test_try_extend_is_all_or_nothing() {
        let mut table = DenseHash::<char, u8>::new();
        let err = table
            .try_extend([('a', 1), ('\0', 2), ('b', 3)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReservedKeyUsed);
        assert_eq!(table.count(), 0);

        table.try_extend([('a', 1), ('b', 3)]).unwrap();
        assert_eq!(table.count(), 2);
    }

    #[test]
    fn test_set_deleted_key_refuses_live_key() {
        let mut table = SparseHash::<String, i32>::new();
        table.insert("x".to_string(), 1).unwrap();
        let err = table.set_deleted_key("x".to_string()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ReservedKeyUsed);

        table.set_deleted_key("<tomb>".to_string()).unwrap();
        // The old sentinel is an ordinary key now.
        table.insert(String::new(), 7).unwrap();
        assert_eq!(table.value(&String::new()), 7);
    }

    #[test]
    fn test_print_format() {
        let mut table = SparseHash::<String, i32>::new();
        table.insert("alice".to_string(), 30).unwrap();
        let mut out = Vec::new();
        table.print_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "key: alice value: 30\n");
    }

    #[test]
    fn test_equality_across_flavors() {
        let sparse =
            SparseHash::try_from_entries([(b"a".to_vec(), 1u8), (b"b".to_vec(), 2)]).unwrap();
        let dense =
            DenseHash::try_from_entries([(b"b".to_vec(), 2u8), (b"a".to_vec(), 1)]).unwrap();
        assert!(sparse == dense);

        let mut other = dense.clone();
        other.insert(b"a".to_vec(), 9).unwrap();
        assert!(sparse != other);
    }

    #[test]
    fn test_debug_lists_entries() {
        let mut table = DenseHash::<char, i32>::new();
        table.insert('k', 4).unwrap();
        assert_eq!(format!("{table:?}"), "{'k': 4}");
    }
}
