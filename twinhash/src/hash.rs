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

//! Hashing adapter for table keys.
//!
//! Keys are hashed by forwarding their canonical bytes to MurmurHash3 x64/128
//! and keeping the first 64-bit half. Byte sequences hash their raw bytes;
//! strings and characters hash their UTF-8 encoding.
//!
//! A new key type can be stored in a table by implementing [`TableKey`] for it.

use std::borrow::Cow;
use std::hash::BuildHasher;

/// The seed used when a table is built without an explicit one.
pub const DEFAULT_SEED: u32 = 9001;

/// A key type the tables know how to hash and print.
///
/// `Default` provides the deleted-key sentinel a table registers when no other
/// sentinel is given.
pub trait TableKey: Eq + Clone + Default {
    /// Hashes this key with the given seed.
    fn hash_with_seed(&self, seed: u32) -> u64;

    /// Returns a human readable form of this key for diagnostics.
    fn printable(&self) -> Cow<'_, str>;
}

impl TableKey for Vec<u8> {
    fn hash_with_seed(&self, seed: u32) -> u64 {
        hash_bytes(self, seed)
    }

    fn printable(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self)
    }
}

impl TableKey for String {
    fn hash_with_seed(&self, seed: u32) -> u64 {
        hash_bytes(self.as_bytes(), seed)
    }

    fn printable(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl TableKey for char {
    fn hash_with_seed(&self, seed: u32) -> u64 {
        let mut buf = [0u8; 4];
        hash_bytes(self.encode_utf8(&mut buf).as_bytes(), seed)
    }

    fn printable(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

/// Hashes `key` with [`DEFAULT_SEED`].
///
/// # Examples
///
/// ```
/// use twinhash::hash::hash_key;
///
/// let a = hash_key(&"alice".to_string());
/// assert_eq!(a, hash_key(&"alice".to_string()));
/// assert_ne!(a, hash_key(&"bob".to_string()));
/// ```
pub fn hash_key<K: TableKey>(key: &K) -> u64 {
    key.hash_with_seed(DEFAULT_SEED)
}

#[inline]
fn hash_bytes(bytes: &[u8], seed: u32) -> u64 {
    let (h1, _) = mur3::murmurhash3_x64_128(bytes, seed);
    h1
}

/// A [`BuildHasher`] producing MurmurHash3 hashers with a fixed seed.
///
/// Lets std or hashbrown maps keyed by other types share the hash family the
/// tables use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableHasher {
    seed: u32,
}

impl TableHasher {
    pub fn with_seed(seed: u32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for TableHasher {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl BuildHasher for TableHasher {
    type Hasher = mur3::Hasher128;

    fn build_hasher(&self) -> Self::Hasher {
        mur3::Hasher128::with_seed(self.seed)
    }
}
