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

//! Map-like hash tables in two flavors.
//!
//! Both flavors delegate probing and growth to [`hashbrown::HashTable`] and
//! hash keys through [`TableKey`](crate::hash::TableKey). They differ in where
//! entries live:
//!
//! - [`SparseHash`] keeps buckets down to a single index and packs entries in
//!   a slot vector. Removing an entry overwrites its slot key with the
//!   deleted-key sentinel; tombstoned slots are reclaimed by compaction.
//! - [`DenseHash`] stores entries inline in the buckets for the fastest
//!   lookups at a higher memory cost.
//!
//! Every table carries a deleted-key sentinel (the key type's default unless
//! configured otherwise) that can never be stored as a live key.
//!
//! # Usage
//!
//! ```rust
//! use twinhash::table::SparseHash;
//!
//! let mut ages = SparseHash::<String, i32>::new();
//! ages.insert("alice".to_string(), 30).unwrap();
//! ages.insert("bob".to_string(), 25).unwrap();
//! ages.remove(&"alice".to_string());
//!
//! assert_eq!(ages.count(), 1);
//! assert!(!ages.contains(&"alice".to_string()));
//! assert_eq!(ages.value(&"bob".to_string()), 25);
//! assert_eq!(ages.value(&"alice".to_string()), 0);
//! ```
//!
//! # Serialization
//!
//! ```rust
//! use twinhash::table::DenseHash;
//!
//! let mut table = DenseHash::<String, i32>::new();
//! table.insert("one".to_string(), 1).unwrap();
//!
//! let bytes = table.serialize().unwrap();
//! assert_eq!(&bytes[..4], &[0, 0, 0, 1]);
//!
//! let decoded = DenseHash::<String, i32>::deserialize(&bytes).unwrap();
//! assert_eq!(decoded, table);
//! ```

mod backend;
mod builder;
mod dense;
mod map;
mod serialization;
mod sparse;

pub use self::backend::TableBackend;
pub use self::builder::TableBuilder;
pub use self::dense::DenseBackend;
pub use self::dense::DenseIter;
pub use self::map::HashTable;
pub use self::sparse::SparseBackend;
pub use self::sparse::SparseIter;

/// Memory-lean flavor: index-only buckets, packed slots, tombstoned removal.
pub type SparseHash<K, V> = HashTable<K, V, SparseBackend<K, V>>;

/// Lookup-fast flavor: entries stored inline in the buckets.
pub type DenseHash<K, V> = HashTable<K, V, DenseBackend<K, V>>;
