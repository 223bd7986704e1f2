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

//! Map-like sparse and dense hash tables with a binary stream format.
//!
//! - [`hash`]: the hashing adapter that lets a key type be stored in a table.
//! - [`table`]: [`SparseHash`](table::SparseHash) and
//!   [`DenseHash`](table::DenseHash), their shared wrapper and builder.
//! - [`codec`]: the big-endian stream primitives tables are serialized with.
//! - [`error`]: the error type returned by fallible operations.

pub mod codec;
pub mod error;
pub mod hash;
pub mod table;
