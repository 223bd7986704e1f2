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

//! Example demonstrating table serialization over a stream

use std::io::Cursor;

use twinhash::table::{DenseHash, SparseHash, TableBuilder};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let mut inventory: SparseHash<String, u64> = TableBuilder::new().capacity(16).build();
    for (name, qty) in [("bolts", 120), ("nuts", 80), ("washers", 300)] {
        inventory.insert(name.to_string(), qty).unwrap();
    }

    println!("Serializing {} entries...", inventory.count());
    let bytes = inventory.serialize().unwrap();
    println!("Serialized size: {} bytes", bytes.len());
    println!("Count prefix: {:?}", &bytes[..4]);

    // Read the same bytes back into the other flavor
    let restored = DenseHash::<String, u64>::deserialize_from(Cursor::new(&bytes)).unwrap();
    println!("Restored {} entries, equal: {}", restored.count(), restored == inventory);

    // A cut-off stream is rejected instead of half-loaded
    let cut = &bytes[..bytes.len() - 3];
    match DenseHash::<String, u64>::deserialize(cut) {
        Ok(table) => println!("unexpected: decoded {} entries", table.count()),
        Err(err) => println!("Truncated stream: {err}"),
    }
}
