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

//! Example demonstrating sparse and dense table usage

use twinhash::table::{DenseHash, SparseHash};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Sparse tables keep buckets small and tombstone removed entries
    let mut ages = SparseHash::<String, i32>::new();
    ages.insert("alice".to_string(), 30).unwrap();
    ages.insert("bob".to_string(), 25).unwrap();
    ages.insert("carol".to_string(), 41).unwrap();
    println!("Sparse table with {} entries:", ages.count());
    ages.print().unwrap();

    ages.remove(&"alice".to_string());
    println!("\nAfter removing alice:");
    println!("  count: {}", ages.count());
    println!("  contains alice: {}", ages.contains(&"alice".to_string()));
    println!("  alice (default on absence): {}", ages.value(&"alice".to_string()));
    println!("  alice (explicit): {:?}", ages.get(&"alice".to_string()));
    println!("  tombstones: {}", ages.tombstones());

    // The sentinel key is reserved
    match ages.insert(String::new(), 1) {
        Ok(()) => println!("\nunexpected: empty key accepted"),
        Err(err) => println!("\nInserting the sentinel fails: {err}"),
    }

    // Dense tables trade memory for lookup speed
    let mut letters = DenseHash::<char, u32>::new();
    for (i, c) in "hello world".chars().filter(|c| !c.is_whitespace()).enumerate() {
        let seen = letters.value(&c);
        letters.insert(c, seen + 1).unwrap();
        log::debug!("letter #{i}: {c}");
    }
    println!("\nLetter counts: {letters:?}");
    println!("'l' appears {} times", letters.value(&'l'));
}
