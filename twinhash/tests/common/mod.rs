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

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;
use twinhash::table::HashTable;
use twinhash::table::TableBackend;

static INIT: Once = Once::new();

pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();
        builder
            .filter_level(LevelFilter::Info)
            .filter_module("twinhash", LevelFilter::Debug)
            .is_test(true)
            .parse_default_env();
        // Another test binary thread may have won the race.
        let _ = builder.try_init();
    });
}

/// Entries of `table` as owned pairs, sorted by key.
pub fn sorted_entries<K, V, B>(table: &HashTable<K, V, B>) -> Vec<(K, V)>
where
    K: twinhash::hash::TableKey + Ord,
    V: Clone,
    B: TableBackend<K, V>,
{
    let mut entries: Vec<(K, V)> = table
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}
