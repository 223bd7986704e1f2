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

//! Stream encoding of a whole table.
//!
//! Layout: a big-endian `i32` entry count followed by that many
//! `(key, value)` records, each field in its [`WireFormat`] encoding. Records
//! follow the table's iteration order, which is unspecified.

use std::io::{Read, Write};

use log::{debug, warn};

use crate::codec::{WireFormat, WireReader, WireWriter};
use crate::error::{Error, ErrorKind};
use crate::hash::TableKey;
use crate::table::{HashTable, TableBackend, TableBuilder};

// Upper bound on entries preallocated from an untrusted count.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

impl<K, V, B> HashTable<K, V, B>
where
    K: TableKey + WireFormat,
    V: WireFormat,
    B: TableBackend<K, V>,
{
    /// Serializes this table to bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`] if the table holds more than
    /// `i32::MAX` entries or a key or value is too long to encode.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        self.serialize_into(&mut bytes)?;
        Ok(bytes)
    }

    /// Serializes this table into `out`.
    pub fn serialize_into<W: Write>(&self, out: W) -> Result<(), Error> {
        let count = i32::try_from(self.count()).map_err(|_| {
            Error::new(
                ErrorKind::InvalidArgument,
                "table has too many entries to encode",
            )
            .with_context("count", self.count())
        })?;

        let mut writer = WireWriter::new(out);
        writer
            .write_i32(count)
            .map_err(|e| Error::from_write("count", e))?;
        for (key, value) in self.iter() {
            key.encode(&mut writer)?;
            value.encode(&mut writer)?;
        }
        Ok(())
    }

    /// Deserializes a table from bytes.
    ///
    /// The table is rebuilt with the default seed and the default sentinel
    /// `K::default()`. A table serialized under a custom sentinel may hold
    /// `K::default()` as a live key; read it back through
    /// [`TableBuilder::deserialize`] configured with the same sentinel.
    ///
    /// Bytes after the last record are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::TruncatedInput`] if the bytes end before the
    /// declared number of records, [`ErrorKind::MalformedData`] for undecodable
    /// fields, and [`ErrorKind::ReservedKeyUsed`] if a record's key is the
    /// default sentinel.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        Self::deserialize_from(bytes)
    }

    /// Deserializes a table from a stream, with the defaults of [`deserialize`](Self::deserialize).
    pub fn deserialize_from<R: Read>(input: R) -> Result<Self, Error> {
        TableBuilder::new().deserialize_from(input)
    }

    /// Reads a serialized table from `input` and inserts its records here.
    ///
    /// Records overwrite existing entries with equal keys, and later records
    /// overwrite earlier ones. On error nothing is inserted.
    pub fn read_entries_from<R: Read>(&mut self, input: R) -> Result<(), Error> {
        let mut reader = WireReader::new(input);
        let declared = reader
            .read_i32()
            .map_err(|e| Error::from_read("count", e))?;
        let count = usize::try_from(declared).map_err(|_| {
            Error::malformed("negative entry count").with_context("count", declared)
        })?;

        let mut entries = Vec::with_capacity(count.min(MAX_PREALLOCATED_ENTRIES));
        for index in 0..count {
            let key = K::decode(&mut reader).map_err(|e| e.with_context("record", index))?;
            let value = V::decode(&mut reader).map_err(|e| e.with_context("record", index))?;
            entries.push((key, value));
        }
        debug!("decoded {count} table records");

        self.try_extend(entries)
            .inspect_err(|err| warn!("discarding decoded table: {err}"))
    }
}

impl<K: TableKey + WireFormat> TableBuilder<K> {
    /// Builds a table with this configuration and fills it from bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use twinhash::table::{SparseHash, TableBuilder};
    ///
    /// let mut table: SparseHash<String, i32> = TableBuilder::new()
    ///     .deleted_key("<deleted>".to_string())
    ///     .build();
    /// table.insert(String::new(), 7).unwrap();
    /// let bytes = table.serialize().unwrap();
    ///
    /// let restored: SparseHash<String, i32> = TableBuilder::new()
    ///     .deleted_key("<deleted>".to_string())
    ///     .deserialize(&bytes)
    ///     .unwrap();
    /// assert_eq!(restored.value(&String::new()), 7);
    /// ```
    pub fn deserialize<V, B>(self, bytes: &[u8]) -> Result<HashTable<K, V, B>, Error>
    where
        V: WireFormat,
        B: TableBackend<K, V>,
    {
        self.deserialize_from(bytes)
    }

    /// Builds a table with this configuration and fills it from a stream.
    pub fn deserialize_from<V, B, R>(self, input: R) -> Result<HashTable<K, V, B>, Error>
    where
        V: WireFormat,
        B: TableBackend<K, V>,
        R: Read,
    {
        let mut table = self.build();
        table.read_entries_from(input)?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;

    use super::*;
    use crate::table::{DenseHash, SparseHash};

    /// Accepts `budget` bytes, then fails every write.
    struct FailingWriter {
        budget: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::other("disk full"));
            }
            let n = buf.len().min(self.budget);
            self.budget -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_stream_failed() {
        let mut table = DenseHash::<String, i32>::new();
        table.insert("a".to_string(), 1).unwrap();

        let err = table.serialize_into(FailingWriter { budget: 0 }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StreamFailed);
        assert!(err.message().contains("count"));
        assert!(err.source().is_some());

        // count fits, the first key does not
        let err = table.serialize_into(FailingWriter { budget: 4 }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StreamFailed);
        assert!(err.message().contains("string length"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_empty_table_is_four_zero_bytes() {
        let table = SparseHash::<String, i32>::new();
        assert_eq!(table.serialize().unwrap(), vec![0, 0, 0, 0]);
        let decoded = SparseHash::<String, i32>::deserialize(&[0, 0, 0, 0]).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_single_record_layout() {
        let mut table = DenseHash::<char, i16>::new();
        table.insert('A', -1).unwrap();
        assert_eq!(
            table.serialize().unwrap(),
            vec![0, 0, 0, 1, 0, 0x41, 0xFF, 0xFF]
        );
    }

    #[test]
    fn test_negative_count_is_malformed() {
        let err = SparseHash::<String, i32>::deserialize(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
    }

    #[test]
    fn test_failed_merge_leaves_table_untouched() {
        let mut source = SparseHash::<Vec<u8>, u32>::new();
        source.insert(b"new".to_vec(), 1).unwrap();
        let mut bytes = source.serialize().unwrap();
        bytes.truncate(bytes.len() - 1);

        let mut target = SparseHash::<Vec<u8>, u32>::new();
        target.insert(b"old".to_vec(), 9).unwrap();
        let err = target.read_entries_from(&bytes[..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
        assert_eq!(target.count(), 1);
        assert_eq!(target.value(&b"old".to_vec()), 9);
    }

    #[test]
    fn test_duplicate_records_keep_last() {
        // count = 2, ("a", 1), ("a", 2)
        let bytes = [
            0, 0, 0, 2, //
            0, 0, 0, 2, 0, b'a', 0, 0, 0, 1, //
            0, 0, 0, 2, 0, b'a', 0, 0, 0, 2,
        ];
        let table = DenseHash::<String, i32>::deserialize(&bytes).unwrap();
        assert_eq!(table.count(), 1);
        assert_eq!(table.value(&"a".to_string()), 2);
    }
}
