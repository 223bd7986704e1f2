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

//! Binary stream encoding.
//!
//! Every fixed-width field is big-endian. [`WireWriter`] and [`WireReader`]
//! wrap any [`Write`] or [`Read`] and expose typed primitives; [`WireFormat`]
//! maps key and value types onto those primitives.

use std::io;
use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

mod wire;

pub use self::wire::WireFormat;

/// Length marker for a null string or byte sequence.
pub(crate) const NULL_LENGTH: u32 = u32::MAX;

/// Typed big-endian writer over an output stream.
pub struct WireWriter<W> {
    inner: W,
}

impl<W: Write> WireWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)
    }

    pub fn write_u8(&mut self, n: u8) -> io::Result<()> {
        self.inner.write_u8(n)
    }

    pub fn write_i8(&mut self, n: i8) -> io::Result<()> {
        self.inner.write_i8(n)
    }

    pub fn write_u16(&mut self, n: u16) -> io::Result<()> {
        self.inner.write_u16::<BigEndian>(n)
    }

    pub fn write_i16(&mut self, n: i16) -> io::Result<()> {
        self.inner.write_i16::<BigEndian>(n)
    }

    pub fn write_u32(&mut self, n: u32) -> io::Result<()> {
        self.inner.write_u32::<BigEndian>(n)
    }

    pub fn write_i32(&mut self, n: i32) -> io::Result<()> {
        self.inner.write_i32::<BigEndian>(n)
    }

    pub fn write_u64(&mut self, n: u64) -> io::Result<()> {
        self.inner.write_u64::<BigEndian>(n)
    }

    pub fn write_i64(&mut self, n: i64) -> io::Result<()> {
        self.inner.write_i64::<BigEndian>(n)
    }

    pub fn write_f32(&mut self, n: f32) -> io::Result<()> {
        self.inner.write_f32::<BigEndian>(n)
    }

    pub fn write_f64(&mut self, n: f64) -> io::Result<()> {
        self.inner.write_f64::<BigEndian>(n)
    }
}

/// Typed big-endian reader over an input stream.
///
/// A short read surfaces as [`io::ErrorKind::UnexpectedEof`].
pub struct WireReader<R> {
    inner: R,
}

impl<R: Read> WireReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(buf)
    }

    /// Reads exactly `len` bytes without trusting `len` for the allocation.
    pub fn read_bytes(&mut self, len: usize) -> io::Result<Vec<u8>> {
        const CHUNK: usize = 8 * 1024;

        let mut bytes = Vec::with_capacity(len.min(CHUNK));
        let read = (&mut self.inner)
            .take(len as u64)
            .read_to_end(&mut bytes)?;
        if read != len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("expected {len} bytes, got {read}"),
            ));
        }
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        self.inner.read_u8()
    }

    pub fn read_i8(&mut self) -> io::Result<i8> {
        self.inner.read_i8()
    }

    pub fn read_u16(&mut self) -> io::Result<u16> {
        self.inner.read_u16::<BigEndian>()
    }

    pub fn read_i16(&mut self) -> io::Result<i16> {
        self.inner.read_i16::<BigEndian>()
    }

    pub fn read_u32(&mut self) -> io::Result<u32> {
        self.inner.read_u32::<BigEndian>()
    }

    pub fn read_i32(&mut self) -> io::Result<i32> {
        self.inner.read_i32::<BigEndian>()
    }

    pub fn read_u64(&mut self) -> io::Result<u64> {
        self.inner.read_u64::<BigEndian>()
    }

    pub fn read_i64(&mut self) -> io::Result<i64> {
        self.inner.read_i64::<BigEndian>()
    }

    pub fn read_f32(&mut self) -> io::Result<f32> {
        self.inner.read_f32::<BigEndian>()
    }

    pub fn read_f64(&mut self) -> io::Result<f64> {
        self.inner.read_f64::<BigEndian>()
    }
}
