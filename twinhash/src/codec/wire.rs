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

use std::io::{Read, Write};

use crate::codec::{NULL_LENGTH, WireReader, WireWriter};
use crate::error::{Error, ErrorKind};

/// A type with a binary stream encoding.
///
/// Implemented for the supported key types (`String`, `Vec<u8>`, `char`) and
/// for booleans, fixed-width integers and floats.
pub trait WireFormat: Sized {
    /// Writes `self` to the stream.
    fn encode<W: Write>(&self, writer: &mut WireWriter<W>) -> Result<(), Error>;

    /// Reads one value from the stream.
    fn decode<R: Read>(reader: &mut WireReader<R>) -> Result<Self, Error>;
}

macro_rules! impl_fixed_width {
    ($($ty:ty => $write:ident, $read:ident;)*) => {
        $(
            impl WireFormat for $ty {
                fn encode<W: Write>(&self, writer: &mut WireWriter<W>) -> Result<(), Error> {
                    writer
                        .$write(*self)
                        .map_err(|e| Error::from_write(stringify!($ty), e))
                }

                fn decode<R: Read>(reader: &mut WireReader<R>) -> Result<Self, Error> {
                    reader.$read().map_err(|e| Error::from_read(stringify!($ty), e))
                }
            }
        )*
    };
}

impl_fixed_width! {
    u8 => write_u8, read_u8;
    i8 => write_i8, read_i8;
    u16 => write_u16, read_u16;
    i16 => write_i16, read_i16;
    u32 => write_u32, read_u32;
    i32 => write_i32, read_i32;
    u64 => write_u64, read_u64;
    i64 => write_i64, read_i64;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
}

impl WireFormat for bool {
    fn encode<W: Write>(&self, writer: &mut WireWriter<W>) -> Result<(), Error> {
        writer
            .write_u8(u8::from(*self))
            .map_err(|e| Error::from_write("bool", e))
    }

    fn decode<R: Read>(reader: &mut WireReader<R>) -> Result<Self, Error> {
        let byte = reader.read_u8().map_err(|e| Error::from_read("bool", e))?;
        Ok(byte != 0)
    }
}

// UTF-16 code units, one for the BMP and a surrogate pair beyond it.
impl WireFormat for char {
    fn encode<W: Write>(&self, writer: &mut WireWriter<W>) -> Result<(), Error> {
        let mut buf = [0u16; 2];
        for unit in self.encode_utf16(&mut buf).iter() {
            writer
                .write_u16(*unit)
                .map_err(|e| Error::from_write("char", e))?;
        }
        Ok(())
    }

    fn decode<R: Read>(reader: &mut WireReader<R>) -> Result<Self, Error> {
        let first = reader.read_u16().map_err(|e| Error::from_read("char", e))?;
        let mut units = vec![first];
        if (0xD800..0xDC00).contains(&first) {
            let second = reader
                .read_u16()
                .map_err(|e| Error::from_read("char low surrogate", e))?;
            units.push(second);
        }
        match char::decode_utf16(units.iter().copied()).next() {
            Some(Ok(c)) => Ok(c),
            _ => Err(Error::malformed("invalid UTF-16 character").with_context("unit", first)),
        }
    }
}

impl WireFormat for String {
    fn encode<W: Write>(&self, writer: &mut WireWriter<W>) -> Result<(), Error> {
        let units: Vec<u16> = self.encode_utf16().collect();
        let byte_len = units
            .len()
            .checked_mul(2)
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n != NULL_LENGTH)
            .ok_or_else(|| {
                Error::new(ErrorKind::InvalidArgument, "string too long to encode")
                    .with_context("units", units.len())
            })?;
        writer
            .write_u32(byte_len)
            .map_err(|e| Error::from_write("string length", e))?;
        for unit in units {
            writer
                .write_u16(unit)
                .map_err(|e| Error::from_write("string payload", e))?;
        }
        Ok(())
    }

    fn decode<R: Read>(reader: &mut WireReader<R>) -> Result<Self, Error> {
        let byte_len = reader
            .read_u32()
            .map_err(|e| Error::from_read("string length", e))?;
        if byte_len == NULL_LENGTH {
            return Ok(String::new());
        }
        if byte_len % 2 != 0 {
            return Err(Error::malformed("odd byte length for UTF-16 string")
                .with_context("byte_len", byte_len));
        }
        let payload = reader
            .read_bytes(byte_len as usize)
            .map_err(|e| Error::from_read("string payload", e))?;
        let units: Vec<u16> = payload
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units)
            .map_err(|e| Error::malformed("invalid UTF-16 string").set_source(e))
    }
}

impl WireFormat for Vec<u8> {
    fn encode<W: Write>(&self, writer: &mut WireWriter<W>) -> Result<(), Error> {
        let len = u32::try_from(self.len())
            .ok()
            .filter(|n| *n != NULL_LENGTH)
            .ok_or_else(|| {
                Error::new(ErrorKind::InvalidArgument, "byte sequence too long to encode")
                    .with_context("len", self.len())
            })?;
        writer
            .write_u32(len)
            .map_err(|e| Error::from_write("bytes length", e))?;
        writer
            .write(self)
            .map_err(|e| Error::from_write("bytes payload", e))
    }

    fn decode<R: Read>(reader: &mut WireReader<R>) -> Result<Self, Error> {
        let len = reader
            .read_u32()
            .map_err(|e| Error::from_read("bytes length", e))?;
        if len == NULL_LENGTH {
            return Ok(Vec::new());
        }
        reader
            .read_bytes(len as usize)
            .map_err(|e| Error::from_read("bytes payload", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<T: WireFormat>(value: &T) -> Vec<u8> {
        let mut writer = WireWriter::new(Vec::new());
        value.encode(&mut writer).unwrap();
        writer.into_inner()
    }

    fn decode<T: WireFormat>(bytes: &[u8]) -> Result<T, Error> {
        T::decode(&mut WireReader::new(bytes))
    }

    #[test]
    fn test_string_is_utf16_with_byte_length() {
        let bytes = encode(&"héllo".to_string());
        assert_eq!(&bytes[..4], &[0, 0, 0, 10]);
        assert_eq!(&bytes[4..8], &[0, b'h', 0, 0xE9]);
        assert_eq!(decode::<String>(&bytes).unwrap(), "héllo");
    }

    #[test]
    fn test_null_markers_read_as_empty() {
        assert_eq!(decode::<String>(&[0xFF; 4]).unwrap(), "");
        assert_eq!(decode::<Vec<u8>>(&[0xFF; 4]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_char_surrogate_pair() {
        let bytes = encode(&'😀');
        assert_eq!(bytes, vec![0xD8, 0x3D, 0xDE, 0x00]);
        assert_eq!(decode::<char>(&bytes).unwrap(), '😀');
        assert_eq!(encode(&'A'), vec![0, 0x41]);
    }

    #[test]
    fn test_lone_low_surrogate_is_malformed() {
        let err = decode::<char>(&[0xDC, 0x00]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
    }

    #[test]
    fn test_odd_string_length_is_malformed() {
        let err = decode::<String>(&[0, 0, 0, 3, 0, 0x41, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
    }

    #[test]
    fn test_truncated_payloads() {
        let err = decode::<Vec<u8>>(&[0, 0, 0, 5, 1, 2]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);

        let err = decode::<String>(&[0, 0, 0, 4, 0, 0x41]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);

        let err = decode::<i64>(&[0; 7]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
    }

    #[test]
    fn test_fixed_width_values() {
        assert_eq!(encode(&-2i32), vec![0xFF, 0xFF, 0xFF, 0xFE]);
        assert_eq!(encode(&true), vec![1]);
        assert!(decode::<bool>(&[7]).unwrap());
        assert_eq!(decode::<u16>(&[1, 0]).unwrap(), 256);
    }
}
