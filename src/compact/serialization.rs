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

//! Binary format of [`CompactIntPairMap`].
//!
//! ```text
//! byte 0      preamble bytes (8)
//! byte 1      serial version
//! byte 2      format id ('P')
//! byte 3      flags
//! bytes 4..8  entry count, u32 little-endian
//! then        first, second, value per entry as zig-zag varints, in insertion order
//! ```

use std::io::Cursor;

use byteorder::ByteOrder;
use byteorder::LittleEndian;
use byteorder::ReadBytesExt;

use crate::compact::CompactIntPairMap;
use crate::error::Error;
use crate::varint::codec;
use crate::varint::codec::DecodeError;

const PREAMBLE_BYTES: u8 = 8;
const SERIAL_VERSION: u8 = 1;
const FORMAT_ID: u8 = b'P';
const FLAGS_IS_EMPTY: u8 = 1 << 0;

/// Every entry encodes to at least one byte per field.
const MIN_ENTRY_BYTES: usize = 3;

impl CompactIntPairMap {
    /// Serializes the map into a compact byte representation.
    pub fn serialize(&self) -> Vec<u8> {
        let mut header = [0u8; PREAMBLE_BYTES as usize];
        header[0] = PREAMBLE_BYTES;
        header[1] = SERIAL_VERSION;
        header[2] = FORMAT_ID;
        header[3] = if self.is_empty() { FLAGS_IS_EMPTY } else { 0 };
        // slot indices are u32, so the count always fits
        LittleEndian::write_u32(&mut header[4..], self.len() as u32);

        let mut bytes = Vec::with_capacity(header.len() + self.len() * MIN_ENTRY_BYTES);
        bytes.extend_from_slice(&header);
        for (key, value) in self.iter() {
            codec::write_i32(&mut bytes, key.first);
            codec::write_i32(&mut bytes, key.second);
            codec::write_i32(&mut bytes, value);
        }
        bytes
    }

    /// Deserializes a map previously produced by [`serialize`](Self::serialize).
    ///
    /// Entries come back in their original insertion order.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        fn make_error(tag: &'static str) -> impl FnOnce(std::io::Error) -> Error {
            move |e| Error::insufficient_data(tag).set_source(e)
        }

        let mut cursor = Cursor::new(bytes);
        let preamble_bytes = cursor.read_u8().map_err(make_error("preamble_bytes"))?;
        let serial_version = cursor.read_u8().map_err(make_error("serial_version"))?;
        let format_id = cursor.read_u8().map_err(make_error("format_id"))?;
        let flags = cursor.read_u8().map_err(make_error("flags"))?;
        let count = cursor
            .read_u32::<LittleEndian>()
            .map_err(make_error("count"))? as usize;

        if format_id != FORMAT_ID {
            return Err(Error::malformed("invalid format id")
                .with_context("expected", FORMAT_ID)
                .with_context("actual", format_id));
        }
        if serial_version != SERIAL_VERSION {
            return Err(Error::malformed("unsupported serial version")
                .with_context("expected", SERIAL_VERSION)
                .with_context("actual", serial_version));
        }
        if preamble_bytes != PREAMBLE_BYTES {
            return Err(Error::malformed("invalid preamble size")
                .with_context("expected", PREAMBLE_BYTES)
                .with_context("actual", preamble_bytes));
        }
        let is_empty = (flags & FLAGS_IS_EMPTY) != 0;
        if is_empty != (count == 0) {
            return Err(Error::malformed("empty flag disagrees with entry count")
                .with_context("count", count));
        }

        let mut rest = &bytes[PREAMBLE_BYTES as usize..];
        if rest.len() / MIN_ENTRY_BYTES < count {
            return Err(Error::insufficient_data("entries").with_context("count", count));
        }

        let mut map = CompactIntPairMap::with_capacity(count);
        for entry in 0..count {
            let first = read_field(&mut rest, entry, "first")?;
            let second = read_field(&mut rest, entry, "second")?;
            let value = read_field(&mut rest, entry, "value")?;
            if map.insert(first, second, value).is_some() {
                return Err(Error::malformed("duplicate key")
                    .with_context("entry", entry)
                    .with_context("key", format!("({first}, {second})")));
            }
        }

        if !rest.is_empty() {
            return Err(Error::malformed("trailing bytes after last entry")
                .with_context("remaining", rest.len()));
        }
        Ok(map)
    }
}

fn read_field(rest: &mut &[u8], entry: usize, tag: &'static str) -> Result<i32, Error> {
    let bytes = *rest;
    match codec::read_i32(bytes) {
        Ok((value, n)) => {
            *rest = &bytes[n..];
            Ok(value)
        }
        Err(DecodeError::Truncated) => Err(Error::insufficient_data(tag).with_context("entry", entry)),
        Err(DecodeError::Overflow) => Err(Error::malformed("varint overflows 32 bits")
            .with_context("field", tag)
            .with_context("entry", entry)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_empty_map_layout() {
        let bytes = CompactIntPairMap::new().serialize();
        assert_eq!(bytes, vec![8, 1, b'P', FLAGS_IS_EMPTY, 0, 0, 0, 0]);
    }

    #[test]
    fn test_entry_layout() {
        let mut map = CompactIntPairMap::new();
        map.insert(1, -1, 64);
        let bytes = map.serialize();
        assert_eq!(bytes, vec![8, 1, b'P', 0, 1, 0, 0, 0, 2, 1, 0x80, 0x01]);
    }

    #[test]
    fn test_rejects_oversized_count_before_allocating() {
        let mut bytes = CompactIntPairMap::new().serialize();
        bytes[3] = 0;
        bytes[4..8].copy_from_slice(&u32::MAX.to_le_bytes());
        let err = CompactIntPairMap::deserialize(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
        assert!(err.to_string().contains("field: entries"));
    }
}
