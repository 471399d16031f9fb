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

//! Zig-zag LEB128 encoding of 32-bit integers.
//!
//! Each byte carries 7 payload bits, least significant group first; the high
//! bit is set on every byte except the last. Signed values are zig-zag mapped
//! first so that small negative numbers stay short.

/// Longest encoding of a 32-bit value.
pub const MAX_VARINT_LEN: usize = 5;

const CONTINUATION: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7F;

/// Why a varint could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The input ended before the terminating byte.
    Truncated,
    /// The value does not fit in 32 bits.
    Overflow,
}

#[inline]
pub const fn zigzag_encode(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

#[inline]
pub const fn zigzag_decode(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

/// Number of bytes `value` occupies once encoded.
#[inline]
pub const fn encoded_len(value: i32) -> usize {
    let bits = 32 - zigzag_encode(value).leading_zeros() as usize;
    if bits == 0 { 1 } else { bits.div_ceil(7) }
}

pub fn write_u32(buf: &mut Vec<u8>, mut value: u32) {
    while value >= CONTINUATION as u32 {
        buf.push((value as u8 & PAYLOAD_MASK) | CONTINUATION);
        value >>= 7;
    }
    buf.push(value as u8);
}

#[inline]
pub fn write_i32(buf: &mut Vec<u8>, value: i32) {
    write_u32(buf, zigzag_encode(value));
}

/// Decodes one unsigned varint from the front of `bytes`, returning the value
/// and the number of bytes consumed.
pub fn read_u32(bytes: &[u8]) -> Result<(u32, usize), DecodeError> {
    let mut value = 0u32;
    for (i, &byte) in bytes.iter().take(MAX_VARINT_LEN).enumerate() {
        let payload = (byte & PAYLOAD_MASK) as u32;
        // the fifth byte may only carry the top four bits
        if i == MAX_VARINT_LEN - 1 && payload > 0x0F {
            return Err(DecodeError::Overflow);
        }
        value |= payload << (7 * i);
        if byte & CONTINUATION == 0 {
            return Ok((value, i + 1));
        }
    }
    if bytes.len() >= MAX_VARINT_LEN {
        Err(DecodeError::Overflow)
    } else {
        Err(DecodeError::Truncated)
    }
}

#[inline]
pub fn read_i32(bytes: &[u8]) -> Result<(i32, usize), DecodeError> {
    read_u32(bytes).map(|(value, n)| (zigzag_decode(value), n))
}

/// Byte offset of the `n`-th varint in a well-formed run of varints.
pub(crate) fn skip(bytes: &[u8], n: usize) -> usize {
    let mut pos = 0;
    let mut remaining = n;
    while remaining > 0 {
        if bytes[pos] & CONTINUATION == 0 {
            remaining -= 1;
        }
        pos += 1;
    }
    pos
}
