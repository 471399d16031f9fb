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

use std::fmt;
use std::mem;

use super::codec;

/// Values per encoded block. Random access decodes at most this many varints.
pub const BLOCK_LEN: usize = 16;
const BLOCK_SHIFT: u32 = BLOCK_LEN.trailing_zeros();
const BLOCK_MASK: usize = BLOCK_LEN - 1;

/// Append-only, randomly addressable sequence of `i32` stored as zig-zag varints.
///
/// Values are grouped into blocks of [`BLOCK_LEN`]. Sealed blocks are kept as
/// exact-size boxed byte slices, and the block being filled lives in a growable
/// tail buffer so that [`push`](Self::push) is amortized O(1). Overwriting a value
/// re-encodes only the block that holds it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct VarIntArray {
    blocks: Vec<Box<[u8]>>,
    tail: Vec<u8>,
    len: usize,
}

impl VarIntArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty array whose block index can address `capacity` values
    /// without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut array = Self::new();
        array.reserve(capacity);
        array
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of values the block index can address before it must grow.
    pub fn capacity(&self) -> usize {
        (self.blocks.capacity() + 1) * BLOCK_LEN
    }

    /// Reserves block-index room for at least `additional` more values.
    pub fn reserve(&mut self, additional: usize) {
        let sealed_needed = (self.len + additional) >> BLOCK_SHIFT;
        if sealed_needed > self.blocks.len() {
            self.blocks.reserve_exact(sealed_needed - self.blocks.len());
        }
    }

    /// Appends `value` and returns its index.
    pub fn push(&mut self, value: i32) -> usize {
        let index = self.len;
        codec::write_i32(&mut self.tail, value);
        self.len += 1;
        if self.len & BLOCK_MASK == 0 {
            let sealed = mem::take(&mut self.tail).into_boxed_slice();
            self.blocks.push(sealed);
        }
        index
    }

    /// Returns the value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> i32 {
        match self.try_get(index) {
            Some(value) => value,
            None => panic!("index out of bounds: the len is {} but the index is {index}", self.len),
        }
    }

    pub fn try_get(&self, index: usize) -> Option<i32> {
        if index >= self.len {
            return None;
        }
        let block = self.block(index >> BLOCK_SHIFT);
        let pos = codec::skip(block, index & BLOCK_MASK);
        let (value, _) = codec::read_i32(&block[pos..]).expect("block holds well-formed varints");
        Some(value)
    }

    /// Overwrites the value at `index` without changing the length.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: i32) {
        assert!(
            index < self.len,
            "index out of bounds: the len is {} but the index is {index}",
            self.len
        );
        let block_index = index >> BLOCK_SHIFT;
        let block = self.block(block_index);
        let start = codec::skip(block, index & BLOCK_MASK);
        let (old, old_len) = codec::read_i32(&block[start..]).expect("block holds well-formed varints");
        if old == value {
            return;
        }

        let mut rewritten = Vec::with_capacity(block.len() - old_len + codec::MAX_VARINT_LEN);
        rewritten.extend_from_slice(&block[..start]);
        codec::write_i32(&mut rewritten, value);
        rewritten.extend_from_slice(&block[start + old_len..]);

        if block_index < self.blocks.len() {
            self.blocks[block_index] = rewritten.into_boxed_slice();
        } else {
            self.tail = rewritten;
        }
    }

    pub fn clear(&mut self) {
        self.blocks = Vec::new();
        self.tail = Vec::new();
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            array: self,
            block: 0,
            pos: 0,
            index: 0,
        }
    }

    /// Approximate heap bytes held by the array.
    pub fn heap_size(&self) -> usize {
        let sealed: usize = self.blocks.iter().map(|b| b.len()).sum();
        sealed + self.blocks.capacity() * mem::size_of::<Box<[u8]>>() + self.tail.capacity()
    }

    fn block(&self, block_index: usize) -> &[u8] {
        if block_index < self.blocks.len() {
            &self.blocks[block_index]
        } else {
            &self.tail
        }
    }
}

impl fmt::Debug for VarIntArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Extend<i32> for VarIntArray {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<i32> for VarIntArray {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut array = VarIntArray::new();
        array.extend(iter);
        array
    }
}

impl<'a> IntoIterator for &'a VarIntArray {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sequential decoder over a [`VarIntArray`]; each value is decoded once.
pub struct Iter<'a> {
    array: &'a VarIntArray,
    block: usize,
    pos: usize,
    index: usize,
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.array.len {
            return None;
        }
        let bytes = self.array.block(self.block);
        let (value, n) = codec::read_i32(&bytes[self.pos..]).expect("block holds well-formed varints");
        self.index += 1;
        if self.index & BLOCK_MASK == 0 {
            self.block += 1;
            self.pos = 0;
        } else {
            self.pos += n;
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.array.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
