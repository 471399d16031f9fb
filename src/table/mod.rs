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

//! Hashing, bucket chaining and resizing shared by every integer-pair map.
//!
//! The table never allocates per entry. Every entry lives at a *slot*: an index
//! into flat parallel columns (`bucket_next` here, key and value columns in the
//! [`SlotStore`]). Slots are handed out in insertion order and never move.
//!
//! `slot_head[h]` holds the first slot of bucket `h` and `bucket_next[slot]`
//! links to the next slot of the same bucket, with [`NIL`] ending a chain.
//! Growing the bucket table only rebuilds these links; key and value columns
//! are left untouched.

use tracing::debug;
use tracing::trace;
use tracing::warn;

/// Chain terminator and empty-bucket marker.
pub(crate) const NIL: u32 = u32::MAX;

/// Initial bucket table length.
pub const DEFAULT_TABLE_LEN: usize = 8;

/// Initial slot capacity of every parallel column.
pub const DEFAULT_SLOT_CAPACITY: usize = 32;

/// Bucket tables stop doubling at this length.
pub const MAX_TABLE_LEN: usize = 1 << 30;

const HASH_SEED: i32 = 23;
const HASH_MULTIPLIER: i32 = 31;

/// When the bucket table must double, as a function of the slot count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadPolicy {
    /// Rehash once `count >= table_len / divisor`.
    Fraction(usize),
    /// Rehash once `count / per_bucket >= table_len`.
    PerBucket(usize),
}

impl LoadPolicy {
    #[inline]
    pub(crate) fn needs_rehash(self, count: usize, table_len: usize) -> bool {
        match self {
            LoadPolicy::Fraction(divisor) => count >= table_len / divisor,
            LoadPolicy::PerBucket(per_bucket) => count / per_bucket >= table_len,
        }
    }
}

/// Key and value columns addressed by slot index.
///
/// Implementations keep every column at the same logical length; the table
/// appends through [`push`](Self::push) and reads keys back when rehashing.
pub(crate) trait SlotStore {
    type Value;

    const LOAD_POLICY: LoadPolicy;

    /// Longest bucket table the store may be hashed into.
    const MAX_TABLE_LEN: usize = MAX_TABLE_LEN;

    /// Keys in slot order.
    fn keys(&self) -> impl Iterator<Item = (i32, i32)> + '_;

    fn key_eq(&self, slot: usize, first: i32, second: i32) -> bool;

    fn push(&mut self, first: i32, second: i32, value: Self::Value);

    /// Makes room for `capacity` slots in total.
    fn reserve_slots(&mut self, capacity: usize);

    fn heap_size(&self) -> usize;
}

/// Outcome of [`PairKeyTable::insert`].
pub(crate) enum Probe<V> {
    /// The key already owns `slot`; the value is handed back for the caller to store.
    Found(usize, V),
    /// A new slot was appended for the key.
    Inserted,
}

enum Chain {
    Match(usize),
    /// No match; the chain ends at this slot.
    Tail(usize),
    /// No match; the bucket at this index is empty.
    Empty(usize),
}

#[inline]
pub(crate) fn hash(first: i32, second: i32, table_len: usize) -> usize {
    debug_assert!(table_len.is_power_of_two());
    let h = HASH_SEED
        .wrapping_mul(HASH_MULTIPLIER)
        .wrapping_add(first)
        .wrapping_mul(HASH_MULTIPLIER)
        .wrapping_add(second);
    (h as u32 as usize) & (table_len - 1)
}

/// Next bucket table length, or `None` once doubling would pass `max_len`.
#[inline]
pub(crate) fn next_table_len(table_len: usize, max_len: usize) -> Option<usize> {
    let next = table_len.checked_mul(2)?;
    (next <= max_len).then_some(next)
}

#[derive(Clone)]
pub(crate) struct PairKeyTable<S> {
    slot_head: Box<[u32]>,
    bucket_next: Vec<u32>,
    store: S,
    capacity: usize,
    capped: bool,
}

impl<S: SlotStore + Default> PairKeyTable<S> {
    pub(crate) fn new() -> Self {
        Self::with_sizes(DEFAULT_TABLE_LEN, DEFAULT_SLOT_CAPACITY)
    }

    /// Sizes the columns for `slots` entries and picks a bucket table that will
    /// not need rehashing before then.
    pub(crate) fn with_capacity(slots: usize) -> Self {
        let capacity = slots.max(DEFAULT_SLOT_CAPACITY).next_power_of_two();
        let mut table_len = DEFAULT_TABLE_LEN;
        while S::LOAD_POLICY.needs_rehash(slots, table_len) {
            match next_table_len(table_len, S::MAX_TABLE_LEN) {
                Some(next) => table_len = next,
                None => break,
            }
        }
        Self::with_sizes(table_len, capacity)
    }

    fn with_sizes(table_len: usize, capacity: usize) -> Self {
        let mut store = S::default();
        store.reserve_slots(capacity);
        Self {
            slot_head: vec![NIL; table_len].into_boxed_slice(),
            bucket_next: Vec::with_capacity(capacity),
            store,
            capacity,
            capped: false,
        }
    }

    /// Drops every entry and returns to the default sizes.
    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }
}

impl<S: SlotStore> PairKeyTable<S> {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.bucket_next.len()
    }

    #[cfg(test)]
    pub(crate) fn table_len(&self) -> usize {
        self.slot_head.len()
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub(crate) fn into_store(self) -> S {
        self.store
    }

    pub(crate) fn heap_size(&self) -> usize {
        let links = self.slot_head.len() + self.bucket_next.capacity();
        links * size_of::<u32>() + self.store.heap_size()
    }

    /// Slot holding `(first, second)`, if any.
    pub(crate) fn get_slot(&self, first: i32, second: i32) -> Option<usize> {
        match self.locate(first, second) {
            Chain::Match(slot) => Some(slot),
            Chain::Tail(_) | Chain::Empty(_) => None,
        }
    }

    /// Finds the slot for `(first, second)`, appending a new one at the end of
    /// its bucket chain if the key is not present yet.
    ///
    /// Growth is checked first, on every call, even when the key turns out to
    /// exist already.
    pub(crate) fn insert(&mut self, first: i32, second: i32, value: S::Value) -> Probe<S::Value> {
        self.grow();
        match self.locate(first, second) {
            Chain::Match(slot) => Probe::Found(slot, value),
            Chain::Tail(tail) => {
                let slot = self.append(first, second, value);
                self.bucket_next[tail] = slot;
                Probe::Inserted
            }
            Chain::Empty(bucket) => {
                let slot = self.append(first, second, value);
                self.slot_head[bucket] = slot;
                Probe::Inserted
            }
        }
    }

    /// Walks the chain for `(first, second)`, remembering the last slot seen
    /// so an insert can link onto it without a second walk.
    fn locate(&self, first: i32, second: i32) -> Chain {
        let bucket = hash(first, second, self.slot_head.len());
        let mut slot = self.slot_head[bucket];
        let mut tail = NIL;
        while slot != NIL {
            let index = slot as usize;
            if self.store.key_eq(index, first, second) {
                return Chain::Match(index);
            }
            tail = slot;
            slot = self.bucket_next[index];
        }
        if tail == NIL {
            Chain::Empty(bucket)
        } else {
            Chain::Tail(tail as usize)
        }
    }

    fn append(&mut self, first: i32, second: i32, value: S::Value) -> u32 {
        let slot = u32::try_from(self.bucket_next.len())
            .ok()
            .filter(|&slot| slot != NIL)
            .expect("slot index exceeds u32 range");
        self.bucket_next.push(NIL);
        self.store.push(first, second, value);
        slot
    }

    fn grow(&mut self) {
        let count = self.len();

        if count >= self.capacity {
            let capacity = self.capacity * 2;
            trace!(count, capacity, "growing slot columns");
            self.bucket_next.reserve_exact(capacity - count);
            self.store.reserve_slots(capacity);
            self.capacity = capacity;
        }

        let table_len = self.slot_head.len();
        if S::LOAD_POLICY.needs_rehash(count, table_len) {
            match next_table_len(table_len, S::MAX_TABLE_LEN) {
                Some(new_len) => self.rehash(new_len),
                None if !self.capped => {
                    warn!(count, table_len, "bucket table at maximum length; chains will grow");
                    self.capped = true;
                }
                None => {}
            }
        }
    }

    fn rehash(&mut self, new_len: usize) {
        debug!(
            count = self.len(),
            old_len = self.slot_head.len(),
            new_len,
            "rehashing bucket table"
        );
        let mut slot_head = vec![NIL; new_len].into_boxed_slice();
        for (slot, (first, second)) in self.store.keys().enumerate() {
            let bucket = hash(first, second, new_len);
            self.bucket_next[slot] = slot_head[bucket];
            slot_head[bucket] = slot as u32;
        }
        self.slot_head = slot_head;
    }
}
