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

//! Integer-pair map with integer values, stored as variable-length integers.
//!
//! [`CompactIntPairMap`] keeps the first key components, the second key
//! components and the values in three separate [`VarIntArray`] columns. Small
//! numbers take one byte each, at the price of decoding on every access. The
//! bucket table is also allowed to run denser than in
//! [`IntPairMap`](crate::object::IntPairMap): it doubles only once there are
//! four entries per bucket.
//!
//! # Usage
//!
//! ```rust
//! # use intpairmap::compact::CompactIntPairMap;
//! let mut map = CompactIntPairMap::new();
//! map.insert(1, 2, 300);
//! map.insert(2, 1, -4);
//!
//! assert_eq!(map.get(1, 2), Some(300));
//! assert_eq!(map.get(9, 9), None);
//! assert_eq!(map.get_or_absent(9, 9), CompactIntPairMap::ABSENT);
//! assert!(map.contains_value(-4));
//! ```
//!
//! # Serialization
//!
//! ```rust
//! # use intpairmap::compact::CompactIntPairMap;
//! # use intpairmap::PairKey;
//! let map: CompactIntPairMap = (0..100).map(|i| (PairKey::new(i, -i), i * i)).collect();
//!
//! let bytes = map.serialize();
//! let decoded = CompactIntPairMap::deserialize(&bytes).unwrap();
//! assert_eq!(decoded, map);
//! ```

mod serialization;

use std::fmt;
use std::iter::Zip;

use crate::key::PairKey;
use crate::table::LoadPolicy;
use crate::table::PairKeyTable;
use crate::table::Probe;
use crate::table::SlotStore;
use crate::varint;
use crate::varint::VarIntArray;

const LOAD_FACTOR: usize = 4;

#[derive(Clone, Default)]
pub(crate) struct CompactStore {
    firsts: VarIntArray,
    seconds: VarIntArray,
    values: VarIntArray,
}

impl SlotStore for CompactStore {
    type Value = i32;

    const LOAD_POLICY: LoadPolicy = LoadPolicy::PerBucket(LOAD_FACTOR);

    fn keys(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.firsts.iter().zip(self.seconds.iter())
    }

    #[inline]
    fn key_eq(&self, slot: usize, first: i32, second: i32) -> bool {
        self.firsts.get(slot) == first && self.seconds.get(slot) == second
    }

    fn push(&mut self, first: i32, second: i32, value: i32) {
        self.firsts.push(first);
        self.seconds.push(second);
        self.values.push(value);
    }

    fn reserve_slots(&mut self, capacity: usize) {
        for column in [&mut self.firsts, &mut self.seconds, &mut self.values] {
            column.reserve(capacity.saturating_sub(column.len()));
        }
    }

    fn heap_size(&self) -> usize {
        self.firsts.heap_size() + self.seconds.heap_size() + self.values.heap_size()
    }
}

/// Hash map from `(i32, i32)` keys to `i32` values, tuned for memory over speed.
///
/// See the [module documentation](self) for more details.
#[derive(Clone)]
pub struct CompactIntPairMap {
    table: PairKeyTable<CompactStore>,
}

impl Default for CompactIntPairMap {
    fn default() -> Self {
        Self::new()
    }
}

impl CompactIntPairMap {
    /// Returned by [`get_or_absent`](Self::get_or_absent) for a missing key.
    ///
    /// The value itself may still be stored; [`get`](Self::get) tells the two
    /// cases apart while `get_or_absent` cannot.
    pub const ABSENT: i32 = i32::MIN;

    pub fn new() -> Self {
        Self {
            table: PairKeyTable::new(),
        }
    }

    /// Creates a map that holds `capacity` entries without rehashing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: PairKeyTable::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Removes every entry and shrinks back to the default capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn get(&self, first: i32, second: i32) -> Option<i32> {
        let slot = self.table.get_slot(first, second)?;
        Some(self.table.store().values.get(slot))
    }

    /// Like [`get`](Self::get), but reports a missing key as [`ABSENT`](Self::ABSENT).
    pub fn get_or_absent(&self, first: i32, second: i32) -> i32 {
        self.get(first, second).unwrap_or(Self::ABSENT)
    }

    pub fn contains_key(&self, first: i32, second: i32) -> bool {
        self.table.get_slot(first, second).is_some()
    }

    /// Scans every stored value; O(n).
    pub fn contains_value(&self, value: i32) -> bool {
        self.table.store().values.iter().any(|v| v == value)
    }

    /// Inserts `value` under `(first, second)`, returning the value it replaced.
    pub fn insert(&mut self, first: i32, second: i32, value: i32) -> Option<i32> {
        match self.table.insert(first, second, value) {
            Probe::Found(slot, value) => {
                let values = &mut self.table.store_mut().values;
                let old = values.get(slot);
                values.set(slot, value);
                Some(old)
            }
            Probe::Inserted => None,
        }
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        let store = self.table.store();
        Iter {
            inner: store.firsts.iter().zip(store.seconds.iter()).zip(store.values.iter()),
        }
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = PairKey> + '_ {
        let store = self.table.store();
        store
            .firsts
            .iter()
            .zip(store.seconds.iter())
            .map(PairKey::from)
    }

    pub fn values(&self) -> varint::Iter<'_> {
        self.table.store().values.iter()
    }

    /// Approximate heap bytes held by the map.
    pub fn heap_size(&self) -> usize {
        self.table.heap_size()
    }
}

impl fmt::Debug for CompactIntPairMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(key, value)| ((key.first, key.second), value)))
            .finish()
    }
}

impl PartialEq for CompactIntPairMap {
    /// Maps are equal when they hold the same entries, in any order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key.first, key.second) == Some(value))
    }
}

impl Eq for CompactIntPairMap {}

impl Extend<(PairKey, i32)> for CompactIntPairMap {
    fn extend<I: IntoIterator<Item = (PairKey, i32)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.first, key.second, value);
        }
    }
}

impl FromIterator<(PairKey, i32)> for CompactIntPairMap {
    fn from_iter<I: IntoIterator<Item = (PairKey, i32)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = CompactIntPairMap::with_capacity(iter.size_hint().0);
        map.extend(iter);
        map
    }
}

impl<'a> IntoIterator for &'a CompactIntPairMap {
    type Item = (PairKey, i32);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`CompactIntPairMap`], in insertion order.
pub struct Iter<'a> {
    inner: Zip<Zip<varint::Iter<'a>, varint::Iter<'a>>, varint::Iter<'a>>,
}

impl Iterator for Iter<'_> {
    type Item = (PairKey, i32);

    fn next(&mut self) -> Option<Self::Item> {
        let ((first, second), value) = self.inner.next()?;
        Some((PairKey::new(first, second), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
