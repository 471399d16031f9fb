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

//! Integer-pair map holding arbitrary values.
//!
//! [`IntPairMap`] stores each key packed into one `u64` next to its value in
//! two flat vectors, so an entry costs a key word, a value and a 4-byte chain
//! link, with no per-entry allocation.
//!
//! # Usage
//!
//! ```rust
//! # use intpairmap::object::IntPairMap;
//! # use intpairmap::PairKey;
//! let mut map = IntPairMap::new();
//! assert_eq!(map.insert(3, 7, "a"), None);
//! assert_eq!(map.insert(7, 3, "b"), None);
//! assert_eq!(map.insert(3, 7, "c"), Some("a"));
//!
//! assert_eq!(map.get(3, 7), Some(&"c"));
//! assert_eq!(map[(7, 3)], "b");
//! assert!(!map.contains_key(3, 8));
//!
//! let keys: Vec<PairKey> = map.keys().collect();
//! assert_eq!(keys, [PairKey::new(3, 7), PairKey::new(7, 3)]);
//! ```
//!
//! # Absent values
//!
//! Lookups return [`Option`], so a missing key is always distinguishable from
//! any stored value. A map of `Option<T>` therefore reports three states:
//! `None` (absent), `Some(&None)` and `Some(&Some(_))`.

mod iter;

use std::fmt;
use std::ops::Index;

use crate::key::PairKey;
use crate::key::pack;
use crate::table::LoadPolicy;
use crate::table::PairKeyTable;
use crate::table::Probe;
use crate::table::SlotStore;

pub use self::iter::IntoIter;
pub use self::iter::Iter;
pub use self::iter::IterMut;
pub use self::iter::Keys;

#[derive(Clone)]
pub(crate) struct ObjectStore<V> {
    keys: Vec<u64>,
    values: Vec<V>,
}

impl<V> Default for ObjectStore<V> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<V> SlotStore for ObjectStore<V> {
    type Value = V;

    const LOAD_POLICY: LoadPolicy = LoadPolicy::Fraction(2);

    fn keys(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.keys.iter().map(|&packed| PairKey::unpack(packed).into())
    }

    #[inline]
    fn key_eq(&self, slot: usize, first: i32, second: i32) -> bool {
        self.keys[slot] == pack(first, second)
    }

    fn push(&mut self, first: i32, second: i32, value: V) {
        self.keys.push(pack(first, second));
        self.values.push(value);
    }

    fn reserve_slots(&mut self, capacity: usize) {
        self.keys.reserve_exact(capacity.saturating_sub(self.keys.len()));
        self.values.reserve_exact(capacity.saturating_sub(self.values.len()));
    }

    fn heap_size(&self) -> usize {
        self.keys.capacity() * size_of::<u64>() + self.values.capacity() * size_of::<V>()
    }
}

/// Hash map from `(i32, i32)` keys to values of type `V`.
///
/// Entries are kept in insertion order and are never removed individually;
/// [`clear`](Self::clear) drops all of them at once.
///
/// See the [module documentation](self) for more details.
#[derive(Clone)]
pub struct IntPairMap<V> {
    table: PairKeyTable<ObjectStore<V>>,
}

impl<V> Default for IntPairMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntPairMap<V> {
    pub fn new() -> Self {
        Self {
            table: PairKeyTable::new(),
        }
    }

    /// Creates a map that holds `capacity` entries without growing.
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

    pub fn get(&self, first: i32, second: i32) -> Option<&V> {
        let slot = self.table.get_slot(first, second)?;
        Some(&self.table.store().values[slot])
    }

    pub fn get_mut(&mut self, first: i32, second: i32) -> Option<&mut V> {
        let slot = self.table.get_slot(first, second)?;
        Some(&mut self.table.store_mut().values[slot])
    }

    pub fn contains_key(&self, first: i32, second: i32) -> bool {
        self.table.get_slot(first, second).is_some()
    }

    /// Inserts `value` under `(first, second)`, returning the value it replaced.
    ///
    /// Replacing keeps the entry at its original position in iteration order.
    pub fn insert(&mut self, first: i32, second: i32, value: V) -> Option<V> {
        match self.table.insert(first, second, value) {
            Probe::Found(slot, value) => Some(std::mem::replace(
                &mut self.table.store_mut().values[slot],
                value,
            )),
            Probe::Inserted => None,
        }
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> Iter<'_, V> {
        let store = self.table.store();
        Iter::new(&store.keys, &store.values)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        let store = self.table.store_mut();
        IterMut::new(&store.keys, &mut store.values)
    }

    pub fn keys(&self) -> Keys<'_> {
        Keys::new(&self.table.store().keys)
    }

    pub fn values(&self) -> std::slice::Iter<'_, V> {
        self.table.store().values.iter()
    }

    pub fn values_mut(&mut self) -> std::slice::IterMut<'_, V> {
        self.table.store_mut().values.iter_mut()
    }

    /// Approximate heap bytes held by the map, excluding anything owned by values.
    pub fn heap_size(&self) -> usize {
        self.table.heap_size()
    }
}

impl<V> Index<(i32, i32)> for IntPairMap<V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, (first, second): (i32, i32)) -> &V {
        self.get(first, second).expect("key not present in IntPairMap")
    }
}

impl<V: fmt::Debug> fmt::Debug for IntPairMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(key, value)| ((key.first, key.second), value)))
            .finish()
    }
}

impl<V: PartialEq> PartialEq for IntPairMap<V> {
    /// Maps are equal when they hold the same entries, in any order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key.first, key.second) == Some(value))
    }
}

impl<V: Eq> Eq for IntPairMap<V> {}

impl<V> Extend<(PairKey, V)> for IntPairMap<V> {
    fn extend<I: IntoIterator<Item = (PairKey, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.first, key.second, value);
        }
    }
}

impl<V> FromIterator<(PairKey, V)> for IntPairMap<V> {
    fn from_iter<I: IntoIterator<Item = (PairKey, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = IntPairMap::with_capacity(iter.size_hint().0);
        map.extend(iter);
        map
    }
}
