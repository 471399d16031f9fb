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

use std::iter::Zip;
use std::slice;
use std::vec;

use crate::key::PairKey;
use crate::object::IntPairMap;

/// Borrowing iterator over the entries of an [`IntPairMap`], in insertion order.
pub struct Iter<'a, V> {
    inner: Zip<slice::Iter<'a, u64>, slice::Iter<'a, V>>,
}

impl<'a, V> Iter<'a, V> {
    pub(super) fn new(keys: &'a [u64], values: &'a [V]) -> Self {
        Self {
            inner: keys.iter().zip(values),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (PairKey, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (&packed, value) = self.inner.next()?;
        Some((PairKey::unpack(packed), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// Iterator yielding mutable references to the values of an [`IntPairMap`].
pub struct IterMut<'a, V> {
    inner: Zip<slice::Iter<'a, u64>, slice::IterMut<'a, V>>,
}

impl<'a, V> IterMut<'a, V> {
    pub(super) fn new(keys: &'a [u64], values: &'a mut [V]) -> Self {
        Self {
            inner: keys.iter().zip(values),
        }
    }
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (PairKey, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let (&packed, value) = self.inner.next()?;
        Some((PairKey::unpack(packed), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

/// Keys of an [`IntPairMap`], in insertion order.
pub struct Keys<'a> {
    inner: slice::Iter<'a, u64>,
}

impl<'a> Keys<'a> {
    pub(super) fn new(keys: &'a [u64]) -> Self {
        Self { inner: keys.iter() }
    }
}

impl Iterator for Keys<'_> {
    type Item = PairKey;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|&packed| PairKey::unpack(packed))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Keys<'_> {}

/// Owning iterator over the entries of an [`IntPairMap`].
pub struct IntoIter<V> {
    inner: Zip<vec::IntoIter<u64>, vec::IntoIter<V>>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (PairKey, V);

    fn next(&mut self) -> Option<Self::Item> {
        let (packed, value) = self.inner.next()?;
        Some((PairKey::unpack(packed), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> IntoIterator for IntPairMap<V> {
    type Item = (PairKey, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        let store = self.table.into_store();
        IntoIter {
            inner: store.keys.into_iter().zip(store.values),
        }
    }
}

impl<'a, V> IntoIterator for &'a IntPairMap<V> {
    type Item = (PairKey, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut IntPairMap<V> {
    type Item = (PairKey, &'a mut V);
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
