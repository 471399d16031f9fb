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

//! Integer-pair keys and their packed 64-bit form.

use crate::error::Error;

/// An ordered pair of 32-bit integers used as a map key.
///
/// Equality is component-wise, so `(3, 7)` and `(7, 3)` are different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PairKey {
    pub first: i32,
    pub second: i32,
}

impl PairKey {
    pub const fn new(first: i32, second: i32) -> Self {
        Self { first, second }
    }

    /// Packs the pair into a single word: `second` in the high half, `first` in the low half.
    #[inline]
    pub const fn pack(self) -> u64 {
        pack(self.first, self.second)
    }

    #[inline]
    pub const fn unpack(packed: u64) -> Self {
        Self {
            first: packed as u32 as i32,
            second: (packed >> 32) as u32 as i32,
        }
    }
}

#[inline]
pub(crate) const fn pack(first: i32, second: i32) -> u64 {
    ((second as u32 as u64) << 32) | (first as u32 as u64)
}

impl From<(i32, i32)> for PairKey {
    fn from((first, second): (i32, i32)) -> Self {
        Self { first, second }
    }
}

impl From<PairKey> for (i32, i32) {
    fn from(key: PairKey) -> Self {
        (key.first, key.second)
    }
}

impl From<[i32; 2]> for PairKey {
    fn from([first, second]: [i32; 2]) -> Self {
        Self { first, second }
    }
}

impl TryFrom<&[i32]> for PairKey {
    type Error = Error;

    /// Builds a key from a slice, which must hold exactly two components.
    fn try_from(components: &[i32]) -> Result<Self, Self::Error> {
        match *components {
            [first, second] => Ok(Self { first, second }),
            _ => Err(
                Error::invalid_argument("key is not an integer pair")
                    .with_context("components", components.len()),
            ),
        }
    }
}

impl TryFrom<Vec<i32>> for PairKey {
    type Error = Error;

    fn try_from(components: Vec<i32>) -> Result<Self, Self::Error> {
        PairKey::try_from(components.as_slice())
    }
}
