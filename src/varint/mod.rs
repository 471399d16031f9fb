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

//! Variable-length integer storage.
//!
//! [`VarIntArray`] is the compact column store behind
//! [`CompactIntPairMap`](crate::compact::CompactIntPairMap): an append-only,
//! index-addressable sequence of `i32` where small magnitudes take a single
//! byte.
//!
//! ```rust
//! # use intpairmap::varint::VarIntArray;
//! let mut array = VarIntArray::new();
//! let i = array.push(-3);
//! array.push(1 << 20);
//! array.set(i, 42);
//! assert_eq!(array.get(0), 42);
//! assert_eq!(array.len(), 2);
//! ```

mod array;
pub mod codec;

pub use self::array::BLOCK_LEN;
pub use self::array::Iter;
pub use self::array::VarIntArray;
