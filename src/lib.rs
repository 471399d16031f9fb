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

//! Memory-compact hash maps keyed by pairs of 32-bit integers.
//!
//! Symbol tables and graph indices often need millions of tiny `(i32, i32) -> V`
//! entries. A general-purpose map pays for each one with hashing state, padding
//! and control bytes; the maps here keep every entry in flat parallel columns
//! addressed by a slot index, chain colliding keys through those indices, and
//! never allocate per entry.
//!
//! - [`IntPairMap`](object::IntPairMap) holds any value type, with each key
//!   packed into a single `u64`.
//! - [`CompactIntPairMap`](compact::CompactIntPairMap) holds `i32` values and
//!   stores keys and values as variable-length integers in
//!   [`VarIntArray`](varint::VarIntArray) columns.
//!
//! Both maps iterate in insertion order and support no removal other than
//! `clear`. Neither is internally synchronized.

pub mod compact;
pub mod error;
mod key;
pub mod object;
mod table;
pub mod varint;

pub use self::key::PairKey;
pub use self::table::DEFAULT_SLOT_CAPACITY;
pub use self::table::DEFAULT_TABLE_LEN;
pub use self::table::MAX_TABLE_LEN;
