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

use googletest::assert_that;
use googletest::prelude::eq;
use googletest::prelude::le;
use intpairmap::varint::BLOCK_LEN;
use intpairmap::varint::VarIntArray;
use intpairmap::varint::codec;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_push_get_across_blocks() {
    let values: Vec<i32> = (0..(BLOCK_LEN as i32 * 5 + 3)).map(|i| i * 37 - 1000).collect();
    let array: VarIntArray = values.iter().copied().collect();
    assert_eq!(array.len(), values.len());
    for (i, &v) in values.iter().enumerate() {
        assert_eq!(array.get(i), v);
    }
    assert_eq!(array.iter().collect::<Vec<_>>(), values);
    assert_eq!(array.iter().len(), values.len());
    assert_eq!(array.try_get(values.len()), None);
}

#[test]
fn test_set_matches_vec_model() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut model = vec![0i32; 1000];
    let mut array: VarIntArray = model.iter().copied().collect();
    for _ in 0..5000 {
        let index = rng.gen_range(0..model.len());
        // mix one-byte and five-byte encodings
        let value = if rng.gen_bool(0.5) { rng.gen_range(-64..64) } else { rng.r#gen() };
        model[index] = value;
        array.set(index, value);
    }
    assert_eq!(array.iter().collect::<Vec<_>>(), model);
}

#[test]
fn test_small_values_take_about_one_byte() {
    let array: VarIntArray = (0..10_000).map(|i| i % 64).collect();
    let payload: usize = array.iter().map(codec::encoded_len).sum();
    assert_that!(payload, eq(10_000));
    // payload plus one boxed slice header per block
    assert_that!(array.heap_size(), le(10_000 + 10_000 / BLOCK_LEN * 16 + 64));
}

#[test]
fn test_clear_and_reuse() {
    let mut array: VarIntArray = (0..100).collect();
    array.clear();
    assert!(array.is_empty());
    assert_eq!(array.heap_size(), 0);
    assert_eq!(array.push(i32::MIN), 0);
    assert_eq!(array.get(0), i32::MIN);
}

#[test]
fn test_equality_and_debug() {
    let a: VarIntArray = [1, -2, 3].into_iter().collect();
    let mut b = VarIntArray::with_capacity(3);
    b.extend([1, -2, 3]);
    assert_eq!(a, b);
    assert_eq!(format!("{a:?}"), "[1, -2, 3]");
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn test_get_out_of_bounds() {
    let array: VarIntArray = (0..3).collect();
    array.get(3);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn test_set_out_of_bounds() {
    let mut array = VarIntArray::new();
    array.set(0, 1);
}
