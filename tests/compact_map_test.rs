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

use std::collections::HashMap;

use googletest::assert_that;
use googletest::prelude::eq;
use googletest::prelude::le;
use intpairmap::PairKey;
use intpairmap::compact::CompactIntPairMap;
use intpairmap::object::IntPairMap;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_empty() {
    let map = CompactIntPairMap::new();
    assert!(map.is_empty());
    assert_eq!(map.get(0, 0), None);
    assert_eq!(map.get_or_absent(0, 0), CompactIntPairMap::ABSENT);
    assert!(!map.contains_value(0));
    assert_eq!(map.iter().count(), 0);
}

#[test]
fn test_insert_get_overwrite() {
    let mut map = CompactIntPairMap::new();
    assert_eq!(map.insert(1, 2, 3), None);
    assert_eq!(map.insert(1, 2, 30_000), Some(3));
    assert_eq!(map.insert(2, 1, -3), None);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(1, 2), Some(30_000));
    assert_eq!(map.get(2, 1), Some(-3));
    assert!(!map.contains_value(3));
    assert!(map.contains_value(30_000));
}

#[test]
fn test_component_independence() {
    let mut map = CompactIntPairMap::new();
    map.insert(3, 7, 1);
    map.insert(7, 3, 2);
    map.insert(3, 8, 3);
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(3, 7), Some(1));
    assert_eq!(map.get(7, 3), Some(2));
    assert_eq!(map.get(3, 8), Some(3));
    assert_eq!(map.get(8, 3), None);
}

#[test]
fn test_overwrite_in_earlier_block_with_wider_value() {
    let mut map = CompactIntPairMap::new();
    for i in 0..100 {
        map.insert(i, i, 0);
    }
    // slot 5 sits in a sealed block; the new value needs five bytes
    map.insert(5, 5, i32::MAX);
    map.insert(6, 6, i32::MIN + 1);
    for i in 0..100 {
        let expected = match i {
            5 => i32::MAX,
            6 => i32::MIN + 1,
            _ => 0,
        };
        assert_eq!(map.get(i, i), Some(expected));
    }
}

#[test]
fn test_stored_absent_value() {
    let mut map = CompactIntPairMap::new();
    map.insert(4, 4, CompactIntPairMap::ABSENT);
    assert_eq!(map.get(4, 4), Some(i32::MIN));
    assert_eq!(map.get_or_absent(4, 4), CompactIntPairMap::ABSENT);
    assert!(map.contains_key(4, 4));
    assert!(map.contains_value(i32::MIN));
}

#[test]
fn test_iteration_order() {
    let mut map = CompactIntPairMap::new();
    map.insert(9, 9, 1);
    map.insert(-1, 0, 2);
    map.insert(0, -1, 3);
    map.insert(9, 9, 4);

    let entries: Vec<_> = map.iter().collect();
    assert_eq!(
        entries,
        vec![
            (PairKey::new(9, 9), 4),
            (PairKey::new(-1, 0), 2),
            (PairKey::new(0, -1), 3),
        ]
    );
    assert_eq!(map.keys().len(), 3);
    assert_eq!(map.values().collect::<Vec<_>>(), vec![4, 2, 3]);
    assert_eq!((&map).into_iter().count(), 3);
}

#[test]
fn test_clear() {
    let mut map = CompactIntPairMap::new();
    for i in 0..500 {
        map.insert(i, -i, i);
    }
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.get(1, -1), None);
    assert!(!map.contains_value(1));
    map.insert(1, -1, 11);
    assert_eq!(map.get(1, -1), Some(11));
}

#[test]
fn test_dense_grid_scenario() {
    let mut map = CompactIntPairMap::new();
    for i in 0..1000 {
        for j in 0..1000 {
            map.insert(i, j, i * j);
        }
    }
    assert_that!(map.len(), eq(1_000_000));
    for i in 0..1000 {
        for j in 0..1000 {
            assert_eq!(map.get(i, j), Some(i * j));
        }
    }
    assert!(map.contains_value(999 * 999));
    assert!(!map.contains_value(-1));
}

#[test]
fn test_narrow_random_keys_match_std_hash_map() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut map = CompactIntPairMap::new();
    let mut expected = HashMap::new();
    for _ in 0..100_000 {
        // narrow range so overwrites happen
        let first = rng.gen_range(-300..300);
        let second = rng.gen_range(-300..300);
        let value: i32 = rng.r#gen();
        assert_eq!(map.insert(first, second, value), expected.insert((first, second), value));
    }
    assert_eq!(map.len(), expected.len());
    for (&(first, second), &value) in &expected {
        assert_eq!(map.get(first, second), Some(value));
    }
}

#[test]
fn test_full_range_random_keys_match_std_hash_map() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let mut map = CompactIntPairMap::new();
    let mut expected = HashMap::new();
    for _ in 0..100_000 {
        let first: i32 = rng.r#gen();
        let second: i32 = rng.r#gen();
        let value: i32 = rng.r#gen();
        assert_eq!(map.insert(first, second, value), expected.insert((first, second), value));
    }
    assert_eq!(map.len(), expected.len());
    for (&(first, second), &value) in &expected {
        assert_eq!(map.get(first, second), Some(value));
    }
    for (key, value) in &map {
        assert_eq!(expected.get(&(key.first, key.second)), Some(&value));
    }

    let decoded = CompactIntPairMap::deserialize(&map.serialize()).unwrap();
    assert_eq!(decoded, map);
}

#[test]
fn test_extreme_components() {
    let mut map = CompactIntPairMap::new();
    let keys = [
        (i32::MIN, i32::MIN),
        (i32::MIN, i32::MAX),
        (i32::MAX, i32::MIN),
        (i32::MAX, i32::MAX),
        (-1, 0),
        (0, -1),
        (0, 0),
    ];
    for (i, &(first, second)) in keys.iter().enumerate() {
        map.insert(first, second, i as i32 - 3);
    }
    assert_eq!(map.len(), keys.len());
    for (i, &(first, second)) in keys.iter().enumerate() {
        assert_eq!(map.get(first, second), Some(i as i32 - 3));
    }
    let stored: Vec<(i32, i32)> = map.keys().map(<(i32, i32)>::from).collect();
    assert_eq!(stored, keys);
    assert_eq!(map.get(i32::MIN, 0), None);
}

#[test]
fn test_smaller_than_object_map_for_small_numbers() {
    let compact: CompactIntPairMap = (0..10_000).map(|i| (PairKey::new(i % 100, i / 100), i % 50)).collect();
    let object: IntPairMap<i32> = compact.iter().collect();
    assert_eq!(object.len(), compact.len());
    assert_that!(compact.heap_size(), le(object.heap_size()));
}

#[test]
fn test_equality_ignores_insertion_order() {
    let a: CompactIntPairMap = [(PairKey::new(1, 1), 1), (PairKey::new(2, 2), 2)].into_iter().collect();
    let b: CompactIntPairMap = [(PairKey::new(2, 2), 2), (PairKey::new(1, 1), 1)].into_iter().collect();
    assert_eq!(a, b);
    assert_eq!(format!("{a:?}"), "{(1, 1): 1, (2, 2): 2}");
}
