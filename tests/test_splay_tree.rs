use rand::Rng;
use splay_collections::splay_tree::SplayMap;
use std::collections::BTreeMap;

const NUM_OF_OPERATIONS: usize = 100_000;

#[test]
fn int_test_splay_map() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = SplayMap::new();
    let mut expected = BTreeMap::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 25_000u32);
        let val = rng.gen::<u32>();

        match rng.gen_range(0, 3) {
            0 | 1 => {
                // A duplicate insert keeps the stored value, unlike BTreeMap::insert.
                let newly_inserted = !expected.contains_key(&key);
                if newly_inserted {
                    expected.insert(key, val);
                }
                let (handle, inserted) = map.insert(key, val);
                assert_eq!(inserted, newly_inserted);
                assert_eq!(map.resolve(handle).map(|(_, value)| *value), expected.get(&key).cloned());
            }
            _ => {
                assert_eq!(map.remove(&key), expected.remove(&key).map(|value| (key, value)));
            }
        }
        assert_eq!(map.is_empty(), expected.is_empty());
    }

    assert_eq!(map.len(), expected.len());
    assert_eq!(
        map.iter().collect::<Vec<(&u32, &u32)>>(),
        expected.iter().collect::<Vec<(&u32, &u32)>>(),
    );

    for (key, value) in expected {
        assert_eq!(map.remove(&key), Some((key, value)));
    }
    assert!(map.is_empty());
}

#[test]
fn int_test_splay_map_sequential_keys() {
    let mut map = SplayMap::new();
    for key in 0..1000u32 {
        let (_, inserted) = map.insert(key, key);
        assert!(inserted);
    }

    // Sequential insertion degenerates the tree; lookups must still self-adjust.
    for key in 0..1000u32 {
        let handle = map.find(&key);
        assert_eq!(map.resolve(handle), Some((&key, &key)));
    }

    assert_eq!(
        map.iter().map(|(key, _)| *key).collect::<Vec<u32>>(),
        (0..1000).collect::<Vec<u32>>(),
    );
}

#[test]
fn int_test_serde_round_trip() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = SplayMap::new();
    for _ in 0..1000 {
        map.insert(rng.gen::<u32>(), rng.gen::<u64>());
    }

    let serialized = bincode::serialize(&map).expect("Expected the map to serialize.");
    let deserialized: SplayMap<u32, u64> =
        bincode::deserialize(&serialized).expect("Expected the map to deserialize.");

    assert_eq!(deserialized.len(), map.len());
    assert_eq!(
        deserialized.iter().collect::<Vec<(&u32, &u64)>>(),
        map.iter().collect::<Vec<(&u32, &u64)>>(),
    );
}
