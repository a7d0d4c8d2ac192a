//! Property-based tests for `HashSet`
//!
//! Compares the bucketed set against `std::collections::BTreeSet` as a model.

use hashset::{HashSet, HashSetError};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Hashes of one fixed length, with a narrow prefix range so buckets collide often.
fn hash_strategy(len: usize) -> impl Strategy<Value = Vec<u8>> {
    (0u8..4, any::<u8>(), prop::collection::vec(any::<u8>(), len - 2)).prop_map(
        |(hi, lo, payload)| {
            let mut hash = vec![hi, lo];
            hash.extend(payload);
            hash
        },
    )
}

fn hashes_strategy() -> impl Strategy<Value = (usize, Vec<Vec<u8>>)> {
    (2usize..12).prop_flat_map(|len| {
        (
            Just(len),
            prop::collection::vec(hash_strategy(len), 0..400),
        )
    })
}

proptest! {
    #[test]
    fn prop_matches_model((len, hashes) in hashes_strategy(), probes in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut set = HashSet::new();
        let mut model = BTreeSet::new();

        for hash in &hashes {
            prop_assert_eq!(set.add(hash), model.insert(hash.clone()));
        }

        prop_assert_eq!(set.len(), model.len());
        for hash in &hashes {
            prop_assert!(set.contains(hash));
        }

        // probe values built from arbitrary bytes, truncated or padded to the set's length
        let mut probe = probes.clone();
        probe.resize(len, 0);
        prop_assert_eq!(set.contains(&probe), model.contains(&probe));
    }

    #[test]
    fn prop_add_is_idempotent((_len, hashes) in hashes_strategy()) {
        let once: HashSet = hashes.iter().collect();
        let mut twice = once.clone();
        for hash in &hashes {
            prop_assert!(!twice.add(hash));
        }

        prop_assert_eq!(once.len(), twice.len());
        prop_assert!(once.iter().eq(twice.iter()));
    }

    #[test]
    fn prop_buckets_strictly_sorted((_len, hashes) in hashes_strategy()) {
        let set: HashSet = hashes.iter().collect();

        let mut total = 0;
        for prefix in 0..=u16::MAX {
            let payloads: Vec<&[u8]> = set.bucket(prefix).collect();
            prop_assert!(payloads.windows(2).all(|pair| pair[0] < pair[1]));
            total += payloads.len();
        }
        prop_assert_eq!(total, set.len());
    }

    #[test]
    fn prop_iter_is_sorted_and_complete((_len, hashes) in hashes_strategy()) {
        let set: HashSet = hashes.iter().collect();
        let model: BTreeSet<Vec<u8>> = hashes.into_iter().collect();

        let stored: Vec<Vec<u8>> = set.iter().collect();
        let expected: Vec<Vec<u8>> = model.into_iter().collect();
        prop_assert_eq!(stored, expected);
    }

    #[test]
    fn prop_length_gating(first_len in 2usize..40, other_len in 0usize..40) {
        prop_assume!(first_len != other_len);

        let mut set = HashSet::new();
        prop_assert!(set.add(&vec![0xabu8; first_len]));

        let err = set.try_add(&vec![0xcdu8; other_len]);
        prop_assert_eq!(err, Err(HashSetError::InconsistentLength { expected: first_len, found: other_len }));
        prop_assert_eq!(set.len(), 1);
        prop_assert_eq!(set.hash_len(), Some(first_len));
    }
}
