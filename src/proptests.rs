use super::dynamic::{DynComparator, DynKey};
use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(i16, u32),
    Remove(i16),
    Get(i16),
    PopFirst,
    PopLast,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // A narrow key range makes overwrites and hits on remove likely.
    let key = -200i16..200;
    let op = prop_oneof![
        50 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        30 => key.clone().prop_map(Op::Remove),
        16 => key.prop_map(Op::Get),
        2 => Just(Op::PopFirst),
        2 => Just(Op::PopLast),
    ];
    prop::collection::vec(op, 0..=1000)
}

/// Largest height an AVL tree with `len` nodes can have.
fn height_bound(len: usize) -> usize {
    // Sparsest trees: min_nodes(h) = min_nodes(h - 1) + min_nodes(h - 2) + 1
    let (mut height, mut prev, mut cur) = (0, 0, 1);
    while cur <= len {
        (prev, cur) = (cur, cur + prev + 1);
        height += 1;
    }
    height
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t: AvlTreeMap<i16, u32> = AvlTreeMap::new();
        let mut m: BTreeMap<i16, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(t.insert(key, value), Ok(m.insert(key, value)));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(t.remove(&key), Ok(m.remove(&key)));
                    prop_assert_eq!(t.get(&key), Ok(None));
                }
                Op::Get(key) => {
                    prop_assert_eq!(t.get(&key).map(|v| v.copied()), Ok(m.get(&key).copied()));
                }
                Op::PopFirst => {
                    prop_assert_eq!(t.pop_first().ok(), m.pop_first());
                }
                Op::PopLast => {
                    prop_assert_eq!(t.pop_last().ok(), m.pop_last());
                }
            }

            t.check_consistency();
            prop_assert_eq!(t.len(), m.len());
            prop_assert!(t.height() <= height_bound(t.len()));
        }

        let got: Vec<(i16, u32)> = t.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(i16, u32)> = m.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(got, expected);
        prop_assert_eq!(t.min().ok(), m.first_key_value());
        prop_assert_eq!(t.max().ok(), m.last_key_value());
    }

    #[test]
    fn prop_distinct_len(keys in prop::collection::vec(any::<u8>(), 0..500)) {
        let mut t = AvlTreeMap::new();
        for (i, key) in keys.iter().enumerate() {
            t.insert(*key, i).unwrap();
        }
        let mut distinct = keys.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(t.len(), distinct.len());

        // Re-inserting present keys changes values only.
        for key in &distinct {
            prop_assert!(t.insert(*key, usize::MAX).unwrap().is_some());
        }
        prop_assert_eq!(t.len(), distinct.len());
        prop_assert!(t.iter().all(|(_, v)| *v == usize::MAX));
        t.check_consistency();
    }

    #[test]
    fn prop_mixed_kinds_rejected(
        ints in prop::collection::vec(any::<i64>(), 1..200),
        text in "[a-z]{1,8}",
    ) {
        let mut t = AvlTreeMap::with_comparator(DynComparator);
        for i in &ints {
            t.insert(DynKey::Int(*i), ()).unwrap();
        }
        let before: Vec<DynKey> = t.iter().map(|(k, _)| k.clone()).collect();

        let err = t.insert(DynKey::Text(text.clone()), ()).unwrap_err();
        let is_kind_mismatch = matches!(err, ComparisonError::KindMismatch { .. });
        prop_assert!(is_kind_mismatch);
        prop_assert!(t.remove(&DynKey::Text(text)).is_err());

        let after: Vec<DynKey> = t.iter().map(|(k, _)| k.clone()).collect();
        prop_assert_eq!(before, after);
        t.check_consistency();
    }
}
