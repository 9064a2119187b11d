#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can look at
// individual buckets alongside the public operations.

use crate::config::TableConfig;
use crate::error::Error;
use crate::hash_table::HashTable;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Operations index into a small key pool so shrinking converges on few keys.
#[derive(Clone, Debug)]
enum Op {
    Set(usize, i32),
    Get(usize),
    Delete(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    (1usize..=16, proptest::collection::vec("[a-z]{0,5}", 1..=8)).prop_flat_map(
        |(buckets, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let contains_pool = proptest::sample::select(pool.clone());
            let op = prop_oneof![
                (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Set(i, v)),
                idx.clone().prop_map(Op::Get),
                idx.clone().prop_map(Op::Delete),
                prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(Op::Contains),
                (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
                Just(Op::Iterate),
            ];
            proptest::collection::vec(op, 1..60)
                .prop_map(move |ops| (buckets, pool.clone(), ops))
        },
    )
}

// Drives `sut` and a `std` model through `ops`, checking after every step:
// - `set` returns the previous value exactly when the model had one.
// - `get`/`delete` fail with `KeyNotFound` iff the model lacks the key.
// - `contains` parity, including borrowed `&str` queries.
// - every live key sits in chain `bucket_index(key)` and nowhere else.
// - `len`, `is_empty`, `keys().len()` and `items().len()` match the model.
fn run_against_model<S: BuildHasher>(
    mut sut: HashTable<Key, i32, S>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();

    for op in ops {
        match op {
            Op::Set(i, v) => {
                let k = key_from(pool, i);
                let before_len = sut.len();
                let prev = sut.set(k.clone(), v);
                let model_prev = model.insert(k, v);
                prop_assert_eq!(prev, model_prev);
                if model_prev.is_some() {
                    prop_assert_eq!(sut.len(), before_len, "update must not change len");
                }
            }
            Op::Get(i) => {
                let k = key_from(pool, i);
                match model.get(&k) {
                    Some(v) => prop_assert_eq!(sut.get(&k), Ok(v)),
                    None => prop_assert_eq!(sut.get(&k), Err(Error::KeyNotFound)),
                }
            }
            Op::Delete(i) => {
                let k = key_from(pool, i);
                let res = sut.delete(&k);
                match model.remove(&k) {
                    Some(v) => prop_assert_eq!(res, Ok(v)),
                    None => prop_assert_eq!(res, Err(Error::KeyNotFound)),
                }
                prop_assert!(!sut.contains(&k));
            }
            Op::Contains(s) => {
                let has = sut.contains(s.as_str());
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            Op::Mutate(i, d) => {
                let k = key_from(pool, i);
                match (sut.get_mut(&k), model.get_mut(&k)) {
                    (Ok(v), Some(mv)) => {
                        *v = v.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (Err(Error::KeyNotFound), None) => {}
                    (s, m) => prop_assert!(false, "get_mut mismatch: {:?} vs {:?}", s, m),
                }
            }
            Op::Iterate => {
                let s_items: BTreeMap<_, _> =
                    sut.items().map(|(k, v)| (k.clone(), *v)).collect();
                let m_items: BTreeMap<_, _> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(s_items, m_items);
            }
        }

        for k in model.keys() {
            let idx = sut.bucket_index(k);
            for b in 0..sut.bucket_count() {
                let chain = sut.bucket(b).expect("bucket in range");
                prop_assert_eq!(chain.find(k).is_some(), b == idx);
            }
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.keys().len(), model.len());
        prop_assert_eq!(sut.items().count(), model.len());
        let s_keys: BTreeSet<_> = sut.keys().cloned().collect();
        prop_assert_eq!(s_keys.len(), model.len(), "keys must be unique");
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap
// with the default hasher and a random bucket count.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((buckets, pool, ops) in arb_scenario()) {
        let config = TableConfig::new(buckets).expect("nonzero bucket count");
        run_against_model(HashTable::with_config(config), &pool, ops)?;
    }
}

// Collision variant using a constant hasher: every key lands in bucket 0,
// so the whole table is one chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((buckets, pool, ops) in arb_scenario()) {
        let config = TableConfig::new(buckets).expect("nonzero bucket count");
        let sut = HashTable::with_config_and_hasher(config, ConstBuildHasher);
        run_against_model(sut, &pool, ops)?;
    }
}
