// HashTable integration tests.
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Round-trip: a set key reads back its latest value.
// - Uniqueness: updating a key never grows the table.
// - Not-found: get/delete on absent keys fail with KeyNotFound,
//   contains is false, and nothing else changes.
// - Length: len() == distinct keys set - keys deleted == keys().count().
// - Enumeration: keys/values/items agree and rebuild an equal table.
// - Threading: the table can be moved across threads and shared behind
//   an external lock.
use chained_hashtable::{ConfigError, Error, HashTable, TableConfig, DEFAULT_BUCKET_COUNT};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Test: the reference walk-through on a default table.
// Assumes: default bucket count is 8.
// Verifies: lengths, lookups, not-found after delete, update in place.
#[test]
fn roman_numeral_scenario() {
    init_logging();
    let mut t: HashTable<char, i32> = HashTable::new();
    assert_eq!(t.bucket_count(), DEFAULT_BUCKET_COUNT);

    t.set('I', 1);
    t.set('V', 5);
    t.set('X', 10);
    assert_eq!(t.len(), 3);
    assert_eq!(t.get(&'V'), Ok(&5));
    assert!(t.contains(&'X'));
    assert!(!t.contains(&'Z'));

    assert_eq!(t.delete(&'I'), Ok(1));
    assert_eq!(t.len(), 2);
    assert_eq!(t.get(&'I'), Err(Error::KeyNotFound));

    assert_eq!(t.set('V', 50), Some(5));
    assert_eq!(t.get(&'V'), Ok(&50));
    assert_eq!(t.len(), 2);
}

// Test: not-found contract on an untouched key.
// Assumes: nothing was ever set under "ghost".
// Verifies: get/delete fail, contains is false, len is unchanged.
#[test]
fn missing_key_contract() {
    init_logging();
    let mut t: HashTable<String, u8> = HashTable::new();
    t.set("real".to_string(), 1);

    assert_eq!(t.get("ghost"), Err(Error::KeyNotFound));
    assert_eq!(t.delete("ghost"), Err(Error::KeyNotFound));
    assert!(!t.contains("ghost"));
    assert_eq!(t.len(), 1);
    assert_eq!(t.get("real"), Ok(&1));
}

// Test: KeyNotFound behaves as a std error.
// Assumes: errors derive Display/Error.
// Verifies: the error can be boxed and propagated with `?`.
#[test]
fn key_not_found_propagates() {
    fn lookup(
        t: &HashTable<&'static str, i32>,
        k: &str,
    ) -> Result<i32, Box<dyn std::error::Error>> {
        Ok(*t.get(k)?)
    }
    let mut t = HashTable::new();
    t.set("a", 1);
    assert_eq!(lookup(&t, "a").unwrap(), 1);
    let err = lookup(&t, "b").unwrap_err();
    assert_eq!(err.to_string(), "key not found");
}

// Test: configuration validation.
// Assumes: zero buckets is the only invalid configuration.
// Verifies: ZeroBuckets is reported; valid counts are honoured.
#[test]
fn bucket_count_configuration() {
    assert!(matches!(
        HashTable::<u32, u32>::with_bucket_count(0),
        Err(ConfigError::ZeroBuckets)
    ));
    let t: HashTable<u32, u32> = HashTable::with_bucket_count(31).unwrap();
    assert_eq!(t.bucket_count(), 31);

    let cfg = TableConfig::new(2).unwrap();
    let mut t: HashTable<u32, u32> = HashTable::with_config(cfg);
    for i in 0..100 {
        t.set(i, i);
    }
    assert_eq!(t.bucket_count(), 2, "bucket count never changes");
    assert_eq!(t.len(), 100);
    assert_eq!(t.load_factor(), 50.0);
}

// Test: length bookkeeping across a mixed workload.
// Assumes: updates do not add entries; failed deletes remove nothing.
// Verifies: len() == distinct set - successful deletes == keys().count().
#[test]
fn length_tracks_distinct_keys() {
    init_logging();
    let mut t: HashTable<u32, u32> = HashTable::with_bucket_count(4).unwrap();
    let mut distinct = std::collections::BTreeSet::new();
    let mut deleted = 0;

    for i in 0..40u32 {
        let k = i % 25;
        t.set(k, i);
        distinct.insert(k);
        if i % 3 == 0 && t.delete(&(k / 2)).is_ok() {
            deleted += 1;
            distinct.remove(&(k / 2));
        }
        assert_eq!(t.len(), distinct.len());
        assert_eq!(t.keys().count(), t.len());
    }
    assert!(deleted > 0);
}

// Test: enumeration rebuilds an equivalent table.
// Assumes: keys() and values() walk entries in the same order.
// Verifies: re-setting keys()[i] -> values()[i] yields equal contents.
#[test]
fn enumeration_reconstructs_table() {
    let mut t: HashTable<String, usize> = HashTable::with_bucket_count(3).unwrap();
    for i in 0..30 {
        t.set(format!("item-{i}"), i * 7);
    }
    let keys: Vec<String> = t.keys().cloned().collect();
    let values: Vec<usize> = t.values().copied().collect();
    assert_eq!(keys.len(), t.len());
    assert_eq!(t.items().count(), t.len());

    let mut rebuilt: HashTable<String, usize> = HashTable::new();
    for (k, v) in keys.into_iter().zip(values) {
        rebuilt.set(k, v);
    }
    let a: BTreeMap<_, _> = t.items().collect();
    let b: BTreeMap<_, _> = rebuilt.items().collect();
    assert_eq!(a, b);
}

// Test: enumeration is deterministic for an unmutated table.
// Assumes: nothing mutates the table between walks.
// Verifies: two walks and a clone's walk agree element by element.
#[test]
fn enumeration_is_deterministic() {
    let t: HashTable<u64, u64> = (0..64).map(|i| (i, i * i)).collect();
    let first: Vec<_> = t.items().collect();
    let second: Vec<_> = (&t).into_iter().collect();
    assert_eq!(first, second);
    let c = t.clone();
    let cloned: Vec<_> = c.items().collect();
    assert_eq!(first, cloned);
}

// Test: display formatting on a single bucket table.
// Assumes: one bucket means enumeration order is insertion order.
// Verifies: "{k: v, ...}" output and re-appending on update.
#[test]
fn display_follows_chain_order() {
    let mut t: HashTable<&'static str, i32> = HashTable::with_bucket_count(1).unwrap();
    t.set("I", 1);
    t.set("V", 5);
    t.set("X", 10);
    assert_eq!(t.to_string(), r#"{"I": 1, "V": 5, "X": 10}"#);
    t.set("I", 100);
    assert_eq!(t.to_string(), r#"{"V": 5, "X": 10, "I": 100}"#);
    assert_eq!(
        format!("{t:?}"),
        r#"HashTable([("V", 5), ("X", 10), ("I", 100)])"#
    );
}

// Test: single-owner table behind an external lock.
// Assumes: HashTable is Send + Sync for Send + Sync parameters.
// Verifies: concurrent writers under a Mutex see every write.
#[test]
fn shared_behind_external_lock() {
    init_logging();
    let table: Arc<Mutex<HashTable<u32, u32>>> = Arc::new(Mutex::new(HashTable::new()));
    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let table = Arc::clone(&table);
            std::thread::spawn(move || {
                for i in 0..25 {
                    let k = t * 25 + i;
                    table.lock().unwrap().set(k, k + 1);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let t = table.lock().unwrap();
    assert_eq!(t.len(), 100);
    assert!((0..100u32).all(|k| t.get(&k) == Ok(&(k + 1))));
}
