//! HashTable: fixed array of chains indexed by `hash(key) mod bucket_count`.

use crate::chain::{self, Chain, Link};
use crate::config::TableConfig;
use crate::error::{ConfigError, EntryNotPresent, Error};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use log::{debug, trace};

/// Hash table with separately chained buckets.
///
/// The number of buckets is chosen at construction and never changes, so
/// lookups cost O(chain length); with a well-distributed hasher that is
/// `len() / bucket_count()` on average.
#[derive(Clone)]
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    hasher: S,
    buckets: Box<[Chain<K, V>]>,
}

impl<K, V> HashTable<K, V>
where
    K: Eq + Hash,
{
    /// Empty table with the default bucket count.
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    pub fn with_bucket_count(bucket_count: usize) -> Result<Self, ConfigError> {
        TableConfig::new(bucket_count).map(Self::with_config)
    }

    pub fn with_config(config: TableConfig) -> Self {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V, S> Default for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_config_and_hasher(TableConfig::default(), hasher)
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Self {
        let bucket_count = config.bucket_count();
        debug!("creating hash table with {bucket_count} buckets");
        Self {
            hasher,
            buckets: (0..bucket_count).map(|_| Chain::new()).collect(),
        }
    }

    /// Index of the bucket `q` belongs to, in `0..bucket_count()`.
    pub fn bucket_index<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(q) % self.buckets.len() as u64) as usize
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.buckets[self.bucket_index(q)].find(q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let chain = &self.buckets[self.bucket_index(q)];
        chain
            .find(q)
            .and_then(|link| chain.get(link))
            .map(|(_, v)| v)
            .ok_or(Error::KeyNotFound)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(q);
        let chain = &mut self.buckets[index];
        let link = chain.find(q).ok_or(Error::KeyNotFound)?;
        chain
            .get_mut(link)
            .map(|(_, v)| v)
            .ok_or(Error::KeyNotFound)
    }

    /// Insert `key`, or replace the entry already stored under it.
    ///
    /// A replaced entry is removed and the new one appended, so the key moves
    /// to the end of its chain. Returns the previous value, if any.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let chain = &mut self.buckets[index];
        let previous = chain.find(&key).map(|link| take(chain, link).1);
        chain.append(key, value);
        if previous.is_some() {
            trace!("set: updated bucket {index}, chain length {}", chain.len());
        } else {
            trace!("set: inserted into bucket {index}, chain length {}", chain.len());
        }
        previous
    }

    /// Remove the entry for `q` and return its value.
    pub fn delete<Q>(&mut self, q: &Q) -> Result<V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(q);
        let chain = &mut self.buckets[index];
        let link = chain.find(q).ok_or(Error::KeyNotFound)?;
        let (_, value) = take(chain, link);
        trace!("delete: bucket {index}, chain length {}", chain.len());
        Ok(value)
    }
}

// `link` must come from a `find` on `chain` with no mutation in between.
fn take<K, V>(chain: &mut Chain<K, V>, link: Link) -> (K, V) {
    match chain.delete(link) {
        Ok(kv) => kv,
        Err(EntryNotPresent) => unreachable!("link from find is live in its chain"),
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Chain::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Chain::is_empty)
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Entries per bucket. Reported only; the table never resizes.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.bucket_count() as f64
    }

    /// The chain stored at `index`, if `index < bucket_count()`.
    pub fn bucket(&self, index: usize) -> Option<&Chain<K, V>> {
        self.buckets.get(index)
    }

    /// All entries, bucket by bucket, each bucket in chain order.
    pub fn items(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.len(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.items() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.items() }
    }
}

/// Iterator over `(&K, &V)` of a `HashTable`.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Chain<K, V>>,
    current: Option<chain::Iter<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            buckets: self.buckets.clone(),
            current: self.current.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(item);
            }
            self.current = Some(self.buckets.next()?.items());
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// Iterator over the keys of a `HashTable`.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

/// Iterator over the values of a `HashTable`.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items()
    }
}

impl<K, V, S> Extend<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

/// `{k1: v1, k2: v2}` in enumeration order, keys and values in their
/// `Debug` form.
impl<K, V, S> fmt::Display for HashTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.items().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k:?}: {v:?}")?;
        }
        f.write_str("}")
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashTable").field(&DebugItems(self)).finish()
    }
}

struct DebugItems<'a, K, V, S>(&'a HashTable<K, V, S>);

impl<'a, K, V, S> fmt::Debug for DebugItems<'a, K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.items()).finish()
    }
}
