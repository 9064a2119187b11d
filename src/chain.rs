//! Chain: the entries of one bucket, kept in insertion order.
//!
//! Entries live in a `SlotMap` and are threaded into a doubly linked list,
//! so appending and unlinking are O(1) while lookup is a linear scan from the
//! head. A `Link` names one entry for as long as it stays in the chain and
//! only resolves in the chain that minted it; generational keys keep a
//! deleted entry's link from resolving to a later one.

use crate::error::EntryNotPresent;
use core::borrow::Borrow;
use core::sync::atomic::{AtomicU64, Ordering};
use slotmap::{DefaultKey, SlotMap};

// Source of chain identities; every `Chain::new` and clone takes a fresh one.
static NEXT_CHAIN_ID: AtomicU64 = AtomicU64::new(0);

fn next_chain_id() -> u64 {
    NEXT_CHAIN_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identity of one entry in a `Chain`.
///
/// Carries the identity of the chain that minted it; any other chain
/// treats it as not present.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Link {
    chain: u64,
    key: DefaultKey,
}

#[derive(Debug, Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

/// Ordered sequence of key-value entries. Key uniqueness is not enforced
/// here; the owning table does that.
#[derive(Debug)]
pub struct Chain<K, V> {
    id: u64,
    nodes: SlotMap<DefaultKey, Node<K, V>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<K, V> Default for Chain<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// A clone is a distinct chain: links minted by the original do not resolve
// in it.
impl<K: Clone, V: Clone> Clone for Chain<K, V> {
    fn clone(&self) -> Self {
        Self {
            id: next_chain_id(),
            nodes: self.nodes.clone(),
            head: self.head,
            tail: self.tail,
        }
    }
}

impl<K, V> Chain<K, V> {
    pub fn new() -> Self {
        Self {
            id: next_chain_id(),
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add an entry at the end of the chain.
    pub fn append(&mut self, key: K, value: V) -> Link {
        let prev = self.tail;
        let k = self.nodes.insert(Node {
            key,
            value,
            prev,
            next: None,
        });
        match prev {
            Some(p) => self.nodes[p].next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
        self.link(k)
    }

    fn link(&self, key: DefaultKey) -> Link {
        Link { chain: self.id, key }
    }

    // Slot key behind `link`, if it was minted by this chain.
    fn own(&self, link: Link) -> Option<DefaultKey> {
        (link.chain == self.id).then_some(link.key)
    }

    /// First entry, in chain order, for which `pred` holds.
    pub fn find_by<F>(&self, mut pred: F) -> Option<Link>
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut cursor = self.head;
        while let Some(k) = cursor {
            let node = &self.nodes[k];
            if pred(&node.key, &node.value) {
                return Some(self.link(k));
            }
            cursor = node.next;
        }
        None
    }

    /// First entry, in chain order, whose key equals `q`.
    pub fn find<Q>(&self, q: &Q) -> Option<Link>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.find_by(|k, _| k.borrow() == q)
    }

    /// Unlink the entry named by `link` and hand back its key and value.
    pub fn delete(&mut self, link: Link) -> Result<(K, V), EntryNotPresent> {
        let node = self
            .own(link)
            .and_then(|k| self.nodes.remove(k))
            .ok_or(EntryNotPresent)?;
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.nodes[n].prev = node.prev,
            None => self.tail = node.prev,
        }
        Ok((node.key, node.value))
    }

    pub fn get(&self, link: Link) -> Option<(&K, &V)> {
        let k = self.own(link)?;
        self.nodes.get(k).map(|n| (&n.key, &n.value))
    }

    pub fn get_mut(&mut self, link: Link) -> Option<(&K, &mut V)> {
        let k = self.own(link)?;
        self.nodes.get_mut(k).map(|n| (&n.key, &mut n.value))
    }

    /// Entries in chain order.
    pub fn items(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.nodes.len(),
        }
    }
}

/// Iterator over the entries of a `Chain`, head to tail.
pub struct Iter<'a, K, V> {
    nodes: &'a SlotMap<DefaultKey, Node<K, V>>,
    cursor: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Iter {
            nodes: self.nodes,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let k = self.cursor?;
        let nodes: &'a SlotMap<DefaultKey, Node<K, V>> = self.nodes;
        let node = &nodes[k];
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> IntoIterator for &'a Chain<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items()
    }
}
