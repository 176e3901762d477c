//! Rank-Pairing Queue
//!
//! A keyed min-priority queue built on a rank-pairing heap:
//! - O(1) amortized push and decrease
//! - O(log n) amortized pop
//! - O(1) peek, membership test and value lookup
//!
//! # Algorithm Overview
//!
//! Elements live in a forest of half-trees whose roots form a circular list
//! with a pointer to the minimum root.
//!
//! - **Push**: a new rank-0 leaf is spliced into the root list; nothing else
//!   moves. Roots accumulate until the next pop.
//! - **Pop**: the minimum root is removed; its left spine and all other roots
//!   are linked pairwise by rank (like adding binary numbers), leaving at
//!   most one root per rank.
//! - **Decrease**: the node is cut out of its tree together with its left
//!   subtree and becomes a root. Ranks of the nodes above it are recomputed
//!   only as far as they actually drop.
//!
//! Because only the leftmost child of a node is heap-ordered, cutting a node
//! never requires reordering its children, which is what makes decrease O(1)
//! amortized.
//!
//! # Keys
//!
//! Every element is identified by a key (`K: Copy + Eq + Hash`, typically an
//! integer id). Keys are unique: pushing a present key is a no-op. The key
//! index maps keys to arena slots and is the only way to reach a node from
//! outside.
//!
//! # Empty queue
//!
//! [`peek`](RankPairingQueue::peek) and [`pop`](RankPairingQueue::pop) return
//! `None` on an empty queue; neither panics.

use crate::forest::{Forest, NodeKey, QueueStats};
use crate::traits::{KeyedPriorityQueue, QueueError};
use log::debug;
use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;

/// Rank-Pairing Queue
///
/// # Example
///
/// ```rust
/// use rank_pairing_queue::RankPairingQueue;
///
/// let mut queue = RankPairingQueue::new();
/// queue.push(5, 50);
/// queue.push(3, 30);
/// queue.push(8, 80);
/// queue.decrease(&8, 10);
/// assert_eq!(queue.peek(), Some((&8, &10)));
///
/// assert_eq!(queue.pop(), Some((8, 10)));
/// assert_eq!(queue.pop(), Some((3, 30)));
/// assert_eq!(queue.pop(), Some((5, 50)));
/// assert!(queue.is_empty());
/// ```
pub struct RankPairingQueue<K, V> {
    forest: Forest<K, V>,
    index: FxHashMap<K, NodeKey>,
}

impl<K: Copy + Eq + Hash, V: Ord> RankPairingQueue<K, V> {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue with room for `capacity` keys before the node
    /// arena or the key index reallocate
    pub fn with_capacity(capacity: usize) -> Self {
        RankPairingQueue {
            forest: Forest::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns true if the queue holds no keys
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the number of live keys
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if `key` is currently in the queue
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the value stored for `key`
    pub fn get(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.forest.node(id).map(|node| &node.value)
    }

    /// Returns the key and value with the minimum value, or `None` when empty
    ///
    /// **Time Complexity**: O(1)
    pub fn peek(&self) -> Option<(&K, &V)> {
        self.forest.min().map(|node| (&node.key, &node.value))
    }

    /// Inserts `key` with `value`
    ///
    /// Returns `false` and keeps the stored value if `key` is already present.
    ///
    /// **Time Complexity**: O(1) amortized
    pub fn push(&mut self, key: K, value: V) -> bool {
        self.try_push(key, value).is_ok()
    }

    /// Inserts `key` with `value`
    ///
    /// # Errors
    /// Returns [`QueueError::DuplicateKey`] if `key` is already present; the
    /// queue is unchanged.
    pub fn try_push(&mut self, key: K, value: V) -> Result<(), QueueError> {
        if self.index.contains_key(&key) {
            return Err(QueueError::DuplicateKey);
        }
        let id = self.forest.insert(key, value);
        self.index.insert(key, id);
        Ok(())
    }

    /// Removes and returns the minimum key and value, or `None` when empty
    ///
    /// **Time Complexity**: O(log n) amortized
    pub fn pop(&mut self) -> Option<(K, V)> {
        let (key, value) = self.forest.pop_min()?;
        self.index.remove(&key);
        Some((key, value))
    }

    /// Lowers the value stored for `key` to `value`
    ///
    /// Returns `false` and leaves the queue unchanged if `key` is absent or
    /// `value` is not strictly smaller than the stored value.
    ///
    /// **Time Complexity**: O(1) amortized
    pub fn decrease(&mut self, key: &K, value: V) -> bool {
        self.try_decrease(key, value).is_ok()
    }

    /// Lowers the value stored for `key` to `value`
    ///
    /// # Errors
    /// - [`QueueError::KeyNotFound`] if `key` is absent
    /// - [`QueueError::ValueNotDecreased`] if `value` is not strictly less than
    ///   the stored value
    ///
    /// The queue is unchanged in both cases.
    pub fn try_decrease(&mut self, key: &K, value: V) -> Result<(), QueueError> {
        let id = *self.index.get(key).ok_or(QueueError::KeyNotFound)?;
        if self.forest.decrease(id, value) {
            Ok(())
        } else {
            Err(QueueError::ValueNotDecreased)
        }
    }

    /// Removes every key
    ///
    /// The contents end up the same as popping until empty, but the nodes are
    /// dropped directly in O(n). No links or consolidations happen, so
    /// [`stats`](Self::stats) reads the same before and after the call,
    /// where a drain through [`pop`](Self::pop) would raise
    /// `consolidations` by `len()` and `links` by the consolidation work.
    pub fn clear(&mut self) {
        debug!("clearing rank-pairing queue with {} keys", self.len());
        self.forest.clear();
        self.index.clear();
    }

    /// Returns counters of the structural work done so far
    pub fn stats(&self) -> QueueStats {
        self.forest.stats()
    }

    /// Checks the internal structure of the queue in O(n)
    ///
    /// Verifies the heap order and rank rules of every tree, the root list,
    /// the parent back-references, and that the key index and the node arena
    /// agree. Intended for tests and debugging.
    ///
    /// # Errors
    /// Returns a description of the first violated invariant.
    pub fn verify_structure(&self) -> Result<(), String> {
        self.forest.verify()?;
        if self.forest.len() != self.index.len() {
            return Err(format!(
                "index holds {} keys but the forest holds {} nodes",
                self.index.len(),
                self.forest.len()
            ));
        }
        for (key, &id) in &self.index {
            match self.forest.node(id) {
                Some(node) if node.key == *key => {}
                Some(_) => return Err("index entry points at another key".to_string()),
                None => return Err("index entry points at a freed node".to_string()),
            }
        }
        Ok(())
    }
}

impl<K: Copy + Eq + Hash, V: Ord> Default for RankPairingQueue<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash + fmt::Debug, V: Ord + fmt::Debug> fmt::Debug for RankPairingQueue<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankPairingQueue")
            .field("len", &self.len())
            .field("min", &self.peek())
            .finish()
    }
}

impl<K: Copy + Eq + Hash, V: Ord> KeyedPriorityQueue<K, V> for RankPairingQueue<K, V> {
    fn new() -> Self {
        RankPairingQueue::new()
    }

    fn is_empty(&self) -> bool {
        RankPairingQueue::is_empty(self)
    }

    fn len(&self) -> usize {
        RankPairingQueue::len(self)
    }

    fn contains_key(&self, key: &K) -> bool {
        RankPairingQueue::contains_key(self, key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        RankPairingQueue::get(self, key)
    }

    fn peek(&self) -> Option<(&K, &V)> {
        RankPairingQueue::peek(self)
    }

    fn try_push(&mut self, key: K, value: V) -> Result<(), QueueError> {
        RankPairingQueue::try_push(self, key, value)
    }

    fn pop(&mut self) -> Option<(K, V)> {
        RankPairingQueue::pop(self)
    }

    fn try_decrease(&mut self, key: &K, value: V) -> Result<(), QueueError> {
        RankPairingQueue::try_decrease(self, key, value)
    }

    fn clear(&mut self) {
        RankPairingQueue::clear(self)
    }
}
