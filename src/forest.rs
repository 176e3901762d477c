//! Arena-backed forest of half-trees
//!
//! This is the structural core of [`RankPairingQueue`](crate::RankPairingQueue).
//! Every node lives in a [`SlotMap`] and refers to other nodes through
//! [`NodeKey`] indices, so no node ever holds a reference to another one.
//!
//! # Layout
//!
//! Each node carries three links:
//!
//! - `left`: leftmost child. The node owns this half-tree.
//! - `next`: for a root, the following root in the circular root list; for
//!   any other node, the next half-tree hanging off the same spine.
//! - `parent`: the node whose `left` or `next` points here. It is a plain
//!   index that carries no ownership.
//!
//! A node's value is never larger than any value in its `left` subtree. Nodes
//! reached through `next` are only ordered against the node whose `left`
//! subtree they belong to.
//!
//! # Operations
//!
//! - **Insert root**: O(1) splice next to the head, head moves if beaten.
//! - **Link**: tournament between two half-trees; the loser becomes the
//!   winner's new leftmost child and the winner's rank becomes `loser + 1`.
//! - **Pop min**: the removed head's left spine and all other roots are fed
//!   through rank buckets, linking equal ranks like a binary counter carry.
//! - **Decrease**: cut the node out of its spine, make it a root, then walk up
//!   from the old parent lowering ranks until one does not drop.

use crate::rank::{self, Rank};
use log::trace;
use slotmap::{new_key_type, SlotMap};
use smallvec::{smallvec, SmallVec};

new_key_type! {
    /// Stable arena index of a forest node.
    pub(crate) struct NodeKey;
}

/// Consolidation buckets, indexed by rank. Ranks stay small, so the common
/// case never leaves the stack.
type Buckets = SmallVec<[Option<NodeKey>; 32]>;

/// A forest node.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    rank: Rank,
    left: Option<NodeKey>,
    next: Option<NodeKey>,
    parent: Option<NodeKey>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Self {
        Node {
            key,
            value,
            rank: 0,
            left: None,
            next: None,
            parent: None,
        }
    }
}

/// Counters of structural work performed by a queue.
///
/// These grow monotonically over the lifetime of a queue (clearing the queue
/// does not reset them) and are meant for checking amortized bounds by
/// operation count instead of wall-clock time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Number of binary links (tournaments) performed.
    pub links: u64,
    /// Number of delete-min consolidations performed.
    pub consolidations: u64,
    /// Number of nodes cut out of a tree by decrease-key.
    pub detaches: u64,
    /// Number of ranks lowered by the decrease-key restoration walk.
    pub rank_updates: u64,
}

pub(crate) struct Forest<K, V> {
    nodes: SlotMap<NodeKey, Node<K, V>>,
    /// Root holding the minimum value, `None` iff the forest is empty
    head: Option<NodeKey>,
    stats: QueueStats,
}

impl<K, V: Ord> Forest<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Forest {
            nodes: SlotMap::with_capacity_and_key(capacity),
            head: None,
            stats: QueueStats::default(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn stats(&self) -> QueueStats {
        self.stats
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeKey) -> Option<&Node<K, V>> {
        self.nodes.get(id)
    }

    /// Minimum node, if any.
    #[inline]
    pub(crate) fn min(&self) -> Option<&Node<K, V>> {
        self.head.and_then(|head| self.nodes.get(head))
    }

    /// Drops every node. Work counters are kept.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
    }

    /// Allocates a leaf and adds it to the root list.
    pub(crate) fn insert(&mut self, key: K, value: V) -> NodeKey {
        let id = self.nodes.insert(Node::leaf(key, value));
        self.insert_root(id);
        id
    }

    /// Splices `id` into the root list right after the head.
    ///
    /// `id` must be detached: no parent, and its `next` link is overwritten.
    fn insert_root(&mut self, id: NodeKey) {
        match self.head {
            None => {
                self.nodes[id].next = Some(id);
                self.head = Some(id);
            }
            Some(head) => {
                let after_head = self.nodes[head].next;
                self.nodes[id].next = after_head;
                self.nodes[head].next = Some(id);
                if self.nodes[id].value < self.nodes[head].value {
                    self.head = Some(id);
                }
            }
        }
    }

    /// Links two half-trees and returns the winner.
    ///
    /// Both inputs must be detached roots with an empty `next` link. On a tie
    /// `a` wins. Linking with `None` returns `a` untouched.
    fn link(&mut self, a: NodeKey, b: Option<NodeKey>) -> NodeKey {
        let Some(b) = b else {
            return a;
        };
        self.stats.links += 1;

        let (winner, loser) = if self.nodes[b].value < self.nodes[a].value {
            (b, a)
        } else {
            (a, b)
        };

        let displaced = self.nodes[winner].left;
        if let Some(displaced) = displaced {
            self.nodes[displaced].parent = Some(loser);
        }

        let loser_node = &mut self.nodes[loser];
        loser_node.parent = Some(winner);
        loser_node.next = displaced;
        let loser_rank = loser_node.rank;

        let winner_node = &mut self.nodes[winner];
        winner_node.left = Some(loser);
        winner_node.rank = rank::checked_increment(loser_rank);
        winner
    }

    /// Drops a half-tree into the buckets, linking with occupants of equal
    /// rank until it lands in an empty slot.
    fn multipass(&mut self, buckets: &mut Buckets, mut id: NodeKey) {
        loop {
            let slot = usize::from(self.nodes[id].rank);
            if slot >= buckets.len() {
                buckets.resize(slot + 1, None);
            }
            match buckets[slot].take() {
                Some(occupant) => id = self.link(id, Some(occupant)),
                None => {
                    buckets[slot] = Some(id);
                    return;
                }
            }
        }
    }

    /// Removes the minimum node and consolidates the remaining half-trees.
    ///
    /// Returns `(key, value)` of the removed node, or `None` if empty.
    pub(crate) fn pop_min(&mut self) -> Option<(K, V)> {
        let head = self.head.take()?;
        let mut buckets: Buckets = smallvec![None; rank::bucket_count(self.nodes.len())];

        // The head's left spine turns into independent half-trees. A spine
        // node's rank may come from the sibling rule, so it is reset to the
        // root rule before it picks a bucket.
        let mut child = self.nodes[head].left;
        while let Some(id) = child {
            let node = &mut self.nodes[id];
            child = node.next.take();
            node.parent = None;
            let left = node.left;
            let left_rank = left.map(|left| self.nodes[left].rank);
            self.nodes[id].rank = rank::root_rank(left_rank);
            self.multipass(&mut buckets, id);
        }

        // Every other root; the ring ends back at the head.
        let mut root = self.nodes[head].next;
        while let Some(id) = root.filter(|&id| id != head) {
            root = self.nodes[id].next.take();
            self.multipass(&mut buckets, id);
        }

        let removed = self.nodes.remove(head)?;
        self.stats.consolidations += 1;

        let bucket_len = buckets.len();
        let mut survivors = 0usize;
        for id in buckets.into_iter().flatten() {
            self.insert_root(id);
            survivors += 1;
        }
        trace!(
            "consolidated {} nodes into {} roots using {} buckets",
            self.nodes.len(),
            survivors,
            bucket_len
        );

        Some((removed.key, removed.value))
    }

    /// Lowers the value stored at `id`.
    ///
    /// Returns `false` and leaves the forest untouched unless `value` is
    /// strictly smaller than the current value.
    pub(crate) fn decrease(&mut self, id: NodeKey, value: V) -> bool {
        let node = &mut self.nodes[id];
        if value >= node.value {
            return false;
        }
        node.value = value;

        let Some(parent) = node.parent else {
            // Already a root: it can only take over the head.
            if let Some(head) = self.head {
                if self.nodes[id].value < self.nodes[head].value {
                    self.head = Some(id);
                }
            }
            return true;
        };

        self.detach(id, parent);
        self.insert_root(id);
        let steps = self.restore_ranks(parent);
        trace!("decrease cut a node, rank walk lowered {} ranks", steps);
        true
    }

    /// Cuts `id` out of the spine below `parent`, leaving it as a detached
    /// root with its own left subtree and a rank derived from it.
    fn detach(&mut self, id: NodeKey, parent: NodeKey) {
        self.stats.detaches += 1;

        let node = &mut self.nodes[id];
        node.parent = None;
        let next = node.next.take();
        let left = node.left;

        if let Some(next) = next {
            self.nodes[next].parent = Some(parent);
        }
        let parent_node = &mut self.nodes[parent];
        if parent_node.left == Some(id) {
            parent_node.left = next;
        } else {
            debug_assert_eq!(parent_node.next, Some(id));
            parent_node.next = next;
        }

        let left_rank = left.map(|left| self.nodes[left].rank);
        self.nodes[id].rank = rank::root_rank(left_rank);
    }

    /// Walks up from `start` recomputing ranks until a rank does not drop.
    /// A root reached by the walk gets `rank(left) + 1`.
    ///
    /// Returns the number of ranks lowered.
    fn restore_ranks(&mut self, start: NodeKey) -> u64 {
        let mut current = start;
        let mut lowered = 0;
        loop {
            let node = &self.nodes[current];
            let left = node.left.map(|left| self.nodes[left].rank);

            let Some(parent) = node.parent else {
                let new_rank = rank::root_rank(left);
                if new_rank != node.rank {
                    self.nodes[current].rank = new_rank;
                    lowered += 1;
                }
                break;
            };

            let sibling = node.next.map(|next| self.nodes[next].rank);
            let new_rank = rank::restored_rank(left, sibling);
            if new_rank >= node.rank {
                break;
            }
            self.nodes[current].rank = new_rank;
            lowered += 1;
            current = parent;
        }
        self.stats.rank_updates += lowered;
        lowered
    }

    /// Checks every structural invariant of the forest in O(n).
    ///
    /// - the root list is a ring through the head and the head is minimal
    /// - roots have no parent and `rank == rank(left) + 1` (0 without left)
    /// - every `left`/`next` target points back through `parent`
    /// - every node is `>=` the node owning the half-tree it sits in
    /// - every arena slot is reachable exactly once
    pub(crate) fn verify(&self) -> Result<(), String> {
        let Some(head) = self.head else {
            return if self.nodes.is_empty() {
                Ok(())
            } else {
                Err(format!("no head but {} nodes", self.nodes.len()))
            };
        };

        let mut reached = 0usize;
        let mut root = head;
        loop {
            let node = self
                .nodes
                .get(root)
                .ok_or_else(|| "root list points at a freed slot".to_string())?;
            if node.parent.is_some() {
                return Err("root has a parent".to_string());
            }
            let left_rank = node.left.map(|left| self.nodes[left].rank);
            if node.rank != rank::root_rank(left_rank) {
                return Err(format!(
                    "root rank {} does not match left rank {:?}",
                    node.rank, left_rank
                ));
            }
            if node.value < self.nodes[head].value {
                return Err("a root is smaller than the head".to_string());
            }
            reached += 1 + self.verify_half_tree(root)?;
            if reached > self.nodes.len() {
                return Err("root list does not close into a ring".to_string());
            }

            root = node
                .next
                .ok_or_else(|| "root list is not circular".to_string())?;
            if root == head {
                break;
            }
        }

        if reached != self.nodes.len() {
            return Err(format!(
                "reached {} nodes but arena holds {}",
                reached,
                self.nodes.len()
            ));
        }
        Ok(())
    }

    /// Verifies the subtree under `root.left`, returning its node count.
    fn verify_half_tree(&self, root: NodeKey) -> Result<usize, String> {
        let mut count = 0usize;
        // (node, its expected parent, the value it must not be below)
        let mut stack: Vec<(NodeKey, NodeKey, &V)> = Vec::new();
        if let Some(left) = self.nodes[root].left {
            stack.push((left, root, &self.nodes[root].value));
        }

        while let Some((id, expected_parent, bound)) = stack.pop() {
            count += 1;
            if count > self.nodes.len() {
                return Err("cycle inside a half-tree".to_string());
            }
            let node = self
                .nodes
                .get(id)
                .ok_or_else(|| "child link points at a freed slot".to_string())?;
            if node.parent != Some(expected_parent) {
                return Err("parent back-reference is inconsistent".to_string());
            }
            if node.value < *bound {
                return Err("heap order violated along a left subtree".to_string());
            }
            if let Some(left) = node.left {
                stack.push((left, id, &node.value));
            }
            if let Some(next) = node.next {
                stack.push((next, id, bound));
            }
        }
        Ok(count)
    }
}

impl<K, V> Forest<K, V> {
    #[cfg(test)]
    fn rank_of(&self, id: NodeKey) -> Rank {
        self.nodes[id].rank
    }

    #[cfg(test)]
    fn root_count(&self) -> usize {
        let Some(head) = self.head else {
            return 0;
        };
        let mut count = 1;
        let mut root = self.nodes[head].next;
        while let Some(id) = root.filter(|&id| id != head) {
            count += 1;
            root = self.nodes[id].next;
        }
        count
    }
}
