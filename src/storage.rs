//! Arena storage for heap nodes
//!
//! Nodes live in a [`SlotMap`] and refer to each other through generational
//! [`NodeKey`] handles instead of pointers. The arena is the only owner of node
//! storage; parent, child and sibling links are plain keys used for navigation.
//!
//! Siblings form circular doubly-linked rings through `left`/`right`. A node
//! that is in no ring with anyone else is its own left and right neighbour.
//! All ring primitives here are O(1) except [`NodeArena::ring`], which walks
//! the whole ring.

use std::ops::{Index, IndexMut};

use slotmap::{new_key_type, SlotMap};

use crate::traits::Entry;

new_key_type! {
    /// Stable handle of a node in a [`NodeArena`]
    pub struct NodeKey;
}

/// A heap node: one entry plus its structural links
pub(crate) struct Node<E: Entry> {
    pub(crate) entry: E,
    /// Effective priority; differs from `entry.priority()` only while the
    /// node carries the delete sentinel
    pub(crate) priority: E::Priority,
    pub(crate) parent: Option<NodeKey>,
    /// Any one child; the rest are reachable through its ring
    pub(crate) child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
    pub(crate) degree: usize,
    pub(crate) marked: bool,
}

/// Slot-map backed node storage with circular ring operations
pub(crate) struct NodeArena<E: Entry> {
    nodes: SlotMap<NodeKey, Node<E>>,
}

impl<E: Entry> NodeArena<E> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub(crate) fn get(&self, key: NodeKey) -> Option<&Node<E>> {
        self.nodes.get(key)
    }

    /// Allocates a parentless, childless node forming a ring of one
    pub(crate) fn insert(&mut self, entry: E, priority: E::Priority) -> NodeKey {
        self.nodes.insert_with_key(|key| Node {
            entry,
            priority,
            parent: None,
            child: None,
            left: key,
            right: key,
            degree: 0,
            marked: false,
        })
    }

    /// Frees a node. The caller must have unlinked it from every ring first.
    pub(crate) fn remove(&mut self, key: NodeKey) -> Option<Node<E>> {
        self.nodes.remove(key)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Removes every node, yielding them in arbitrary order
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = Node<E>> + '_ {
        self.nodes.drain().map(|(_, node)| node)
    }

    /// Iterates every live node in arbitrary order
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node<E>)> {
        self.nodes.iter()
    }

    /// Inserts the singleton `new` into the ring of `at`, just before `at`
    pub(crate) fn splice_before(&mut self, at: NodeKey, new: NodeKey) {
        debug_assert!(self.is_singleton(new), "node is already in a ring");
        let prev = self.nodes[at].left;
        self.nodes[new].left = prev;
        self.nodes[new].right = at;
        self.nodes[prev].right = new;
        self.nodes[at].left = new;
    }

    /// Joins two disjoint rings into one
    pub(crate) fn concat(&mut self, a: NodeKey, b: NodeKey) {
        let a_last = self.nodes[a].left;
        let b_last = self.nodes[b].left;
        self.nodes[a_last].right = b;
        self.nodes[b].left = a_last;
        self.nodes[b_last].right = a;
        self.nodes[a].left = b_last;
    }

    /// Takes a node out of its ring, leaving it as a ring of one
    ///
    /// Returns a node still in the old ring, or `None` if `key` was alone.
    pub(crate) fn unlink(&mut self, key: NodeKey) -> Option<NodeKey> {
        let (left, right) = {
            let node = &self.nodes[key];
            (node.left, node.right)
        };
        if right == key {
            return None;
        }
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        let node = &mut self.nodes[key];
        node.left = key;
        node.right = key;
        Some(right)
    }

    /// Collects every member of the ring containing `start`, beginning at `start`
    pub(crate) fn ring(&self, start: NodeKey) -> Vec<NodeKey> {
        let mut members = vec![start];
        let mut current = self.nodes[start].right;
        while current != start {
            members.push(current);
            current = self.nodes[current].right;
        }
        members
    }

    pub(crate) fn is_singleton(&self, key: NodeKey) -> bool {
        let node = &self.nodes[key];
        node.left == key && node.right == key
    }
}

impl<E: Entry> Index<NodeKey> for NodeArena<E> {
    type Output = Node<E>;

    #[inline]
    fn index(&self, key: NodeKey) -> &Node<E> {
        &self.nodes[key]
    }
}

impl<E: Entry> IndexMut<NodeKey> for NodeArena<E> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut Node<E> {
        &mut self.nodes[key]
    }
}
