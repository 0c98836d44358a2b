//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) insert (worst case) and union (per moved entry)
//! - O(1) amortized priority improvement (decrease-key on a min-heap)
//! - O(log n) amortized pop, priority worsening and delete
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list. The heap maintains a handle to the best root
//! and an index from entry key to node so that any entry can be found in O(1).
//!
//! Nodes are stored in a slot-map arena and linked by generational handles
//! rather than raw pointers, so cuts and splices stay O(1) without `unsafe`.

use std::fmt;
use std::mem;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::error::HeapError;
use crate::order::{Orientation, Precedes};
use crate::storage::{NodeArena, NodeKey};
use crate::traits::{Entry, KeyedHeap, Priority};

/// Fibonacci Heap keyed by [`Entry::key`]
///
/// # Example
///
/// ```rust
/// use keyed_heaps::{FibonacciHeap, KeyedHeap, Orientation};
///
/// let mut heap = FibonacciHeap::new(Orientation::MaxOrder);
/// for (key, priority) in [(1, 7), (2, 3), (3, 9)] {
///     heap.insert((key, priority)).unwrap();
/// }
/// heap.delete(&3).unwrap();
/// assert_eq!(heap.pop().unwrap(), (1, 7));
/// assert_eq!(heap.pop().unwrap(), (2, 3));
/// assert!(heap.pop().is_err());
/// ```
pub struct FibonacciHeap<E: Entry> {
    nodes: NodeArena<E>,
    index: FxHashMap<E::Key, NodeKey>,
    /// Best root; `None` iff the heap is empty
    extremum: Option<NodeKey>,
    orientation: Orientation,
    precedes: Precedes<E::Priority>,
}

impl<E: Entry> KeyedHeap<E> for FibonacciHeap<E> {
    fn new(orientation: Orientation) -> Self {
        Self::with_capacity(orientation, 0)
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn insert(&mut self, entry: E) -> Result<(), HeapError> {
        let priority = entry.priority();
        if !priority.is_admissible() {
            return Err(HeapError::InvalidPriority);
        }
        let key = entry.key();
        if self.index.contains_key(&key) {
            return Err(HeapError::DuplicateKey);
        }
        self.insert_unchecked(key, entry, priority);
        Ok(())
    }

    fn peek(&self) -> Result<&E, HeapError> {
        self.extremum
            .map(|top| &self.nodes[top].entry)
            .ok_or(HeapError::Empty)
    }

    fn pop(&mut self) -> Result<E, HeapError> {
        let top = self.extremum.ok_or(HeapError::Empty)?;

        // Children become roots; `top` is a root, so its ring is the root list
        self.promote_children(top, top);

        let rest = self.nodes.unlink(top);
        let Some(node) = self.nodes.remove(top) else {
            unreachable!("extremum refers to a freed node");
        };
        self.index.remove(&node.entry.key());

        match rest {
            Some(start) => self.consolidate(start),
            None => self.extremum = None,
        }
        Ok(node.entry)
    }

    fn update_priority(&mut self, entry: E) -> Result<E, HeapError> {
        let priority = entry.priority();
        if !priority.is_admissible() {
            return Err(HeapError::InvalidPriority);
        }
        let node = *self
            .index
            .get(&entry.key())
            .ok_or(HeapError::UnknownKey)?;

        let old_priority = self.nodes[node].priority;
        self.nodes[node].priority = priority;
        let old = mem::replace(&mut self.nodes[node].entry, entry);

        if (self.precedes)(priority, old_priority) {
            self.improve(node);
        } else if (self.precedes)(old_priority, priority) {
            self.worsen(node);
        }
        Ok(old)
    }

    fn delete(&mut self, key: &E::Key) -> Result<E, HeapError> {
        let node = *self.index.get(key).ok_or(HeapError::UnknownKey)?;
        debug!("deleting {:?}", key);

        // The sentinel outranks every admissible priority, so improving the
        // node always makes it the extremum.
        self.nodes[node].priority = self.orientation.top_sentinel();
        self.improve(node);
        debug_assert_eq!(self.extremum, Some(node));

        self.pop()
    }

    fn union(&mut self, other: &mut Self) -> Result<(), HeapError> {
        if other.index.keys().any(|key| self.index.contains_key(key)) {
            return Err(HeapError::DuplicateKey);
        }
        debug!(
            "union: moving {} entries into heap of {}",
            other.len(),
            self.len()
        );

        self.index.reserve(other.len());
        other.index.clear();
        other.extremum = None;
        for node in other.nodes.drain() {
            let key = node.entry.key();
            self.insert_unchecked(key, node.entry, node.priority);
        }
        Ok(())
    }
}

impl<E: Entry> FibonacciHeap<E> {
    /// Creates an empty heap with room for `capacity` entries
    pub fn with_capacity(orientation: Orientation, capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            extremum: None,
            orientation,
            precedes: orientation.precedes(),
        }
    }

    /// Creates an empty heap that pops the smallest priority first
    pub fn min_order() -> Self {
        Self::new(Orientation::MinOrder)
    }

    /// Creates an empty heap that pops the largest priority first
    pub fn max_order() -> Self {
        Self::new(Orientation::MaxOrder)
    }

    /// Builds a heap from an iterator of entries
    ///
    /// Fails on the first inadmissible priority or duplicate key.
    pub fn try_from_iter<I>(orientation: Orientation, entries: I) -> Result<Self, HeapError>
    where
        I: IntoIterator<Item = E>,
    {
        let entries = entries.into_iter();
        let mut heap = Self::with_capacity(orientation, entries.size_hint().0);
        for entry in entries {
            heap.insert(entry)?;
        }
        Ok(heap)
    }

    /// Returns true if an entry with this key is present
    pub fn contains_key(&self, key: &E::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the entry with this key, if present
    pub fn get(&self, key: &E::Key) -> Option<&E> {
        self.index.get(key).map(|&node| &self.nodes[node].entry)
    }

    /// Returns the priority of the entry with this key, if present
    pub fn priority_of(&self, key: &E::Key) -> Option<E::Priority> {
        self.index.get(key).map(|&node| self.nodes[node].priority)
    }

    /// Returns the priority of the entry that would be popped next
    pub fn peek_priority(&self) -> Result<E::Priority, HeapError> {
        self.extremum
            .map(|top| self.nodes[top].priority)
            .ok_or(HeapError::Empty)
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.extremum = None;
    }

    /// Pops entries in extraction order until the heap is empty
    ///
    /// Entries not consumed when the iterator is dropped stay in the heap.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, E> {
        DrainSorted { heap: self }
    }

    /// Consumes the heap, returning its entries in extraction order
    pub fn into_sorted_vec(mut self) -> Vec<E> {
        let mut sorted = Vec::with_capacity(self.len());
        sorted.extend(self.drain_sorted());
        sorted
    }

    /// Allocates a node for an already validated entry and adds it to the root list
    fn insert_unchecked(&mut self, key: E::Key, entry: E, priority: E::Priority) {
        let node = self.nodes.insert(entry, priority);
        self.index.insert(key, node);
        self.add_root(node);
        if let Some(top) = self.extremum {
            if (self.precedes)(priority, self.nodes[top].priority) {
                self.extremum = Some(node);
            }
        }
    }

    /// Splices a parentless singleton into the root list
    fn add_root(&mut self, node: NodeKey) {
        match self.extremum {
            Some(top) => self.nodes.splice_before(top, node),
            None => self.extremum = Some(node),
        }
    }

    /// Moves all children of `node` into the ring of `anchor`, which must be a root
    fn promote_children(&mut self, node: NodeKey, anchor: NodeKey) {
        let Some(child) = self.nodes[node].child.take() else {
            return;
        };
        for member in self.nodes.ring(child) {
            let member = &mut self.nodes[member];
            member.parent = None;
            member.marked = false;
        }
        self.nodes.concat(anchor, child);
        self.nodes[node].degree = 0;
    }

    /// Links roots until no two share a degree, then picks the new extremum
    ///
    /// `start` may be any root.
    fn consolidate(&mut self, start: NodeKey) {
        // Captured up front: linking rewires the root ring during the walk
        let roots = self.nodes.ring(start);
        let root_count = roots.len();
        let mut table: Vec<Option<NodeKey>> = Vec::new();

        for root in roots {
            let mut x = root;
            loop {
                let degree = self.nodes[x].degree;
                if table.len() <= degree {
                    table.resize(degree + 1, None);
                }
                match table[degree].take() {
                    None => {
                        table[degree] = Some(x);
                        break;
                    }
                    Some(mut y) => {
                        if (self.precedes)(self.nodes[y].priority, self.nodes[x].priority) {
                            mem::swap(&mut x, &mut y);
                        }
                        self.link(y, x);
                    }
                }
            }
        }

        let survivors: Vec<NodeKey> = table.into_iter().flatten().collect();
        trace!("consolidated {} roots into {}", root_count, survivors.len());

        let precedes = self.precedes;
        let nodes = &self.nodes;
        self.extremum = survivors.into_iter().reduce(|best, root| {
            if precedes(nodes[root].priority, nodes[best].priority) {
                root
            } else {
                best
            }
        });
    }

    /// Makes root `child` a child of root `parent`
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        self.nodes.unlink(child);
        {
            let node = &mut self.nodes[child];
            node.parent = Some(parent);
            node.marked = false;
        }
        match self.nodes[parent].child {
            Some(first) => self.nodes.splice_before(first, child),
            None => self.nodes[parent].child = Some(child),
        }
        self.nodes[parent].degree += 1;
    }

    /// Detaches a non-root node from its parent and makes it an unmarked root
    fn cut(&mut self, node: NodeKey) {
        let Some(parent) = self.nodes[node].parent else {
            return;
        };
        trace!("cut {:?} from {:?}", node, parent);

        let sibling = self.nodes.unlink(node);
        let parent_node = &mut self.nodes[parent];
        if parent_node.child == Some(node) {
            parent_node.child = sibling;
        }
        parent_node.degree -= 1;

        let cut = &mut self.nodes[node];
        cut.parent = None;
        cut.marked = false;
        self.add_root(node);
    }

    /// Walks up from `node`, cutting marked ancestors until an unmarked one is marked
    fn cascading_cut(&mut self, mut node: NodeKey) {
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                return;
            }
            trace!("cascading cut at {:?}", node);
            self.cut(node);
            node = parent;
        }
    }

    /// Repairs the heap after `node`'s priority moved toward the top
    fn improve(&mut self, node: NodeKey) {
        if let Some(parent) = self.nodes[node].parent {
            if !(self.precedes)(self.nodes[node].priority, self.nodes[parent].priority) {
                return;
            }
            self.cut(node);
            self.cascading_cut(parent);
        }

        if let Some(top) = self.extremum {
            if (self.precedes)(self.nodes[node].priority, self.nodes[top].priority) {
                self.extremum = Some(node);
            }
        }
    }

    /// Repairs the heap after `node`'s priority moved away from the top
    ///
    /// The node's children may now outrank it, so they all become roots and
    /// the node itself is cut to the root list.
    fn worsen(&mut self, node: NodeKey) {
        let Some(top) = self.extremum else {
            return;
        };
        self.promote_children(node, top);
        if let Some(parent) = self.nodes[node].parent {
            self.cut(node);
            self.cascading_cut(parent);
        }

        // Only the old extremum can have lost its rank
        if top == node {
            self.consolidate(node);
        }
    }

    /// Checks every structural invariant, describing the first violation found
    ///
    /// Intended for tests; runs in O(n).
    #[doc(hidden)]
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.index.len() != self.nodes.len() {
            return Err(format!(
                "index has {} keys but arena has {} nodes",
                self.index.len(),
                self.nodes.len()
            ));
        }
        for (key, &node) in &self.index {
            match self.nodes.get(node) {
                None => return Err(format!("index entry {key:?} refers to a freed node")),
                Some(n) if n.entry.key() != *key => {
                    return Err(format!("index entry {key:?} refers to {:?}", n.entry.key()))
                }
                Some(n) if !n.priority.is_admissible() => {
                    return Err(format!("entry {key:?} carries a sentinel priority"))
                }
                Some(_) => {}
            }
        }

        let Some(top) = self.extremum else {
            return if self.nodes.len() == 0 {
                Ok(())
            } else {
                Err(format!("no extremum but {} nodes", self.nodes.len()))
            };
        };
        if !self.nodes.contains(top) {
            return Err("extremum refers to a freed node".to_string());
        }

        let mut reachable = 0;
        let mut pending = Vec::new();
        for root in self.nodes.ring(top) {
            let n = &self.nodes[root];
            if n.parent.is_some() {
                return Err(format!("root {root:?} has a parent"));
            }
            if n.marked {
                return Err(format!("root {root:?} is marked"));
            }
            if (self.precedes)(n.priority, self.nodes[top].priority) {
                return Err(format!("root {root:?} outranks the extremum"));
            }
            pending.push(root);
        }

        while let Some(node) = pending.pop() {
            reachable += 1;
            self.check_ring(node)?;
            let n = &self.nodes[node];
            let Some(child) = n.child else {
                if n.degree != 0 {
                    return Err(format!("{node:?} has degree {} but no children", n.degree));
                }
                continue;
            };
            let children = self.nodes.ring(child);
            if children.len() != n.degree {
                return Err(format!(
                    "{node:?} has degree {} but {} children",
                    n.degree,
                    children.len()
                ));
            }
            for c in children {
                let cn = &self.nodes[c];
                if cn.parent != Some(node) {
                    return Err(format!("{c:?} is in the child ring of {node:?} but not its child"));
                }
                if (self.precedes)(cn.priority, n.priority) {
                    return Err(format!("{c:?} outranks its parent {node:?}"));
                }
                pending.push(c);
            }
        }

        if reachable != self.nodes.len() {
            return Err(format!(
                "{} nodes reachable from the root list, {} allocated",
                reachable,
                self.nodes.len()
            ));
        }
        Ok(())
    }

    fn check_ring(&self, node: NodeKey) -> Result<(), String> {
        let n = &self.nodes[node];
        if self.nodes[n.right].left != node || self.nodes[n.left].right != node {
            return Err(format!("ring links around {node:?} are inconsistent"));
        }
        Ok(())
    }

    /// Number of trees in the root list
    #[doc(hidden)]
    pub fn root_count(&self) -> usize {
        self.extremum.map_or(0, |top| self.nodes.ring(top).len())
    }

    /// Number of marked nodes
    #[doc(hidden)]
    pub fn marked_count(&self) -> usize {
        self.nodes.iter().filter(|(_, node)| node.marked).count()
    }
}

impl<E: Entry> Default for FibonacciHeap<E> {
    fn default() -> Self {
        Self::new(Orientation::default())
    }
}

impl<E: Entry + fmt::Debug> fmt::Debug for FibonacciHeap<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("orientation", &self.orientation)
            .field("len", &self.len())
            .field("top", &self.peek().ok())
            .finish()
    }
}

/// Iterator returned by [`FibonacciHeap::drain_sorted`]
pub struct DrainSorted<'a, E: Entry> {
    heap: &'a mut FibonacciHeap<E>,
}

impl<E: Entry> Iterator for DrainSorted<'_, E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        self.heap.pop().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<E: Entry> ExactSizeIterator for DrainSorted<'_, E> {}
