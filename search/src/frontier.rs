//! Priority frontier with state membership tracking.
//!
//! Removal order is `(cost, insertion order)`: lowest cost first, and among
//! equal costs the node inserted earliest. Under the breadth-first discipline
//! this makes the frontier behave exactly like a FIFO queue.
//!
//! Alongside the heap the frontier keeps a count per distinct state, so
//! `contains_state` is a hash lookup. Both structures change together in
//! `insert` and `remove_best`. Heap entries carry only node handles; the
//! count map holds the frontier's single copy of each state and
//! `remove_best` reads the popped node's state back from the arena.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::hash::Hash;

use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use crate::error::SearchError;
use crate::node::{NodeArena, NodeId, SearchNode};

/// The frontier ordering key: `(cost, insertion)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub cost: OrderedFloat<f64>,
    pub insertion: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then(self.insertion.cmp(&other.insertion))
    }
}

/// `BinaryHeap` is a max-heap, so entries hold `Reverse<FrontierKey>`.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Generated-but-unexpanded nodes.
#[derive(Debug)]
pub struct Frontier<S> {
    heap: BinaryHeap<FrontierEntry>,
    states: FxHashMap<S, usize>,
    next_insertion: u64,
    high_water: usize,
}

impl<S: Clone + Eq + Hash> Frontier<S> {
    /// Create an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            states: FxHashMap::default(),
            next_insertion: 0,
            high_water: 0,
        }
    }

    /// Add `node` and record its state. O(log n).
    ///
    /// Duplicate states are accepted; dedup is the caller's policy.
    pub fn insert<A>(&mut self, node: &SearchNode<S, A>) {
        let key = FrontierKey {
            cost: OrderedFloat(node.cost()),
            insertion: self.next_insertion,
        };
        self.next_insertion += 1;
        match self.states.get_mut(node.state()) {
            Some(count) => *count += 1,
            None => {
                self.states.insert(node.state().clone(), 1);
            }
        }
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node: node.id(),
        });
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Remove and return the best node. `arena` must be the arena the
    /// queued nodes were inserted from.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyFrontier`] if nothing is queued.
    pub fn remove_best<A>(&mut self, arena: &NodeArena<S, A>) -> Result<NodeId, SearchError> {
        let entry = self.heap.pop().ok_or(SearchError::EmptyFrontier)?;
        let state = arena.get(entry.node).state();
        if let Some(count) = self.states.get_mut(state) {
            *count -= 1;
            if *count == 0 {
                self.states.remove(state);
            }
        }
        Ok(entry.node)
    }

    /// Whether any queued node holds `state`, independent of cost.
    #[must_use]
    pub fn contains_state(&self, state: &S) -> bool {
        self.states.contains_key(state)
    }

    /// Number of queued nodes (duplicates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of distinct states currently queued.
    #[must_use]
    pub fn distinct_states(&self) -> usize {
        self.states.len()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

impl<S: Clone + Eq + Hash> Default for Frontier<S> {
    fn default() -> Self {
        Self::new()
    }
}
