//! Explored set for graph-mode search.

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// States expanded at least once during the current run.
///
/// Only grows; a fresh set is built for every run.
#[derive(Debug, Clone)]
pub struct ExploredSet<S> {
    states: FxHashSet<S>,
}

impl<S: Clone + Eq + Hash> ExploredSet<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            states: FxHashSet::default(),
        }
    }

    /// Record `state`. Returns `false` if it was already present.
    pub fn insert(&mut self, state: &S) -> bool {
        if self.states.contains(state) {
            return false;
        }
        self.states.insert(state.clone())
    }

    #[must_use]
    pub fn contains(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<S: Clone + Eq + Hash> Default for ExploredSet<S> {
    fn default() -> Self {
        Self::new()
    }
}
