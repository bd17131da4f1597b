//! Search tree nodes stored in a flat arena.
//!
//! Nodes reference their parent by [`NodeId`] handle instead of by pointer.
//! The arena only grows during a run, so every handle stays valid until the
//! arena is dropped and path reconstruction is a walk over indices.

use std::fmt;

use ordered_float::OrderedFloat;

use crate::contract::SearchDomain;
use crate::discipline::Discipline;
use crate::error::SearchError;

/// Handle of a node inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Build a handle from a raw arena index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a non-root node was reached.
#[derive(Debug, Clone)]
struct Origin<A> {
    parent: NodeId,
    action: A,
}

/// A state plus its provenance within one search tree.
///
/// The root has neither parent nor action; every other node has both. The
/// cost is fixed at construction and validated finite, so reading it can
/// never observe an unassigned value.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    id: NodeId,
    origin: Option<Origin<A>>,
    state: S,
    depth: u32,
    cost: OrderedFloat<f64>,
}

impl<S, A> SearchNode<S, A> {
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Parent handle (`None` for the root).
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.origin.as_ref().map(|o| o.parent)
    }

    /// Action applied to the parent to reach this node (`None` for the root).
    #[must_use]
    pub fn action(&self) -> Option<&A> {
        self.origin.as_ref().map(|o| &o.action)
    }

    #[must_use]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Tree depth (root = 0).
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Priority assigned by the discipline when the node was built.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost.into_inner()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.origin.is_none()
    }
}

/// One step of a root-to-node path: the action taken and the state it led to.
///
/// The first step of every path is the root, which has no action.
#[derive(Debug, PartialEq, Eq)]
pub struct PathStep<'a, S, A> {
    pub action: Option<&'a A>,
    pub state: &'a S,
}

// Manual impls: derive would demand `S: Clone` and `A: Clone` for a pair of references.
impl<S, A> Clone for PathStep<'_, S, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, A> Copy for PathStep<'_, S, A> {}

/// Flat storage for every node generated during one run.
#[derive(Debug, Clone)]
pub struct NodeArena<S, A> {
    nodes: Vec<SearchNode<S, A>>,
}

impl<S, A> NodeArena<S, A> {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Insert the root node for `state`, costed by `discipline`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UninitializedCost`] or
    /// [`SearchError::NonFiniteCost`] if the discipline misbehaves.
    pub fn root<C>(&mut self, state: S, discipline: &mut C) -> Result<NodeId, SearchError>
    where
        C: Discipline<S, A> + ?Sized,
    {
        let id = NodeId(self.nodes.len());
        let cost = checked_cost(id, discipline.root_cost(&state))?;
        self.nodes.push(SearchNode {
            id,
            origin: None,
            state,
            depth: 0,
            cost,
        });
        Ok(id)
    }

    /// Expand `parent`: one child per action from `valid_actions`, in order.
    ///
    /// Children are appended to the arena and their handles returned in the
    /// same order, which is the tie-break order for equal-cost children.
    ///
    /// # Errors
    ///
    /// Returns a cost error if the discipline produces NaN or infinity for any
    /// child; children built before the failing one stay in the arena.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this arena.
    pub fn expand<D, C>(
        &mut self,
        parent: NodeId,
        domain: &D,
        discipline: &mut C,
    ) -> Result<Vec<NodeId>, SearchError>
    where
        D: SearchDomain<State = S, Action = A> + ?Sized,
        C: Discipline<S, A> + ?Sized,
    {
        let (actions, parent_cost, child_depth) = {
            let node = &self.nodes[parent.0];
            (
                domain.valid_actions(&node.state),
                node.cost(),
                node.depth + 1,
            )
        };

        let mut children = Vec::with_capacity(actions.len());
        for action in actions {
            let state = domain.apply(&self.nodes[parent.0].state, &action);
            let id = NodeId(self.nodes.len());
            let cost = checked_cost(id, discipline.child_cost(parent_cost, &action, &state))?;
            self.nodes.push(SearchNode {
                id,
                origin: Some(Origin { parent, action }),
                state,
                depth: child_depth,
                cost,
            });
            children.push(id);
        }
        Ok(children)
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this arena.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S, A> {
        &self.nodes[id.0]
    }

    /// Look up a node without panicking.
    #[must_use]
    pub fn try_get(&self, id: NodeId) -> Option<&SearchNode<S, A>> {
        self.nodes.get(id.0)
    }

    /// Number of nodes ever generated into this arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &SearchNode<S, A>> {
        self.nodes.iter()
    }

    /// Handles from the root down to `id`, inclusive.
    #[must_use]
    pub fn path_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            path.push(node_id);
            current = self.nodes[node_id.0].parent();
        }
        path.reverse();
        path
    }

    /// The `(action, state)` pairs from the root down to `id`.
    ///
    /// The first entry is `(None, initial_state)`. This is a read-only walk.
    #[must_use]
    pub fn path_from_root(&self, id: NodeId) -> Vec<PathStep<'_, S, A>> {
        self.path_ids(id)
            .into_iter()
            .map(|node_id| {
                let node = &self.nodes[node_id.0];
                PathStep {
                    action: node.action(),
                    state: &node.state,
                }
            })
            .collect()
    }
}

impl<S, A> Default for NodeArena<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Reject costs that were never established (NaN) or cannot be ordered
/// meaningfully (infinite).
fn checked_cost(id: NodeId, cost: f64) -> Result<OrderedFloat<f64>, SearchError> {
    if cost.is_nan() {
        return Err(SearchError::UninitializedCost { node_id: id });
    }
    if cost.is_infinite() {
        return Err(SearchError::NonFiniteCost { node_id: id, cost });
    }
    Ok(OrderedFloat(cost))
}
