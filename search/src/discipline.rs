//! Cost assignment disciplines.
//!
//! A discipline decides the priority of every node at construction time. The
//! frontier always removes the lowest cost first, so the discipline alone
//! decides the exploration order:
//!
//! - [`BreadthFirst`]: a construction counter, making the frontier a FIFO queue.
//! - [`DepthFirst`]: the negated counter, making the frontier a LIFO stack.
//! - [`CostFn`]: any pure function of `(parent_cost, action, child_state)`.
//!
//! Counters live inside the discipline value, so independent runs never share
//! ordering state.

/// Assigns a cost to every node as it is built.
pub trait Discipline<S, A> {
    /// Cost of the root node.
    fn root_cost(&mut self, state: &S) -> f64;

    /// Cost of a child reached from a parent of cost `parent_cost` via `action`.
    fn child_cost(&mut self, parent_cost: f64, action: &A, child: &S) -> f64;

    /// Short stable name recorded in search traces.
    fn name(&self) -> &'static str;
}

/// Uninformed breadth-first ordering.
///
/// The root gets cost 1, the next node constructed gets 2, and so on,
/// regardless of where in the tree it sits.
#[derive(Debug, Clone, Default)]
pub struct BreadthFirst {
    created: u64,
}

impl BreadthFirst {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes costed so far.
    #[must_use]
    pub fn created(&self) -> u64 {
        self.created
    }

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> f64 {
        self.created += 1;
        self.created as f64
    }
}

impl<S, A> Discipline<S, A> for BreadthFirst {
    fn root_cost(&mut self, _state: &S) -> f64 {
        self.next()
    }

    fn child_cost(&mut self, _parent_cost: f64, _action: &A, _child: &S) -> f64 {
        self.next()
    }

    fn name(&self) -> &'static str {
        "breadth_first"
    }
}

/// Uninformed depth-first ordering: newest node first.
#[derive(Debug, Clone, Default)]
pub struct DepthFirst {
    created: u64,
}

impl DepthFirst {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn created(&self) -> u64 {
        self.created
    }

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> f64 {
        self.created += 1;
        -(self.created as f64)
    }
}

impl<S, A> Discipline<S, A> for DepthFirst {
    fn root_cost(&mut self, _state: &S) -> f64 {
        self.next()
    }

    fn child_cost(&mut self, _parent_cost: f64, _action: &A, _child: &S) -> f64 {
        self.next()
    }

    fn name(&self) -> &'static str {
        "depth_first"
    }
}

/// General priority search driven by a caller-supplied cost function.
///
/// The function receives the parent's cost, the action taken and the child
/// state. It must be pure and return a finite value for every reachable
/// state; nothing else (admissibility, monotonicity) is assumed.
///
/// ```
/// use statespace_search::discipline::CostFn;
///
/// // Uniform-cost search with unit step costs.
/// let ucs = CostFn::new(|parent: f64, _action: &u8, _child: &u32| parent + 1.0);
/// # let _ = ucs;
/// ```
#[derive(Clone)]
pub struct CostFn<F> {
    cost_of: F,
    root_cost: f64,
}

impl<F> CostFn<F> {
    /// Wrap `cost_of`; the root costs 0.
    pub fn new(cost_of: F) -> Self {
        Self {
            cost_of,
            root_cost: 0.0,
        }
    }

    /// Override the root's cost.
    #[must_use]
    pub fn with_root_cost(mut self, root_cost: f64) -> Self {
        self.root_cost = root_cost;
        self
    }
}

impl<S, A, F> Discipline<S, A> for CostFn<F>
where
    F: Fn(f64, &A, &S) -> f64,
{
    fn root_cost(&mut self, _state: &S) -> f64 {
        self.root_cost
    }

    fn child_cost(&mut self, parent_cost: f64, action: &A, child: &S) -> f64 {
        (self.cost_of)(parent_cost, action, child)
    }

    fn name(&self) -> &'static str {
        "cost_fn"
    }
}

impl<F> std::fmt::Debug for CostFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CostFn")
            .field("root_cost", &self.root_cost)
            .finish_non_exhaustive()
    }
}
