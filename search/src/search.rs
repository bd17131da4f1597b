//! Search engine state machine and expansion loop.
//!
//! ```text
//! Ready ──run/step──▶ Running ──▶ Solved      (goal popped)
//!                             ├──▶ Exhausted   (frontier empty, nothing pruned)
//!                             ├──▶ Aborted     (node or depth bound reached)
//!                             └──▶ Failed      (internal invariant error)
//! ```
//!
//! One iteration: pop the best node, goal-test it, check bounds, expand it,
//! and queue the children subject to the mode's dedup rule. The goal test
//! happens at pop time so that under a priority discipline the cheapest
//! goal-reaching node is the one reported.

use crate::contract::{GoalTest, SearchDomain};
use crate::discipline::Discipline;
use crate::error::SearchError;
use crate::explored::ExploredSet;
use crate::frontier::Frontier;
use crate::node::{NodeArena, NodeId, PathStep, SearchNode};
use crate::policy::{Bound, DepthCutoff, SearchMode, SearchPolicy};
use crate::trace::{ChildOutcome, ChildRecord, ExpandEvent, SearchTrace, TraceMetadata};

/// Lifecycle of one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Ready,
    Running,
    Solved,
    Exhausted,
    Aborted,
    /// An invariant error ended the run; there is no outcome.
    Failed,
}

impl EngineState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Solved | Self::Exhausted | Self::Aborted | Self::Failed
        )
    }
}

/// Which resource bound ended a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Expanding one more node would exceed `max_nodes`.
    NodeLimit { max_nodes: u64 },
    /// A node deeper than `max_depth` reached expansion.
    DepthLimit { max_depth: u64 },
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A goal node was popped.
    Solved { node: NodeId },
    /// The frontier emptied with no goal and nothing cut off by a bound.
    Exhausted,
    /// A bound stopped the run before the space was exhausted.
    Aborted(AbortReason),
}

impl Outcome {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }

    #[must_use]
    pub fn engine_state(&self) -> EngineState {
        match self {
            Self::Solved { .. } => EngineState::Solved,
            Self::Exhausted => EngineState::Exhausted,
            Self::Aborted(_) => EngineState::Aborted,
        }
    }
}

/// A single search run over `domain`, ordered by discipline `C`.
///
/// The engine owns its arena, frontier, explored set, counters and
/// discipline; nothing is shared between engines.
pub struct SearchEngine<'d, D: SearchDomain, C> {
    domain: &'d D,
    discipline: C,
    goal: GoalTest<D::State>,
    mode: SearchMode,
    node_bound: Bound,
    depth_bound: Bound,
    depth_cutoff: DepthCutoff,

    arena: NodeArena<D::State, D::Action>,
    frontier: Frontier<D::State>,
    explored: ExploredSet<D::State>,
    state: EngineState,
    outcome: Option<Outcome>,

    expanded: u64,
    generated: u64,
    duplicates_suppressed: u64,
    depth_pruned: u64,
    trace: Option<SearchTrace>,
}

impl<'d, D, C> SearchEngine<'d, D, C>
where
    D: SearchDomain,
    C: Discipline<D::State, D::Action>,
{
    /// Build a `Ready` engine with the root for `initial` already queued.
    ///
    /// The root counts as the first generated node.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for out-of-range bounds, or a
    /// cost error if the discipline cannot cost the root.
    pub fn new(
        domain: &'d D,
        initial: D::State,
        goal: GoalTest<D::State>,
        mut discipline: C,
        policy: &SearchPolicy,
    ) -> Result<Self, SearchError> {
        policy.validate()?;
        let node_bound = policy.node_bound()?;
        let depth_bound = policy.depth_bound()?;

        let mut arena = NodeArena::new();
        let root = arena.root(initial, &mut discipline)?;
        let mut frontier = Frontier::new();
        frontier.insert(arena.get(root));

        let trace = policy.record_trace.then(|| SearchTrace {
            expansions: Vec::new(),
            metadata: TraceMetadata {
                discipline: discipline.name(),
                mode: policy.mode,
                max_nodes: node_bound.as_sentinel(),
                max_depth: depth_bound.as_sentinel(),
                depth_cutoff: policy.depth_cutoff,
                total_expanded: 0,
                total_generated: 1,
                total_duplicates_suppressed: 0,
                total_depth_pruned: 0,
                frontier_high_water: 1,
                outcome: None,
            },
        });

        Ok(Self {
            domain,
            discipline,
            goal,
            mode: policy.mode,
            node_bound,
            depth_bound,
            depth_cutoff: policy.depth_cutoff,
            arena,
            frontier,
            explored: ExploredSet::new(),
            state: EngineState::Ready,
            outcome: None,
            expanded: 0,
            generated: 1,
            duplicates_suppressed: 0,
            depth_pruned: 0,
            trace,
        })
    }

    /// Run to a terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NotRunnable`] if the engine already finished,
    /// or an internal invariant error (empty-frontier access, bad cost),
    /// which ends the run on the spot.
    pub fn run(&mut self) -> Result<Outcome, SearchError> {
        loop {
            if let Some(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }

    /// Perform one iteration of the search loop.
    ///
    /// Returns `Some(outcome)` when the iteration reached a terminal state.
    ///
    /// # Errors
    ///
    /// As [`SearchEngine::run`]. After an invariant error the engine is
    /// [`EngineState::Failed`] and every later call returns
    /// [`SearchError::NotRunnable`].
    pub fn step(&mut self) -> Result<Option<Outcome>, SearchError> {
        match self.state {
            EngineState::Ready => self.state = EngineState::Running,
            EngineState::Running => {}
            terminal => return Err(SearchError::NotRunnable { state: terminal }),
        }

        self.advance().inspect_err(|err| {
            self.state = EngineState::Failed;
            tracing::error!(
                %err,
                expanded = self.expanded,
                generated = self.generated,
                "search failed"
            );
        })
    }

    fn advance(&mut self) -> Result<Option<Outcome>, SearchError> {
        if self.frontier.is_empty() {
            let outcome = match self.depth_bound.limit() {
                Some(max_depth) if self.depth_pruned > 0 => {
                    Outcome::Aborted(AbortReason::DepthLimit { max_depth })
                }
                _ => Outcome::Exhausted,
            };
            return Ok(Some(self.finish(outcome)));
        }

        let current = self.frontier.remove_best(&self.arena)?;
        let node = self.arena.get(current);
        let depth = node.depth();

        if self.goal.is_satisfied(self.domain, node.state()) {
            return Ok(Some(self.finish(Outcome::Solved { node: current })));
        }

        if let Some(max_nodes) = self.node_bound.limit() {
            if self.expanded >= max_nodes {
                let outcome = Outcome::Aborted(AbortReason::NodeLimit { max_nodes });
                return Ok(Some(self.finish(outcome)));
            }
        }

        if self.depth_bound.is_exceeded_by(u64::from(depth)) {
            let max_depth = self.depth_bound.limit().unwrap_or_default();
            match self.depth_cutoff {
                DepthCutoff::Abort => {
                    let outcome = Outcome::Aborted(AbortReason::DepthLimit { max_depth });
                    return Ok(Some(self.finish(outcome)));
                }
                DepthCutoff::Prune => {
                    self.depth_pruned += 1;
                    tracing::trace!(node = %current, depth, max_depth, "pruned node beyond depth bound");
                    return Ok(None);
                }
            }
        }

        self.expand(current)?;
        Ok(None)
    }

    /// Expand `current` and queue its children.
    fn expand(&mut self, current: NodeId) -> Result<(), SearchError> {
        let children = self
            .arena
            .expand(current, self.domain, &mut self.discipline)?;

        self.expanded += 1;
        if self.mode == SearchMode::Graph {
            self.explored.insert(self.arena.get(current).state());
        }

        let mut records = Vec::with_capacity(children.len());
        for child in children {
            self.generated += 1;
            let state = self.arena.get(child).state();

            let outcome = match self.mode {
                SearchMode::Graph if self.explored.contains(state) => ChildOutcome::AlreadyExplored,
                SearchMode::Graph if self.frontier.contains_state(state) => {
                    ChildOutcome::AlreadyInFrontier
                }
                _ => ChildOutcome::Inserted,
            };

            if outcome == ChildOutcome::Inserted {
                self.frontier.insert(self.arena.get(child));
            } else {
                self.duplicates_suppressed += 1;
            }
            records.push(ChildRecord {
                node_id: child,
                outcome,
            });
        }

        let node = self.arena.get(current);
        tracing::debug!(
            node = %current,
            depth = node.depth(),
            cost = node.cost(),
            children = records.len(),
            frontier = self.frontier.len(),
            "expanded node"
        );

        if let Some(trace) = self.trace.as_mut() {
            trace.expansions.push(ExpandEvent {
                expansion_order: self.expanded - 1,
                node_id: current,
                parent_id: node.parent(),
                depth: node.depth(),
                cost: node.cost(),
                children: records,
            });
        }
        Ok(())
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        self.state = outcome.engine_state();
        self.outcome = Some(outcome);

        match outcome {
            Outcome::Solved { node } => tracing::info!(
                node = %node,
                depth = self.arena.get(node).depth(),
                expanded = self.expanded,
                generated = self.generated,
                "search solved"
            ),
            Outcome::Exhausted => tracing::info!(
                expanded = self.expanded,
                generated = self.generated,
                "search exhausted without reaching a goal"
            ),
            Outcome::Aborted(reason) => tracing::info!(
                ?reason,
                expanded = self.expanded,
                generated = self.generated,
                "search aborted by resource bound"
            ),
        }

        let high_water = u64::try_from(self.frontier_high_water()).unwrap_or(u64::MAX);
        if let Some(trace) = self.trace.as_mut() {
            let m = &mut trace.metadata;
            m.total_expanded = self.expanded;
            m.total_generated = self.generated;
            m.total_duplicates_suppressed = self.duplicates_suppressed;
            m.total_depth_pruned = self.depth_pruned;
            m.frontier_high_water = high_water;
            m.outcome = Some(outcome);
        }
        outcome
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Terminal outcome, once reached.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The winning node (only after `Solved`).
    #[must_use]
    pub fn solution_node(&self) -> Option<&SearchNode<D::State, D::Action>> {
        match self.outcome {
            Some(Outcome::Solved { node }) => Some(self.arena.get(node)),
            _ => None,
        }
    }

    /// `(action, state)` pairs from the initial state to the goal.
    ///
    /// `None` unless the run ended `Solved`. The first pair is the root's
    /// `(None, initial_state)`.
    #[must_use]
    pub fn solution_path(&self) -> Option<Vec<PathStep<'_, D::State, D::Action>>> {
        self.solution_node()
            .map(|node| self.arena.path_from_root(node.id()))
    }

    /// Number of actions on the solution path.
    #[must_use]
    pub fn solution_depth(&self) -> Option<u32> {
        self.solution_node().map(SearchNode::depth)
    }

    #[must_use]
    pub fn solution_cost(&self) -> Option<f64> {
        self.solution_node().map(SearchNode::cost)
    }

    #[must_use]
    pub fn expanded_node_count(&self) -> u64 {
        self.expanded
    }

    /// Generated nodes, root included.
    #[must_use]
    pub fn generated_node_count(&self) -> u64 {
        self.generated
    }

    /// Graph-mode children discarded as duplicates.
    #[must_use]
    pub fn duplicates_suppressed(&self) -> u64 {
        self.duplicates_suppressed
    }

    /// Nodes discarded by the `Prune` depth cutoff.
    #[must_use]
    pub fn depth_pruned(&self) -> u64 {
        self.depth_pruned
    }

    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    #[must_use]
    pub fn frontier_high_water(&self) -> usize {
        self.frontier.high_water()
    }

    #[must_use]
    pub fn explored_len(&self) -> usize {
        self.explored.len()
    }

    /// Nodes held in the arena, skipped duplicates included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// The search tree built so far.
    #[must_use]
    pub fn arena(&self) -> &NodeArena<D::State, D::Action> {
        &self.arena
    }

    #[must_use]
    pub fn discipline(&self) -> &C {
        &self.discipline
    }

    #[must_use]
    pub fn trace(&self) -> Option<&SearchTrace> {
        self.trace.as_ref()
    }

    /// Take the trace, leaving none behind.
    pub fn take_trace(&mut self) -> Option<SearchTrace> {
        self.trace.take()
    }
}
