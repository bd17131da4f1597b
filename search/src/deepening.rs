//! Iterative deepening driver.
//!
//! Repeats a depth-first, prune-cutoff search with depth limits 0, 1, 2, ...
//! Each iteration is an independent [`SearchEngine`] with its own arena and
//! counters. The driver stops at the first iteration that is `Solved`, that
//! is `Exhausted` (the whole space fit under the cutoff), or that hits the
//! node budget, and also once the policy's `max_depth` has been tried.
//!
//! With an unbounded `max_depth` and an infinite space without a goal, the
//! driver does not terminate; bound `max_depth` or `max_nodes` in that case.

use crate::contract::{GoalTest, SearchDomain};
use crate::discipline::DepthFirst;
use crate::error::SearchError;
use crate::policy::{DepthCutoff, SearchPolicy};
use crate::search::{AbortReason, Outcome, SearchEngine};

/// Statistics for one depth-limited iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepeningIteration {
    pub depth_limit: u64,
    pub expanded: u64,
    pub generated: u64,
    pub depth_pruned: u64,
    pub outcome: Outcome,
}

/// Result of [`iterative_deepening`].
#[derive(Debug, Clone)]
pub struct DeepeningRun<S, A> {
    /// Outcome of the final iteration. A `Solved` node handle refers to that
    /// iteration's arena, which is gone; use `solution` instead.
    pub outcome: Outcome,
    pub iterations: Vec<DeepeningIteration>,
    /// Owned `(action, state)` path, root first, when solved.
    pub solution: Option<Vec<(Option<A>, S)>>,
}

impl<S, A> DeepeningRun<S, A> {
    /// Expansions summed over every iteration.
    #[must_use]
    pub fn total_expanded(&self) -> u64 {
        self.iterations.iter().map(|i| i.expanded).sum()
    }

    /// Number of actions on the solution path.
    #[must_use]
    pub fn solution_depth(&self) -> Option<usize> {
        self.solution.as_ref().map(|path| path.len().saturating_sub(1))
    }
}

/// Run iterative deepening from `initial`.
///
/// `policy.mode` and `policy.max_nodes` apply to every iteration;
/// `policy.max_depth` is the deepest cutoff tried. `depth_cutoff` and
/// `record_trace` are ignored. Tree mode is the usual choice: graph mode
/// suppresses states first reached by a long path, which can hide a
/// shallower route within the same iteration.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] for bad bounds, or the first
/// internal error raised by any iteration.
pub fn iterative_deepening<D>(
    domain: &D,
    initial: &D::State,
    goal: &GoalTest<D::State>,
    policy: &SearchPolicy,
) -> Result<DeepeningRun<D::State, D::Action>, SearchError>
where
    D: SearchDomain,
    D::Action: Clone,
{
    policy.validate()?;
    let overall = policy.depth_bound()?;

    let mut iterations = Vec::new();
    let mut depth_limit: u64 = 0;
    loop {
        let iteration_policy = SearchPolicy {
            max_depth: i64::try_from(depth_limit).unwrap_or(i64::MAX),
            depth_cutoff: DepthCutoff::Prune,
            record_trace: false,
            ..policy.clone()
        };
        let mut engine = SearchEngine::new(
            domain,
            initial.clone(),
            goal.clone(),
            DepthFirst::new(),
            &iteration_policy,
        )?;
        let outcome = engine.run()?;

        iterations.push(DeepeningIteration {
            depth_limit,
            expanded: engine.expanded_node_count(),
            generated: engine.generated_node_count(),
            depth_pruned: engine.depth_pruned(),
            outcome,
        });
        tracing::debug!(
            depth_limit,
            expanded = engine.expanded_node_count(),
            ?outcome,
            "deepening iteration finished"
        );

        let finished = match outcome {
            Outcome::Solved { .. }
            | Outcome::Exhausted
            | Outcome::Aborted(AbortReason::NodeLimit { .. }) => true,
            Outcome::Aborted(AbortReason::DepthLimit { .. }) => {
                overall.limit().is_some_and(|max| depth_limit >= max)
            }
        };
        if finished {
            let solution = engine.solution_path().map(|path| {
                path.into_iter()
                    .map(|step| (step.action.cloned(), step.state.clone()))
                    .collect()
            });
            return Ok(DeepeningRun {
                outcome,
                iterations,
                solution,
            });
        }
        depth_limit += 1;
    }
}
