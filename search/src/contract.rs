//! Search domain contract trait and goal tests.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

/// Trait for domains that can be explored by the engine.
///
/// The engine never inspects states or actions beyond equality, hashing and
/// the three calls below.
///
/// # Contract
///
/// - All three operations must be pure: same inputs, same outputs, no
///   observable side effects. Frontier and explored-set membership rely on it.
/// - `valid_actions` must be deterministic *including order*; the order of
///   returned actions decides tie-breaks between equal-cost children.
/// - `apply` may only be called with an action returned by `valid_actions`
///   for the same state. Violations are not detected; the result is whatever
///   the domain produces.
pub trait SearchDomain {
    /// An immutable point in the configuration space.
    type State: Clone + Eq + Hash;
    /// An immutable description of one transition.
    type Action;

    /// Enumerate every action legal from `state` (empty for a dead end).
    fn valid_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Produce the successor of `state` under `action`.
    fn apply(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Test whether `state` satisfies the domain's own goal.
    fn is_goal(&self, state: &Self::State) -> bool;
}

/// The goal test handed to the engine.
pub enum GoalTest<S> {
    /// Delegate to [`SearchDomain::is_goal`].
    Domain,
    /// Compare against a fixed goal state by equality.
    State(S),
    /// Arbitrary predicate over states.
    Predicate(Arc<dyn Fn(&S) -> bool + Send + Sync>),
}

impl<S> GoalTest<S> {
    /// Wrap a closure as a goal predicate.
    pub fn predicate(f: impl Fn(&S) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    /// Evaluate the test against `state`.
    pub fn is_satisfied<D>(&self, domain: &D, state: &S) -> bool
    where
        D: SearchDomain<State = S>,
        S: PartialEq,
    {
        match self {
            Self::Domain => domain.is_goal(state),
            Self::State(goal) => goal == state,
            Self::Predicate(f) => f(state),
        }
    }
}

impl<S: Clone> Clone for GoalTest<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Domain => Self::Domain,
            Self::State(goal) => Self::State(goal.clone()),
            Self::Predicate(f) => Self::Predicate(Arc::clone(f)),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for GoalTest<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain => f.write_str("Domain"),
            Self::State(goal) => f.debug_tuple("State").field(goal).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
