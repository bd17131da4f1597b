//! Typed search errors.
//!
//! `SearchError` represents pre-flight policy failures and internal invariant
//! violations. Ordinary terminations (goal found, frontier exhausted, bound
//! reached) are expressed via [`crate::search::Outcome`] and are never errors.

use crate::node::NodeId;
use crate::search::EngineState;

/// Failure raised by the engine, its frontier, or its node arena.
///
/// `EmptyFrontier`, `UninitializedCost` and `NonFiniteCost` are programming
/// errors: the run that hits one stops immediately and the error is returned
/// from [`SearchEngine::run`](crate::search::SearchEngine::run).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// `remove_best` was called on an empty frontier.
    #[error("remove_best called on an empty frontier")]
    EmptyFrontier,

    /// The active discipline produced no cost (NaN) for a node.
    #[error("cost of node {node_id} was never established by the discipline")]
    UninitializedCost { node_id: NodeId },

    /// The active discipline produced an infinite cost for a node.
    #[error("discipline assigned non-finite cost {cost} to node {node_id}")]
    NonFiniteCost { node_id: NodeId, cost: f64 },

    /// The policy carries values the engine cannot honor.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },

    /// The engine was stepped after reaching a terminal state.
    #[error("engine cannot run from state {state:?}")]
    NotRunnable { state: EngineState },
}

/// Failure to load a [`SearchPolicy`](crate::policy::SearchPolicy) from TOML.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read policy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse policy TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] SearchError),
}
