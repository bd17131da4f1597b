//! `SearchTrace`: expansion-event audit log.
//!
//! The normative record is the ordered list of [`ExpandEvent`] entries; the
//! metadata block echoes the policy and the final counters. Two runs with the
//! same domain, initial state, discipline and policy produce byte-identical
//! canonical JSON.

use crate::canon::{canonical_hash, canonical_json_bytes, CanonError, DOMAIN_SEARCH_TRACE};
use crate::node::NodeId;
use crate::policy::{DepthCutoff, SearchMode};
use crate::search::{AbortReason, Outcome};

/// The complete audit trail of one run.
#[derive(Debug, Clone)]
pub struct SearchTrace {
    /// Ordered expansion events.
    pub expansions: Vec<ExpandEvent>,
    /// Policy echo and counters.
    pub metadata: TraceMetadata,
}

/// One frontier pop followed by an expansion.
#[derive(Debug, Clone)]
pub struct ExpandEvent {
    /// Position in the total order of expansions (0-based).
    pub expansion_order: u64,
    pub node_id: NodeId,
    pub parent_id: Option<NodeId>,
    pub depth: u32,
    pub cost: f64,
    /// Children in generation order.
    pub children: Vec<ChildRecord>,
}

/// A generated child and what the engine did with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRecord {
    pub node_id: NodeId,
    pub outcome: ChildOutcome,
}

/// Fate of a generated child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcome {
    /// Queued on the frontier.
    Inserted,
    /// Graph mode: state already expanded.
    AlreadyExplored,
    /// Graph mode: state already queued.
    AlreadyInFrontier,
}

/// Aggregate metadata.
#[derive(Debug, Clone)]
pub struct TraceMetadata {
    // Policy echo
    pub discipline: &'static str,
    pub mode: SearchMode,
    pub max_nodes: i64,
    pub max_depth: i64,
    pub depth_cutoff: DepthCutoff,

    // Counters
    pub total_expanded: u64,
    pub total_generated: u64,
    pub total_duplicates_suppressed: u64,
    pub total_depth_pruned: u64,
    pub frontier_high_water: u64,
    /// `None` while the run is still in progress.
    pub outcome: Option<Outcome>,
}

impl SearchTrace {
    /// Serialize the trace to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content digest of the canonical bytes (`"sha256:<hex>"`).
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<String, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_TRACE, &bytes))
    }

    /// Expansion events whose node sits at `depth`.
    pub fn expansions_at_depth(&self, depth: u32) -> impl Iterator<Item = &ExpandEvent> {
        self.expansions.iter().filter(move |e| e.depth == depth)
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "expansions": self.expansions.iter().map(expand_event_to_json).collect::<Vec<_>>(),
            "metadata": metadata_to_json(&self.metadata),
        })
    }
}

// Costs are rendered with Rust's shortest round-trip formatting so the
// canonical form never holds a float.
fn expand_event_to_json(e: &ExpandEvent) -> serde_json::Value {
    serde_json::json!({
        "children": e.children.iter().map(child_record_to_json).collect::<Vec<_>>(),
        "cost": e.cost.to_string(),
        "depth": e.depth,
        "expansion_order": e.expansion_order,
        "node_id": e.node_id.index(),
        "parent_id": e.parent_id.map(NodeId::index),
    })
}

fn child_record_to_json(r: &ChildRecord) -> serde_json::Value {
    serde_json::json!({
        "node_id": r.node_id.index(),
        "outcome": child_outcome_str(r.outcome),
    })
}

fn child_outcome_str(o: ChildOutcome) -> &'static str {
    match o {
        ChildOutcome::Inserted => "inserted",
        ChildOutcome::AlreadyExplored => "already_explored",
        ChildOutcome::AlreadyInFrontier => "already_in_frontier",
    }
}

fn metadata_to_json(m: &TraceMetadata) -> serde_json::Value {
    serde_json::json!({
        "depth_cutoff": m.depth_cutoff.as_str(),
        "discipline": m.discipline,
        "frontier_high_water": m.frontier_high_water,
        "max_depth": m.max_depth,
        "max_nodes": m.max_nodes,
        "mode": m.mode.as_str(),
        "outcome": m.outcome.as_ref().map(outcome_to_json),
        "total_depth_pruned": m.total_depth_pruned,
        "total_duplicates_suppressed": m.total_duplicates_suppressed,
        "total_expanded": m.total_expanded,
        "total_generated": m.total_generated,
    })
}

fn outcome_to_json(o: &Outcome) -> serde_json::Value {
    match o {
        Outcome::Solved { node } => {
            serde_json::json!({"node_id": node.index(), "type": "solved"})
        }
        Outcome::Exhausted => serde_json::json!({"type": "exhausted"}),
        Outcome::Aborted(AbortReason::NodeLimit { max_nodes }) => {
            serde_json::json!({"max_nodes": max_nodes, "reason": "node_limit", "type": "aborted"})
        }
        Outcome::Aborted(AbortReason::DepthLimit { max_depth }) => {
            serde_json::json!({"max_depth": max_depth, "reason": "depth_limit", "type": "aborted"})
        }
    }
}
