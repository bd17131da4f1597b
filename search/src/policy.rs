//! Search policy: mode, resource bounds and their TOML configuration.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, SearchError};

/// Sentinel used in policies and configuration files for "no bound".
pub const UNBOUNDED: i64 = -1;

/// Whether repeated states are suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// No dedup: states may recur arbitrarily.
    Tree,
    /// Skip children whose state is already explored or already queued.
    #[default]
    Graph,
}

impl SearchMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Graph => "graph",
        }
    }
}

/// What happens when a node deeper than `max_depth` reaches expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthCutoff {
    /// Stop the run with `Aborted`.
    #[default]
    Abort,
    /// Discard the node and keep going; the run still ends `Aborted`
    /// instead of `Exhausted` if anything was discarded.
    Prune,
}

impl DepthCutoff {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Prune => "prune",
        }
    }
}

/// A resource bound decoded from its `-1 = unbounded` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bound(Option<u64>);

impl Bound {
    pub const UNBOUNDED: Self = Self(None);

    #[must_use]
    pub const fn at_most(limit: u64) -> Self {
        Self(Some(limit))
    }

    /// Decode a sentinel value.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for values below `-1`.
    pub fn from_sentinel(field: &str, value: i64) -> Result<Self, SearchError> {
        match value {
            UNBOUNDED => Ok(Self(None)),
            v => u64::try_from(v)
                .map(|limit| Self(Some(limit)))
                .map_err(|_| SearchError::InvalidPolicy {
                    detail: format!("{field} = {v}; expected -1 (unbounded) or a non-negative limit"),
                }),
        }
    }

    #[must_use]
    pub fn limit(self) -> Option<u64> {
        self.0
    }

    /// Whether `value` lies strictly beyond the bound.
    #[must_use]
    pub fn is_exceeded_by(self, value: u64) -> bool {
        self.0.is_some_and(|limit| value > limit)
    }

    /// Encode back to the sentinel form.
    #[must_use]
    pub fn as_sentinel(self) -> i64 {
        self.0
            .map_or(UNBOUNDED, |limit| i64::try_from(limit).unwrap_or(i64::MAX))
    }
}

/// Search mode and budget configuration.
///
/// Loaded from TOML with every field optional:
///
/// ```toml
/// mode = "tree"
/// max_nodes = 5000
/// max_depth = -1
/// depth_cutoff = "abort"
/// record_trace = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchPolicy {
    /// Tree or graph search.
    #[serde(default)]
    pub mode: SearchMode,

    /// Maximum node expansions (`-1` for no maximum).
    #[serde(default = "default_unbounded")]
    pub max_nodes: i64,

    /// Maximum depth of expanded nodes (`-1` for no maximum).
    #[serde(default = "default_unbounded")]
    pub max_depth: i64,

    /// Behavior when a node beyond `max_depth` is popped.
    #[serde(default)]
    pub depth_cutoff: DepthCutoff,

    /// Whether to record a [`SearchTrace`](crate::trace::SearchTrace).
    #[serde(default)]
    pub record_trace: bool,
}

fn default_unbounded() -> i64 {
    UNBOUNDED
}

impl SearchPolicy {
    /// Unbounded tree search.
    #[must_use]
    pub fn tree() -> Self {
        Self {
            mode: SearchMode::Tree,
            ..Self::default()
        }
    }

    /// Unbounded graph search.
    #[must_use]
    pub fn graph() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: i64) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: i64) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_depth_cutoff(mut self, depth_cutoff: DepthCutoff) -> Self {
        self.depth_cutoff = depth_cutoff;
        self
    }

    #[must_use]
    pub fn with_trace(mut self) -> Self {
        self.record_trace = true;
        self
    }

    /// Decoded expansion bound.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_nodes < -1`.
    pub fn node_bound(&self) -> Result<Bound, SearchError> {
        Bound::from_sentinel("max_nodes", self.max_nodes)
    }

    /// Decoded depth bound.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_depth < -1`.
    pub fn depth_bound(&self) -> Result<Bound, SearchError> {
        Bound::from_sentinel("max_depth", self.max_depth)
    }

    /// Check that both bounds decode.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] naming the first bad field.
    pub fn validate(&self) -> Result<(), SearchError> {
        self.node_bound()?;
        self.depth_bound()?;
        if self.mode == SearchMode::Graph
            && self.depth_cutoff == DepthCutoff::Prune
            && self.max_depth != UNBOUNDED
        {
            tracing::warn!(
                max_depth = self.max_depth,
                "graph mode with depth pruning can miss solutions reachable through pruned states"
            );
        }
        Ok(())
    }

    /// Parse and validate a policy from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown fields and
    /// [`ConfigError::Invalid`] for out-of-range bounds.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let policy: Self = toml::from_str(text)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Read, parse and validate a policy file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`SearchPolicy::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            max_nodes: UNBOUNDED,
            max_depth: UNBOUNDED,
            depth_cutoff: DepthCutoff::default(),
            record_trace: false,
        }
    }
}
