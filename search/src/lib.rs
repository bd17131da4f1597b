//! Statespace Search: a generic state-space search engine.
//!
//! The engine explores the implicit graph of states reachable from an initial
//! state through a [`SearchDomain`](contract::SearchDomain), ordering its
//! frontier by a pluggable cost [`Discipline`](discipline::Discipline).
//!
//! # Crate dependency graph
//!
//! ```text
//! statespace_search  ←  statespace_worlds  ←  lock_tests / benchmarks
//! (engine, frontier)    (puzzle domains)
//! ```
//!
//! # Key types
//!
//! - [`SearchDomain`](contract::SearchDomain): the domain adapter contract
//! - [`NodeArena`](node::NodeArena): search tree with parent links by handle
//! - [`Frontier`](frontier::Frontier): stable priority frontier with state membership
//! - [`BreadthFirst`](discipline::BreadthFirst), [`DepthFirst`](discipline::DepthFirst),
//!   [`CostFn`](discipline::CostFn): cost assignment disciplines
//! - [`SearchPolicy`](policy::SearchPolicy): mode, bounds, TOML configuration
//! - [`SearchEngine`](search::SearchEngine): `Ready → Running → {Solved, Exhausted, Aborted}`
//! - [`SearchTrace`](trace::SearchTrace): optional expansion audit log

#![forbid(unsafe_code)]

pub mod canon;
pub mod contract;
pub mod deepening;
pub mod discipline;
pub mod error;
pub mod explored;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod search;
pub mod trace;
