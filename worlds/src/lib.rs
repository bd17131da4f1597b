//! Statespace Worlds: puzzle domains for the search engine.
//!
//! Each world implements [`SearchDomain`](statespace_search::contract::SearchDomain)
//! and is used by the acceptance tests and benchmarks. None of them drive a
//! search on their own.
//!
//! - [`river_crossing`]: missionaries and cannibals with a bounded boat
//! - [`sliding_puzzle`]: `rows x cols` sliding-tile boards plus heuristics

#![forbid(unsafe_code)]

pub mod river_crossing;
pub mod sliding_puzzle;
