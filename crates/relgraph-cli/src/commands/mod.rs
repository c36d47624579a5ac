//! Command implementations
//!
//! A run optionally reloads the persisted data, then always prints the graph.

pub mod graph;
pub mod reload;
