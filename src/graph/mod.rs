//! Weighted undirected graph model shared by all solvers.
//!
//! A [`Graph`] is a dense symmetric weight matrix over nodes `0..n`.
//! Solvers borrow it read-only; subgraph views ([`EdgeSubgraph`], induced
//! subgraphs) copy the weights they need and never alias into the original.

mod model;
mod subgraph;

pub use model::Graph;
pub use subgraph::EdgeSubgraph;
