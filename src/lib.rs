//! # tsp-solve
//!
//! Solvers for the symmetric traveling salesman problem on dense weighted
//! graphs: a Christofides 1.5-approximation, a 2-opt local search, and an
//! exact cutting-plane method over subtour elimination constraints.
//!
//! ## Modules
//!
//! - [`graph`] — Dense symmetric weight matrix and edge subgraph views
//! - [`tour`] — Tour/edge-list conversions and the common [`tour::Solution`] record
//! - [`christofides`] — MST + minimum-weight perfect matching + Eulerian shortcut
//! - [`two_opt`] — Nearest-neighbor construction with 2-opt improvement
//! - [`cutting_plane`] — Dantzig-Fulkerson-Johnson subtour elimination
//! - [`mip`] — 0/1 integer-program interface and the bundled `minilp` backend
//! - [`error`] — Crate-wide error type

pub mod christofides;
pub mod cutting_plane;
pub mod error;
pub mod graph;
pub mod mip;
pub mod tour;
pub mod two_opt;

pub use christofides::christofides;
pub use cutting_plane::{dfj, DfjOptions, DfjResult};
pub use error::{Error, Result};
pub use graph::Graph;
pub use tour::Solution;
pub use two_opt::two_opt;
