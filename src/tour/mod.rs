//! Tour utilities and the common solution record.
//!
//! A tour is an ordered sequence of distinct node ids, implicitly cyclic:
//! the last node connects back to the first. Solvers build new tours rather
//! than mutating existing ones; these helpers convert between tours and
//! edge lists and sum cyclic costs against the original graph weights.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::Graph;

/// The result record every solver returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Ordered node sequence; the cycle closes from the last node back to
    /// the first.
    pub path: Vec<usize>,
    /// Sum of original-graph weights along the cyclic path.
    pub path_length: f64,
    /// Wall-clock seconds spent solving.
    pub elapsed_time: f64,
}

/// Sum of graph weights along the cyclic path `path[0] → … → path[n-1] →
/// path[0]`.
///
/// # Examples
///
/// ```
/// use tsp_solve::graph::Graph;
/// use tsp_solve::tour::tour_length;
///
/// let g = Graph::from_fn(3, |_, _| 1.0).expect("valid");
/// assert!((tour_length(&g, &[0, 1, 2]) - 3.0).abs() < 1e-10);
/// ```
pub fn tour_length(graph: &Graph, path: &[usize]) -> f64 {
    let n = path.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| graph.weight(path[i], path[(i + 1) % n]))
        .sum()
}

/// Converts a tour into its cyclic edge list, closing edge included.
pub fn tour_to_edge_list(path: &[usize]) -> Vec<(usize, usize)> {
    let n = path.len();
    (0..n).map(|i| (path[i], path[(i + 1) % n])).collect()
}

/// Reassembles a single cycle from an edge list by walking successor links,
/// starting from the first edge's tail.
///
/// Returns `Error::NotCircular` if some node's successor is missing from
/// the mapping, i.e. the edges do not close into one cycle.
///
/// # Examples
///
/// ```
/// use tsp_solve::tour::edge_list_to_tour;
///
/// let tour = edge_list_to_tour(&[(2, 0), (0, 1), (1, 2)]).expect("circular");
/// assert_eq!(tour, vec![2, 0, 1]);
/// assert!(edge_list_to_tour(&[(0, 1), (2, 3)]).is_err());
/// ```
pub fn edge_list_to_tour(edges: &[(usize, usize)]) -> Result<Vec<usize>> {
    if edges.is_empty() {
        return Ok(Vec::new());
    }
    let mut successor = std::collections::HashMap::with_capacity(edges.len());
    for &(from, to) in edges {
        successor.insert(from, to);
    }
    let mut tour = Vec::with_capacity(successor.len());
    let mut node = edges[0].0;
    for _ in 0..successor.len() {
        tour.push(node);
        node = *successor
            .get(&node)
            .ok_or(Error::NotCircular { node })?;
    }
    Ok(tour)
}

/// `true` if `path` visits every node of `0..n` exactly once.
pub fn is_permutation(path: &[usize], n: usize) -> bool {
    if path.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &node in path {
        if node >= n || seen[node] {
            return false;
        }
        seen[node] = true;
    }
    true
}
