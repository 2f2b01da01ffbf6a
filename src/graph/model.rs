//! Dense symmetric weight matrix.

use crate::error::{Error, Result};

use super::EdgeSubgraph;

/// A weighted undirected graph over nodes `0..n`, stored as a dense
/// row-major weight matrix.
///
/// Off-diagonal entries hold edge weights; `f64::INFINITY` marks an absent
/// edge. Diagonal entries are unused. Construction validates that the graph
/// has at least two nodes, that every present weight is finite and
/// non-negative, and that the graph is connected.
///
/// All public APIs are 0-based; instance loaders are expected to normalize
/// 1-based node ids before building a `Graph`.
///
/// # Examples
///
/// ```
/// use tsp_solve::graph::Graph;
///
/// // Unit square: 0-1-2-3 around the perimeter.
/// let g = Graph::from_fn(4, |i, j| {
///     if (i + 2) % 4 == j { 2f64.sqrt() } else { 1.0 }
/// }).expect("valid instance");
/// assert_eq!(g.num_nodes(), 4);
/// assert!((g.weight(0, 1) - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    weights: Vec<f64>,
    size: usize,
}

impl Graph {
    /// Builds a graph from an explicit `size * size` weight matrix.
    ///
    /// The matrix must be symmetric; use [`Graph::from_asymmetric`] for
    /// directed instance data.
    pub fn from_weights(size: usize, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != size * size {
            return Err(Error::invalid_graph(format!(
                "expected {} weights for {} nodes, got {}",
                size * size,
                size,
                weights.len()
            )));
        }
        for i in 0..size {
            for j in 0..size {
                if i == j {
                    continue;
                }
                let w = weights[i * size + j];
                if w.is_nan() || w < 0.0 {
                    return Err(Error::invalid_graph(format!(
                        "weight({i}, {j}) = {w} is not a non-negative number"
                    )));
                }
                if (w - weights[j * size + i]).abs() > 1e-9 && w.is_finite() {
                    return Err(Error::invalid_graph(format!(
                        "weights for ({i}, {j}) differ by direction; symmetrize first"
                    )));
                }
            }
        }
        let graph = Self { weights, size };
        graph.validate()?;
        Ok(graph)
    }

    /// Builds a graph by evaluating `weight(i, j)` for every ordered pair.
    ///
    /// `weight` is only required to be symmetric; the value for `i == j` is
    /// never read.
    pub fn from_fn(size: usize, weight: impl Fn(usize, usize) -> f64) -> Result<Self> {
        let mut weights = vec![0.0; size * size];
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    weights[i * size + j] = weight(i, j);
                }
            }
        }
        Self::from_weights(size, weights)
    }

    /// Builds an undirected graph from directed weight data, keeping the
    /// smaller of the two directed weights per unordered pair.
    ///
    /// This is the crate's `to_undirected` boundary: asymmetric instances
    /// degrade gracefully (the result never overestimates a tour) but carry
    /// no approximation guarantee.
    pub fn from_asymmetric(size: usize, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != size * size {
            return Err(Error::invalid_graph(format!(
                "expected {} weights for {} nodes, got {}",
                size * size,
                size,
                weights.len()
            )));
        }
        let mut sym = weights;
        for i in 0..size {
            for j in (i + 1)..size {
                let w = sym[i * size + j].min(sym[j * size + i]);
                sym[i * size + j] = w;
                sym[j * size + i] = w;
            }
        }
        Self::from_weights(size, sym)
    }

    fn validate(&self) -> Result<()> {
        if self.size < 2 {
            return Err(Error::invalid_graph(format!(
                "need at least 2 nodes, got {}",
                self.size
            )));
        }
        // BFS over finite-weight edges.
        let mut visited = vec![false; self.size];
        let mut stack = vec![0usize];
        visited[0] = true;
        let mut seen = 1;
        while let Some(u) = stack.pop() {
            for v in 0..self.size {
                if v != u && !visited[v] && self.weight(u, v).is_finite() {
                    visited[v] = true;
                    seen += 1;
                    stack.push(v);
                }
            }
        }
        if seen != self.size {
            return Err(Error::invalid_graph(format!(
                "graph is disconnected: reached {seen} of {} nodes",
                self.size
            )));
        }
        Ok(())
    }

    /// Returns the weight of the edge between `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.weights[i * self.size + j]
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.size
    }

    /// Iterator over node ids `0..n`.
    pub fn nodes(&self) -> std::ops::Range<usize> {
        0..self.size
    }

    /// Returns the subgraph induced by `nodes`, relabeled to local indices
    /// `0..nodes.len()` in the given order. Weights come from this graph.
    ///
    /// The caller keeps `nodes` as the local-to-original id map.
    ///
    /// # Panics
    ///
    /// Panics if any id is out of bounds.
    pub fn induced_subgraph(&self, nodes: &[usize]) -> Graph {
        let m = nodes.len();
        let mut weights = vec![0.0; m * m];
        for (a, &i) in nodes.iter().enumerate() {
            for (b, &j) in nodes.iter().enumerate() {
                if a != b {
                    weights[a * m + b] = self.weight(i, j);
                }
            }
        }
        Graph { weights, size: m }
    }

    /// Returns the subgraph formed by the given edges (unordered pairs are
    /// deduplicated), with weights from this graph.
    pub fn edge_subgraph(&self, edges: &[(usize, usize)]) -> EdgeSubgraph {
        EdgeSubgraph::new(self, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_weights_symmetric() {
        let g = Graph::from_weights(2, vec![0.0, 3.0, 3.0, 0.0]).expect("valid");
        assert_eq!(g.num_nodes(), 2);
        assert_eq!(g.weight(0, 1), 3.0);
        assert_eq!(g.weight(1, 0), 3.0);
    }

    #[test]
    fn test_too_small() {
        assert!(matches!(
            Graph::from_weights(1, vec![0.0]),
            Err(Error::InvalidGraph(_))
        ));
        assert!(matches!(
            Graph::from_weights(0, vec![]),
            Err(Error::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_negative_weight_rejected() {
        assert!(matches!(
            Graph::from_weights(2, vec![0.0, -1.0, -1.0, 0.0]),
            Err(Error::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_asymmetric_rejected() {
        assert!(matches!(
            Graph::from_weights(2, vec![0.0, 1.0, 2.0, 0.0]),
            Err(Error::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_disconnected_rejected() {
        // Nodes {0,1} and {2,3} joined only by infinite weights.
        let inf = f64::INFINITY;
        let weights = vec![
            0.0, 1.0, inf, inf, //
            1.0, 0.0, inf, inf, //
            inf, inf, 0.0, 1.0, //
            inf, inf, 1.0, 0.0,
        ];
        assert!(matches!(
            Graph::from_weights(4, weights),
            Err(Error::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_from_asymmetric_keeps_smaller() {
        let g = Graph::from_asymmetric(2, vec![0.0, 5.0, 3.0, 0.0]).expect("valid");
        assert_eq!(g.weight(0, 1), 3.0);
        assert_eq!(g.weight(1, 0), 3.0);
    }

    #[test]
    fn test_induced_subgraph_relabels() {
        let g = Graph::from_fn(4, |i, j| (i + j) as f64).expect("valid");
        let sub = g.induced_subgraph(&[1, 3]);
        assert_eq!(sub.num_nodes(), 2);
        assert_eq!(sub.weight(0, 1), g.weight(1, 3));
    }

    #[test]
    fn test_nodes_iterator() {
        let g = Graph::from_fn(3, |_, _| 1.0).expect("valid");
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec![0, 1, 2]);
    }
}
