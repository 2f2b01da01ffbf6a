//! Edge-induced subgraph view.

use super::Graph;

/// The subgraph formed by a set of selected edges.
///
/// Unordered duplicates collapse to a single undirected edge, mirroring how
/// a directed edge selection `(i, j)`/`(j, i)` describes one tour edge.
/// Nodes are those of the parent graph; nodes without an incident selected
/// edge are isolated and excluded from [`EdgeSubgraph::components`].
#[derive(Debug, Clone)]
pub struct EdgeSubgraph {
    size: usize,
    edges: Vec<(usize, usize)>,
    weights: Vec<f64>,
    adjacency: Vec<Vec<usize>>,
}

impl EdgeSubgraph {
    pub(super) fn new(graph: &Graph, edges: &[(usize, usize)]) -> Self {
        let size = graph.num_nodes();
        let mut seen = vec![false; size * size];
        let mut unique = Vec::new();
        let mut weights = Vec::new();
        let mut adjacency = vec![Vec::new(); size];
        for &(i, j) in edges {
            let (a, b) = if i <= j { (i, j) } else { (j, i) };
            if a == b || seen[a * size + b] {
                continue;
            }
            seen[a * size + b] = true;
            unique.push((a, b));
            weights.push(graph.weight(a, b));
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        Self {
            size,
            edges: unique,
            weights,
            adjacency,
        }
    }

    /// The deduplicated undirected edges, each as `(min, max)`.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Sum of the parent-graph weights over the unique edges.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Weight of the edge at `idx` in [`EdgeSubgraph::edges`] order.
    pub fn edge_weight(&self, idx: usize) -> f64 {
        self.weights[idx]
    }

    /// Degree of `node` in this subgraph.
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Degree of every parent-graph node, isolated nodes included.
    pub fn degrees(&self) -> Vec<usize> {
        self.adjacency.iter().map(Vec::len).collect()
    }

    /// Neighbors of `node`.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Connected components over nodes with at least one incident edge,
    /// each sorted ascending.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.size];
        let mut components = Vec::new();
        for start in 0..self.size {
            if visited[start] || self.adjacency[start].is_empty() {
                continue;
            }
            let mut stack = vec![start];
            let mut component = Vec::new();
            visited[start] = true;
            while let Some(u) = stack.pop() {
                component.push(u);
                for &v in &self.adjacency[u] {
                    if !visited[v] {
                        visited[v] = true;
                        stack.push(v);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components
    }

    /// `true` if the subgraph spans every parent-graph node as one
    /// component where each node has degree exactly 2, i.e. it is a single
    /// Hamiltonian cycle.
    pub fn is_hamiltonian_cycle(&self) -> bool {
        if self.adjacency.iter().any(|adj| adj.len() != 2) {
            return false;
        }
        let components = self.components();
        components.len() == 1 && components[0].len() == self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Graph {
        Graph::from_fn(4, |i, j| if (i + 2) % 4 == j { 2.0 } else { 1.0 }).expect("valid")
    }

    #[test]
    fn test_dedup_and_weight() {
        let g = square();
        let sub = g.edge_subgraph(&[(0, 1), (1, 0), (1, 2)]);
        assert_eq!(sub.edges().len(), 2);
        assert!((sub.total_weight() - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_degrees() {
        let g = square();
        let sub = g.edge_subgraph(&[(0, 1), (1, 2)]);
        assert_eq!(sub.degrees(), vec![1, 2, 1, 0]);
    }

    #[test]
    fn test_components_skip_isolated() {
        let g = square();
        let sub = g.edge_subgraph(&[(0, 1)]);
        assert_eq!(sub.components(), vec![vec![0, 1]]);
    }

    #[test]
    fn test_two_components() {
        let g = square();
        let sub = g.edge_subgraph(&[(0, 1), (2, 3)]);
        assert_eq!(sub.components(), vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_hamiltonian_cycle_check() {
        let g = square();
        let cycle = g.edge_subgraph(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert!(cycle.is_hamiltonian_cycle());

        // Two disjoint triangles are not allowed even though every degree is 2.
        let g6 = Graph::from_fn(6, |_, _| 1.0).expect("valid");
        let triangles =
            g6.edge_subgraph(&[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        assert!(!triangles.is_hamiltonian_cycle());
    }
}
