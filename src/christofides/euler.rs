//! Eulerian multigraph: union of spanning tree and matching edges.

use crate::graph::Graph;

/// An undirected multigraph over the parent graph's nodes; parallel edges
/// are kept (the spanning tree and the matching may select the same pair).
#[derive(Debug)]
pub struct Multigraph {
    adjacency: Vec<Vec<(usize, usize)>>,
    num_edges: usize,
}

impl Multigraph {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); num_nodes],
            num_edges: 0,
        }
    }

    pub fn add_edge(&mut self, u: usize, v: usize) {
        let id = self.num_edges;
        self.adjacency[u].push((v, id));
        self.adjacency[v].push((u, id));
        self.num_edges += 1;
    }

    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Nodes with odd degree, ascending.
    pub fn odd_nodes(&self) -> Vec<usize> {
        (0..self.adjacency.len())
            .filter(|&v| self.degree(v) % 2 == 1)
            .collect()
    }

    /// Re-balances the multigraph by duplicating direct minimum-cost edges
    /// between odd-degree nodes until every degree is even.
    ///
    /// The tree-plus-matching union is even-degree by construction, so this
    /// only runs if that invariant was somehow violated upstream.
    pub fn eulerize(&mut self, graph: &Graph) {
        let mut odd = self.odd_nodes();
        while odd.len() >= 2 {
            let u = odd[0];
            // Pair u with its cheapest odd partner.
            let mut best = 1;
            for idx in 2..odd.len() {
                if graph.weight(u, odd[idx]) < graph.weight(u, odd[best]) {
                    best = idx;
                }
            }
            let v = odd.swap_remove(best);
            odd.swap_remove(0);
            self.add_edge(u, v);
        }
    }

    /// Computes an Eulerian circuit with Hierholzer's algorithm, returned
    /// as the closed node walk (first node repeated at the end).
    ///
    /// Assumes the multigraph is connected over its non-isolated nodes and
    /// every degree is even; run [`Multigraph::eulerize`] first otherwise.
    pub fn eulerian_circuit(&self) -> Vec<usize> {
        let n = self.adjacency.len();
        let start = match (0..n).find(|&v| self.degree(v) > 0) {
            Some(v) => v,
            None => return Vec::new(),
        };
        let mut used = vec![false; self.num_edges];
        let mut cursor = vec![0usize; n];
        let mut stack = vec![start];
        let mut circuit = Vec::with_capacity(self.num_edges + 1);
        while let Some(&v) = stack.last() {
            let mut advanced = false;
            while cursor[v] < self.adjacency[v].len() {
                let (to, id) = self.adjacency[v][cursor[v]];
                cursor[v] += 1;
                if !used[id] {
                    used[id] = true;
                    stack.push(to);
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                circuit.push(v);
                stack.pop();
            }
        }
        circuit.reverse();
        circuit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_covers_every_edge_once() {
        let mut mg = Multigraph::new(4);
        for &(u, v) in &[(0, 1), (1, 2), (2, 0), (0, 3), (3, 0)] {
            mg.add_edge(u, v);
        }
        let walk = mg.eulerian_circuit();
        assert_eq!(walk.len(), 6); // 5 edges + closing node
        assert_eq!(walk.first(), walk.last());
        let mut counts = std::collections::HashMap::new();
        for pair in walk.windows(2) {
            *counts
                .entry((pair[0].min(pair[1]), pair[0].max(pair[1])))
                .or_insert(0) += 1;
        }
        assert_eq!(counts.get(&(0, 1)), Some(&1));
        assert_eq!(counts.get(&(1, 2)), Some(&1));
        assert_eq!(counts.get(&(0, 2)), Some(&1));
        assert_eq!(counts.get(&(0, 3)), Some(&2));
    }

    #[test]
    fn test_parallel_edges() {
        let mut mg = Multigraph::new(2);
        mg.add_edge(0, 1);
        mg.add_edge(0, 1);
        let walk = mg.eulerian_circuit();
        assert_eq!(walk, vec![0, 1, 0]);
    }

    #[test]
    fn test_eulerize_fixes_odd_degrees() {
        let g = Graph::from_fn(4, |i, j| (i + j) as f64).expect("valid");
        let mut mg = Multigraph::new(4);
        // Path 0-1-2-3: endpoints 0 and 3 are odd.
        mg.add_edge(0, 1);
        mg.add_edge(1, 2);
        mg.add_edge(2, 3);
        assert_eq!(mg.odd_nodes(), vec![0, 3]);
        mg.eulerize(&g);
        assert!(mg.odd_nodes().is_empty());
        let walk = mg.eulerian_circuit();
        assert_eq!(walk.len(), 5);
    }

    #[test]
    fn test_empty_multigraph() {
        let mg = Multigraph::new(3);
        assert!(mg.eulerian_circuit().is_empty());
    }
}
