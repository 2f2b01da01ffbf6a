//! Subtour extraction from a selected-edge graph.
//!
//! Two cases feed the cut generator. A disconnected selection decomposes
//! into connected components, each a subtour. A connected selection that is
//! not a simple cycle (some node has degree > 2) is decomposed through a
//! minimum cycle basis; each basis cycle is treated as a subtour.
//!
//! # Reference
//!
//! Horton, J.D. (1987). "A polynomial-time algorithm to find the shortest
//! cycle basis of a graph", *SIAM Journal on Computing* 16(2), 358-366.

use crate::graph::EdgeSubgraph;

/// Node sets of the subtours present in the selected-edge graph.
///
/// Multiple components are returned directly; a single non-cycle component
/// is split into its minimum cycle basis.
pub fn find_subtours(selected: &EdgeSubgraph) -> Vec<Vec<usize>> {
    let components = selected.components();
    if components.len() != 1 {
        return components;
    }
    minimum_cycle_basis(selected)
}

/// Computes a minimum-weight cycle basis, returning each cycle as a sorted
/// node set.
///
/// Horton's construction: for every vertex `v` and edge `(x, y)`, the
/// candidate cycle is `SP(v, x) ⊕ SP(v, y) ⊕ {(x, y)}` over the
/// shortest-path tree rooted at `v` (symmetric difference cancels shared
/// path segments). Candidates are scanned in weight order and kept while
/// linearly independent over GF(2), until the cycle-space dimension
/// `m − n + c` is reached.
pub fn minimum_cycle_basis(selected: &EdgeSubgraph) -> Vec<Vec<usize>> {
    let edges = selected.edges();
    let m = edges.len();
    if m == 0 {
        return Vec::new();
    }
    let components = selected.components();
    let incident: usize = components.iter().map(Vec::len).sum();
    let dimension = (m + components.len()).saturating_sub(incident);
    if dimension == 0 {
        return Vec::new();
    }

    let num_nodes = selected.degrees().len();
    // Local adjacency with edge ids for the shortest-path trees.
    let mut adjacency = vec![Vec::new(); num_nodes];
    for (idx, &(u, v)) in edges.iter().enumerate() {
        adjacency[u].push((v, idx));
        adjacency[v].push((u, idx));
    }

    // Candidate cycles as edge bitsets with their total weight.
    let mut candidates: Vec<(f64, Vec<u64>)> = Vec::new();
    let words = m.div_ceil(64);
    for root in 0..num_nodes {
        if adjacency[root].is_empty() {
            continue;
        }
        let parent_edge = shortest_path_tree(root, &adjacency, selected, num_nodes);
        for (idx, &(x, y)) in edges.iter().enumerate() {
            let mut bits = vec![0u64; words];
            xor_path(&mut bits, x, root, &parent_edge, edges);
            xor_path(&mut bits, y, root, &parent_edge, edges);
            bits[idx / 64] ^= 1 << (idx % 64);
            if bits.iter().all(|&w| w == 0) {
                continue;
            }
            let weight = (0..m)
                .filter(|&e| bits[e / 64] >> (e % 64) & 1 == 1)
                .map(|e| selected.edge_weight(e))
                .sum();
            candidates.push((weight, bits));
        }
    }
    candidates.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("weights are finite"));

    // Greedy GF(2) independence test via Gaussian elimination.
    let mut basis: Vec<Vec<u64>> = Vec::new();
    let mut cycles = Vec::new();
    for (_, bits) in candidates {
        if cycles.len() == dimension {
            break;
        }
        let mut reduced = bits.clone();
        for row in &basis {
            let pivot = leading_bit(row).expect("basis rows are nonzero");
            if reduced[pivot / 64] >> (pivot % 64) & 1 == 1 {
                for (r, b) in reduced.iter_mut().zip(row) {
                    *r ^= b;
                }
            }
        }
        if reduced.iter().all(|&w| w == 0) {
            continue;
        }
        basis.push(reduced);
        let mut nodes: Vec<usize> = (0..m)
            .filter(|&e| bits[e / 64] >> (e % 64) & 1 == 1)
            .flat_map(|e| [edges[e].0, edges[e].1])
            .collect();
        nodes.sort_unstable();
        nodes.dedup();
        cycles.push(nodes);
    }
    cycles
}

/// Dijkstra from `root`; returns each node's parent edge id, or
/// `usize::MAX` for the root and unreachable nodes.
fn shortest_path_tree(
    root: usize,
    adjacency: &[Vec<(usize, usize)>],
    selected: &EdgeSubgraph,
    num_nodes: usize,
) -> Vec<usize> {
    let mut dist = vec![f64::INFINITY; num_nodes];
    let mut parent_edge = vec![usize::MAX; num_nodes];
    let mut done = vec![false; num_nodes];
    dist[root] = 0.0;
    loop {
        let mut next = None;
        for v in 0..num_nodes {
            if !done[v] && dist[v].is_finite() {
                match next {
                    Some(u) if dist[v] >= dist[u] => {}
                    _ => next = Some(v),
                }
            }
        }
        let Some(u) = next else { break };
        done[u] = true;
        for &(v, edge) in &adjacency[u] {
            let d = dist[u] + selected.edge_weight(edge);
            if d < dist[v] {
                dist[v] = d;
                parent_edge[v] = edge;
            }
        }
    }
    parent_edge
}

/// XORs the tree-path edges from `node` up to `root` into `bits`.
fn xor_path(
    bits: &mut [u64],
    mut node: usize,
    root: usize,
    parent_edge: &[usize],
    edges: &[(usize, usize)],
) {
    while node != root {
        let e = parent_edge[node];
        if e == usize::MAX {
            // Unreachable from root; candidate degenerates to empty.
            return;
        }
        bits[e / 64] ^= 1 << (e % 64);
        let (u, v) = edges[e];
        node = if u == node { v } else { u };
    }
}

fn leading_bit(bits: &[u64]) -> Option<usize> {
    bits.iter()
        .enumerate()
        .find(|(_, &w)| w != 0)
        .map(|(word, &w)| word * 64 + w.trailing_zeros() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn test_two_components_are_subtours() {
        let g = Graph::from_fn(6, |_, _| 1.0).expect("valid");
        let sub = g.edge_subgraph(&[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]);
        let subtours = find_subtours(&sub);
        assert_eq!(subtours, vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn test_figure_eight_splits_into_triangles() {
        // Two triangles sharing node 0: one component, node 0 has degree 4.
        let g = Graph::from_fn(5, |_, _| 1.0).expect("valid");
        let sub = g.edge_subgraph(&[(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 0)]);
        let mut subtours = find_subtours(&sub);
        subtours.sort();
        assert_eq!(subtours, vec![vec![0, 1, 2], vec![0, 3, 4]]);
    }

    #[test]
    fn test_single_cycle_has_trivial_basis() {
        let g = Graph::from_fn(4, |_, _| 1.0).expect("valid");
        let sub = g.edge_subgraph(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let subtours = find_subtours(&sub);
        assert_eq!(subtours, vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_theta_graph_picks_light_cycles() {
        // Square 0-1-2-3 with a cheap chord 0-2: the basis is the two
        // small cycles, not the outer square.
        let g = Graph::from_fn(4, |i, j| if i + j == 2 { 0.1 } else { 1.0 }).expect("valid");
        let sub = g.edge_subgraph(&[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
        let mut basis = minimum_cycle_basis(&sub);
        basis.sort();
        assert_eq!(basis, vec![vec![0, 1, 2], vec![0, 2, 3]]);
    }

    #[test]
    fn test_tree_has_empty_basis() {
        let g = Graph::from_fn(4, |_, _| 1.0).expect("valid");
        let sub = g.edge_subgraph(&[(0, 1), (1, 2), (1, 3)]);
        assert!(minimum_cycle_basis(&sub).is_empty());
    }
}
