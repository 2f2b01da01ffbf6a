//! Minimum spanning tree (Prim).

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Computes a minimum spanning tree with Prim's algorithm, returning its
/// edges as `(tree node, new node)` pairs in insertion order.
///
/// Ties are broken by scan order (lowest candidate node id wins), so the
/// tree is deterministic for a given graph.
///
/// # Complexity
///
/// O(n²) on the dense weight matrix.
pub fn minimum_spanning_tree(graph: &Graph) -> Result<Vec<(usize, usize)>> {
    let n = graph.num_nodes();
    let mut in_tree = vec![false; n];
    // best[v] = (cheapest edge weight into the tree, tree endpoint)
    let mut best = vec![(f64::INFINITY, 0usize); n];
    let mut edges = Vec::with_capacity(n - 1);

    in_tree[0] = true;
    for v in 1..n {
        best[v] = (graph.weight(0, v), 0);
    }

    for _ in 1..n {
        let mut next: Option<usize> = None;
        for v in 0..n {
            if in_tree[v] {
                continue;
            }
            match next {
                Some(u) if best[v].0 >= best[u].0 => {}
                _ => next = Some(v),
            }
        }
        let v = next.ok_or_else(|| Error::invalid_graph("spanning tree: no candidate node"))?;
        if !best[v].0.is_finite() {
            return Err(Error::invalid_graph(
                "spanning tree failed: graph is disconnected",
            ));
        }
        in_tree[v] = true;
        edges.push((best[v].1, v));
        for w in 0..n {
            if !in_tree[w] && graph.weight(v, w) < best[w].0 {
                best[w] = (graph.weight(v, w), v);
            }
        }
    }
    Ok(edges)
}
