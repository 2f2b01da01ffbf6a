//! Christofides 1.5-approximation.
//!
//! # Algorithm
//!
//! 1. Compute a minimum spanning tree T of the instance graph.
//! 2. Take the nodes with odd degree in T (always an even count) and the
//!    subgraph they induce with the original weights.
//! 3. Compute a minimum-weight perfect matching M on that subgraph
//!    (blossom algorithm on negated weights).
//! 4. Union T and M into a multigraph H; every node of H has even degree,
//!    so H has an Eulerian circuit. Should that invariant ever not hold,
//!    H is re-balanced by duplicating cheap edges first.
//! 5. Walk the Eulerian circuit and shortcut: keep each node at its first
//!    visit. The visitation order is the tour.
//!
//! The tour cost is summed from the original graph weights, not from H's
//! duplicated edges.
//!
//! # Guarantee
//!
//! At most 1.5 × the optimal tour cost on metric instances (triangle
//! inequality). For non-metric weights the algorithm still returns a valid
//! tour but carries no bound.
//!
//! # Reference
//!
//! Christofides, N. (1976). "Worst-case analysis of a new heuristic for
//! the travelling salesman problem", Report 388, CMU.

mod euler;
mod matching;
mod mst;

pub use matching::minimum_weight_perfect_matching;
pub use mst::minimum_spanning_tree;

use std::time::Instant;

use log::{debug, info};

use crate::error::Result;
use crate::graph::Graph;
use crate::tour::{tour_length, Solution};

use euler::Multigraph;

/// Solves the instance with the Christofides heuristic.
///
/// # Examples
///
/// ```
/// use tsp_solve::christofides::christofides;
/// use tsp_solve::graph::Graph;
///
/// // Unit square; optimal tour is the perimeter of length 4.
/// let g = Graph::from_fn(4, |i, j| {
///     if (i + 2) % 4 == j { 2f64.sqrt() } else { 1.0 }
/// }).expect("valid instance");
/// let sol = christofides(&g).expect("solvable");
/// assert!(sol.path_length <= 1.5 * 4.0 + 1e-10);
/// ```
pub fn christofides(graph: &Graph) -> Result<Solution> {
    let start = Instant::now();

    info!("computing minimum spanning tree");
    let mst = minimum_spanning_tree(graph)?;

    let mut degree = vec![0usize; graph.num_nodes()];
    for &(u, v) in &mst {
        degree[u] += 1;
        degree[v] += 1;
    }
    let odd: Vec<usize> = graph.nodes().filter(|&v| degree[v] % 2 == 1).collect();
    debug!("{} odd-degree tree nodes", odd.len());

    let mut multigraph = Multigraph::new(graph.num_nodes());
    for &(u, v) in &mst {
        multigraph.add_edge(u, v);
    }

    if !odd.is_empty() {
        info!("matching {} odd-degree nodes", odd.len());
        let induced = graph.induced_subgraph(&odd);
        let matching = minimum_weight_perfect_matching(&induced)?;
        for (a, b) in matching {
            // Map local matching indices back to original node ids.
            multigraph.add_edge(odd[a], odd[b]);
        }
    }

    if !multigraph.odd_nodes().is_empty() {
        // Tree plus matching should already be even everywhere.
        debug!("re-balancing multigraph before the Eulerian walk");
        multigraph.eulerize(graph);
    }

    let circuit = multigraph.eulerian_circuit();

    // Shortcut: keep each node at its first visit.
    let mut visited = vec![false; graph.num_nodes()];
    let mut path = Vec::with_capacity(graph.num_nodes());
    for &node in &circuit {
        if !visited[node] {
            visited[node] = true;
            path.push(node);
        }
    }

    let path_length = tour_length(graph, &path);
    Ok(Solution {
        path,
        path_length,
        elapsed_time: start.elapsed().as_secs_f64(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tour::is_permutation;

    fn unit_square() -> Graph {
        Graph::from_fn(4, |i, j| {
            if (i + 2) % 4 == j {
                2f64.sqrt()
            } else {
                1.0
            }
        })
        .expect("valid")
    }

    fn brute_force_optimum(g: &Graph) -> f64 {
        fn permute(g: &Graph, path: &mut Vec<usize>, rest: &mut Vec<usize>, best: &mut f64) {
            if rest.is_empty() {
                *best = best.min(tour_length(g, path));
                return;
            }
            for i in 0..rest.len() {
                let node = rest.remove(i);
                path.push(node);
                permute(g, path, rest, best);
                path.pop();
                rest.insert(i, node);
            }
        }
        let mut best = f64::INFINITY;
        let mut rest: Vec<usize> = (1..g.num_nodes()).collect();
        permute(g, &mut vec![0], &mut rest, &mut best);
        best
    }

    #[test]
    fn test_square_within_guarantee() {
        let g = unit_square();
        let sol = christofides(&g).expect("solvable");
        assert!(is_permutation(&sol.path, 4));
        assert!(sol.path_length <= 1.5 * brute_force_optimum(&g) + 1e-10);
    }

    #[test]
    fn test_reported_length_matches_path() {
        let g = unit_square();
        let sol = christofides(&g).expect("solvable");
        assert!((tour_length(&g, &sol.path) - sol.path_length).abs() < 1e-10);
    }

    #[test]
    fn test_two_nodes() {
        let g = Graph::from_weights(2, vec![0.0, 3.0, 3.0, 0.0]).expect("valid");
        let sol = christofides(&g).expect("solvable");
        assert!(is_permutation(&sol.path, 2));
        assert!((sol.path_length - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_random_metric_within_guarantee() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);
        let coords: Vec<(f64, f64)> = (0..8)
            .map(|_| (rng.random_range(0.0..10.0), rng.random_range(0.0..10.0)))
            .collect();
        let g = Graph::from_fn(8, |i, j| {
            let (xi, yi) = coords[i];
            let (xj, yj) = coords[j];
            ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt()
        })
        .expect("valid");
        let sol = christofides(&g).expect("solvable");
        assert!(is_permutation(&sol.path, 8));
        assert!(sol.path_length <= 1.5 * brute_force_optimum(&g) + 1e-10);
    }

    #[test]
    fn test_metric_grid_permutation() {
        // 3x3 grid of points with Euclidean distances.
        let coords: Vec<(f64, f64)> = (0..9).map(|k| ((k % 3) as f64, (k / 3) as f64)).collect();
        let g = Graph::from_fn(9, |i, j| {
            let (xi, yi) = coords[i];
            let (xj, yj) = coords[j];
            ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt()
        })
        .expect("valid");
        let sol = christofides(&g).expect("solvable");
        assert!(is_permutation(&sol.path, 9));
        assert!(sol.path_length <= 1.5 * brute_force_optimum(&g) + 1e-10);
    }
}
