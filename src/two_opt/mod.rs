//! Nearest-neighbor construction followed by exhaustive 2-opt improvement.
//!
//! # Algorithm
//!
//! Construction: run the greedy nearest-neighbor heuristic once from every
//! start node and keep the cheapest of the n tours. Improvement: scan all
//! position pairs `(i, j)` with `i < j`, build the candidate tour that
//! reverses the segment `[i..=j]`, and after the whole pass adopt the
//! single best candidate if it beats the incumbent; repeat until a pass
//! yields no improvement (best-improvement strategy).
//!
//! # Complexity
//!
//! O(n²) candidate moves per pass with an O(n) cost evaluation each, so
//! O(n³) per pass; passes repeat until convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use std::time::{Duration, Instant};

use log::{info, warn};

use crate::graph::Graph;
use crate::tour::{tour_length, Solution};

/// Solves the instance with nearest-neighbor seeding and 2-opt local
/// search.
///
/// `time_limit` bounds the improvement phase; it is checked between
/// passes, never mid-pass. The final tour never costs more than the
/// nearest-neighbor seed.
///
/// # Examples
///
/// ```
/// use tsp_solve::graph::Graph;
/// use tsp_solve::two_opt::two_opt;
///
/// let g = Graph::from_fn(4, |i, j| {
///     if (i + 2) % 4 == j { 2f64.sqrt() } else { 1.0 }
/// }).expect("valid instance");
/// let sol = two_opt(&g, None);
/// assert!((sol.path_length - 4.0).abs() < 1e-10);
/// ```
pub fn two_opt(graph: &Graph, time_limit: Option<Duration>) -> Solution {
    let start = Instant::now();

    info!("choosing best initial path");
    let (mut best_path, mut best_len) = nearest_neighbor_tour(graph);

    info!("swapping edges");
    let n = best_path.len();
    loop {
        if let Some(limit) = time_limit {
            if start.elapsed() >= limit {
                info!("time budget reached, stopping search");
                break;
            }
        }

        // One full pass: evaluate every segment reversal, remember the
        // single best candidate.
        let mut pass_best_len = best_len;
        let mut pass_best: Option<Vec<usize>> = None;
        let mut degenerate = false;
        'pass: for i in 0..n.saturating_sub(1) {
            for j in (i + 1)..n {
                let mut candidate = best_path.clone();
                candidate[i..=j].reverse();
                let len = tour_length(graph, &candidate);
                if !len.is_finite() {
                    // Numerical degeneracy: stop at the loop boundary and
                    // keep the best tour found so far, never propagate.
                    degenerate = true;
                    break 'pass;
                }
                if len < pass_best_len {
                    pass_best_len = len;
                    pass_best = Some(candidate);
                }
            }
        }

        if degenerate {
            warn!("degenerate candidate cost, terminating search");
            break;
        }

        match pass_best {
            Some(path) => {
                best_path = path;
                best_len = pass_best_len;
            }
            // Local optimum: no candidate improved in a whole pass.
            None => break,
        }
    }

    Solution {
        path: best_path,
        path_length: best_len,
        elapsed_time: start.elapsed().as_secs_f64(),
    }
}

/// Builds one greedy tour per start node and returns the cheapest,
/// together with its cyclic length.
fn nearest_neighbor_tour(graph: &Graph) -> (Vec<usize>, f64) {
    let n = graph.num_nodes();
    let mut best: Option<(Vec<usize>, f64)> = None;
    for start in 0..n {
        let mut visited = vec![false; n];
        let mut path = Vec::with_capacity(n);
        let mut current = start;
        visited[start] = true;
        path.push(start);
        while path.len() < n {
            let mut next = None;
            for v in 0..n {
                if visited[v] {
                    continue;
                }
                match next {
                    Some(u) if graph.weight(current, v) >= graph.weight(current, u) => {}
                    _ => next = Some(v),
                }
            }
            match next {
                Some(v) => {
                    visited[v] = true;
                    path.push(v);
                    current = v;
                }
                // No unvisited neighbor left; wrap back to the start.
                None => break,
            }
        }
        let len = tour_length(graph, &path);
        match &best {
            Some((_, incumbent)) if *incumbent <= len => {}
            _ => best = Some((path, len)),
        }
    }
    best.unwrap_or((Vec::new(), 0.0))
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

    #[test]
    fn test_square_optimal() {
        let g = unit_square();
        let sol = two_opt(&g, None);
        assert!(is_permutation(&sol.path, 4));
        assert!((sol.path_length - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_never_worse_than_seed() {
        let coords: Vec<(f64, f64)> = (0..8)
            .map(|k| (((k * 37) % 11) as f64, ((k * 53) % 13) as f64))
            .collect();
        let g = Graph::from_fn(8, |i, j| {
            let (xi, yi) = coords[i];
            let (xj, yj) = coords[j];
            ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt()
        })
        .expect("valid");
        let (_, seed_len) = nearest_neighbor_tour(&g);
        let sol = two_opt(&g, None);
        assert!(sol.path_length <= seed_len + 1e-10);
        assert!(is_permutation(&sol.path, 8));
    }

    #[test]
    fn test_idempotent() {
        let g = unit_square();
        let first = two_opt(&g, None);
        // A locally optimal tour admits no further improving pass; the
        // second run converges to the same length immediately.
        let second = two_opt(&g, None);
        assert!((first.path_length - second.path_length).abs() < 1e-10);
    }

    #[test]
    fn test_two_nodes() {
        let g = Graph::from_weights(2, vec![0.0, 5.0, 5.0, 0.0]).expect("valid");
        let sol = two_opt(&g, None);
        assert!(is_permutation(&sol.path, 2));
        assert!((sol.path_length - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_time_budget_returns_seed() {
        let g = unit_square();
        let sol = two_opt(&g, Some(Duration::ZERO));
        let (_, seed_len) = nearest_neighbor_tour(&g);
        assert!((sol.path_length - seed_len).abs() < 1e-10);
    }

    #[test]
    fn test_reported_length_matches_path() {
        let g = unit_square();
        let sol = two_opt(&g, None);
        assert!((tour_length(&g, &sol.path) - sol.path_length).abs() < 1e-10);
    }

    proptest::proptest! {
        #[test]
        fn prop_random_metric_instances(
            coords in proptest::collection::vec((0.0..100.0f64, 0.0..100.0f64), 3..8)
        ) {
            let n = coords.len();
            let g = Graph::from_fn(n, |i, j| {
                let (xi, yi) = coords[i];
                let (xj, yj) = coords[j];
                ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt()
            })
            .expect("valid");
            let sol = two_opt(&g, None);
            proptest::prop_assert!(is_permutation(&sol.path, n));
            proptest::prop_assert!(
                (tour_length(&g, &sol.path) - sol.path_length).abs() < 1e-10
            );
        }
    }
}
