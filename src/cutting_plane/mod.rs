//! Exact solver via Dantzig-Fulkerson-Johnson subtour elimination.
//!
//! # Algorithm
//!
//! The tour is modeled as a 0/1 integer program over directed edge
//! variables `x[i][j]` with unit in-degree and out-degree at every node.
//! Degree constraints alone admit unions of disjoint cycles, so the model
//! starts without subtour elimination and grows: after each solve the
//! selected edges are checked, and every subtour found contributes a cut
//! `Σ x[i][j] ≤ |S| − 1` over its node set before the next solve. The loop
//! ends when the selection is a single Hamiltonian cycle.
//!
//! Cuts are append-only; the model is re-solved from scratch each round.
//!
//! # Reference
//!
//! Dantzig, G., Fulkerson, R., Johnson, S. (1954). "Solution of a
//! large-scale traveling-salesman problem", *Operations Research* 2(4),
//! 393-410.

mod subtours;

pub use subtours::{find_subtours, minimum_cycle_basis};

use std::time::{Duration, Instant};

use log::{info, warn};

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::mip::{backend, ConstraintOp, IpModel, IpOutcome, Var};
use crate::tour::{edge_list_to_tour, tour_length, Solution};

/// Configuration of the cutting-plane solver.
#[derive(Debug, Clone)]
pub struct DfjOptions {
    /// Integer-program backend name, resolved through
    /// [`crate::mip::backend`].
    pub backend: String,
    /// Budget for a single solve round.
    pub round_time_limit: Duration,
    /// Budget for the whole cut loop, checked between rounds.
    pub total_time_limit: Duration,
}

impl Default for DfjOptions {
    fn default() -> Self {
        Self {
            backend: "minilp".to_string(),
            round_time_limit: Duration::from_secs(60),
            total_time_limit: Duration::from_secs(600),
        }
    }
}

/// Outcome of a cutting-plane run.
#[derive(Debug, Clone)]
pub struct DfjResult {
    /// Directed edges selected in the last usable assignment.
    pub edges: Vec<(usize, usize)>,
    /// The tour, present only if the selection closed into a single
    /// Hamiltonian cycle.
    pub solution: Option<Solution>,
    /// `true` if the loop terminated with a proven-optimal tour; `false`
    /// on any timeout.
    pub converged: bool,
}

/// Solves the instance to optimality with iterative subtour elimination.
///
/// Returns [`Error::UnsupportedSolver`] before any solving work if the
/// configured backend is unknown, and [`Error::Infeasible`] if the
/// degree-constrained model has no assignment (impossible on a valid
/// complete instance, reachable with `INFINITY` edges).
///
/// On timeout the result carries whatever the last usable assignment was,
/// with `converged == false`; a tour found from a timed-out backend call
/// is reported but not claimed optimal.
pub fn dfj(graph: &Graph, options: &DfjOptions) -> Result<DfjResult> {
    let mut solver = backend(&options.backend)?;
    let start = Instant::now();
    let n = graph.num_nodes();

    // Directed edge variables; absent edges never enter the model.
    let mut model = IpModel::new();
    let mut vars = vec![vec![None; n]; n];
    for i in 0..n {
        for j in 0..n {
            if i != j && graph.weight(i, j).is_finite() {
                vars[i][j] = Some(model.add_binary(graph.weight(i, j)));
            }
        }
    }
    for i in 0..n {
        let out: Vec<(Var, f64)> = (0..n).filter_map(|j| vars[i][j]).map(|v| (v, 1.0)).collect();
        model.add_constraint(out, ConstraintOp::Eq, 1.0);
        let inc: Vec<(Var, f64)> = (0..n).filter_map(|j| vars[j][i]).map(|v| (v, 1.0)).collect();
        model.add_constraint(inc, ConstraintOp::Eq, 1.0);
    }
    // Reverse map from variable index to its directed edge.
    let arcs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .filter(|&(i, j)| vars[i][j].is_some())
        .collect();

    let mut edges: Vec<(usize, usize)> = Vec::new();
    let mut round = 0usize;
    loop {
        round += 1;
        let remaining = options.total_time_limit.saturating_sub(start.elapsed());
        if remaining.is_zero() {
            info!("total time budget reached after {} rounds", round - 1);
            return Ok(DfjResult {
                edges,
                solution: None,
                converged: false,
            });
        }
        let budget = options.round_time_limit.min(remaining);

        info!(
            "round {round}: solving with {} constraints",
            model.num_constraints()
        );
        let (values, proven) = match solver.solve(&model, budget)? {
            IpOutcome::Optimal(values) => (values, true),
            IpOutcome::TimedOut(Some(values)) => (values, false),
            IpOutcome::TimedOut(None) => {
                warn!("round {round} timed out without a feasible assignment");
                return Ok(DfjResult {
                    edges,
                    solution: None,
                    converged: false,
                });
            }
            IpOutcome::Infeasible => return Err(Error::Infeasible),
        };
        edges = arcs
            .iter()
            .zip(&values)
            .filter(|(_, &v)| v > 0.5)
            .map(|(&arc, _)| arc)
            .collect();

        let selected = graph.edge_subgraph(&edges);
        // Two nodes make one undirected edge out of both directed arcs,
        // which a degree-2 check cannot see; the degree constraints alone
        // already force the only tour.
        let is_tour = if n == 2 {
            selected.edges().len() == 1
        } else {
            selected.is_hamiltonian_cycle()
        };
        if is_tour {
            let path = edge_list_to_tour(&edges)?;
            let solution = Solution {
                path_length: tour_length(graph, &path),
                path,
                elapsed_time: start.elapsed().as_secs_f64(),
            };
            info!(
                "tour of length {} after {round} rounds{}",
                solution.path_length,
                if proven { "" } else { " (not proven optimal)" }
            );
            return Ok(DfjResult {
                edges,
                solution: Some(solution),
                converged: proven,
            });
        }

        let subtours = find_subtours(&selected);
        let mut added = 0usize;
        for subtour in &subtours {
            // Cuts over the full node set or a single node are vacuous.
            if subtour.len() < 2 || subtour.len() > n - 1 {
                continue;
            }
            let terms: Vec<(Var, f64)> = subtour
                .iter()
                .flat_map(|&i| subtour.iter().map(move |&j| (i, j)))
                .filter_map(|(i, j)| vars[i][j])
                .map(|v| (v, 1.0))
                .collect();
            model.add_constraint(terms, ConstraintOp::Le, (subtour.len() - 1) as f64);
            added += 1;
        }
        info!(
            "round {round}: {} subtours, {added} cuts added",
            subtours.len()
        );
        if added == 0 {
            // No separating cut exists for this selection; without one the
            // next round would repeat it verbatim.
            warn!("no cut separates the current selection, stopping");
            return Ok(DfjResult {
                edges,
                solution: None,
                converged: false,
            });
        }
    }
}
