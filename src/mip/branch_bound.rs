//! Branch-and-bound over `minilp` LP relaxations.
//!
//! # Algorithm
//!
//! Depth-first branch and bound: each node solves the LP relaxation of the
//! model with a subset of variables fixed to 0 or 1. Nodes whose relaxation
//! is infeasible or no better than the incumbent are pruned; fractional
//! solutions branch on the most fractional variable, exploring the rounded
//! value first. The time budget is checked at node boundaries.

use std::time::{Duration, Instant};

use log::debug;
use minilp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};

use crate::error::{Error, Result};

use super::{ConstraintOp, IpModel, IpOutcome, IpSolver};

const INT_TOL: f64 = 1e-6;

/// The bundled pure-Rust backend: `minilp` simplex plus branch and bound.
#[derive(Debug, Default)]
pub struct MinilpSolver {
    _private: (),
}

impl MinilpSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solves the LP relaxation with the given variable fixings.
    /// Returns `None` if the relaxation is infeasible.
    fn relax(&self, model: &IpModel, fixed: &[Option<f64>]) -> Result<Option<(f64, Vec<f64>)>> {
        let mut problem = Problem::new(OptimizationDirection::Minimize);
        let vars: Vec<minilp::Variable> = model
            .objective()
            .iter()
            .enumerate()
            .map(|(idx, &coeff)| {
                let bounds = match fixed[idx] {
                    Some(v) => (v, v),
                    None => (0.0, 1.0),
                };
                problem.add_var(coeff, bounds)
            })
            .collect();
        for constraint in model.constraints() {
            let mut expr = LinearExpr::empty();
            for &(var, coeff) in &constraint.terms {
                expr.add(vars[var.0], coeff);
            }
            let op = match constraint.op {
                ConstraintOp::Eq => ComparisonOp::Eq,
                ConstraintOp::Le => ComparisonOp::Le,
                ConstraintOp::Ge => ComparisonOp::Ge,
            };
            problem.add_constraint(expr, op, constraint.rhs);
        }
        match problem.solve() {
            Ok(solution) => {
                let values = vars.iter().map(|&v| solution[v]).collect();
                Ok(Some((solution.objective(), values)))
            }
            Err(minilp::Error::Infeasible) => Ok(None),
            Err(other) => Err(Error::Backend(other.to_string())),
        }
    }
}

impl IpSolver for MinilpSolver {
    fn solve(&mut self, model: &IpModel, time_limit: Duration) -> Result<IpOutcome> {
        let start = Instant::now();
        let mut incumbent: Option<(f64, Vec<f64>)> = None;
        // Each stack entry is a full fixing vector; the model is small
        // enough that rebuilding the LP per node beats bookkeeping.
        let mut stack = vec![vec![None; model.num_vars()]];
        let mut nodes = 0usize;

        while let Some(fixed) = stack.pop() {
            if start.elapsed() >= time_limit {
                debug!("branch and bound timed out after {nodes} nodes");
                return Ok(IpOutcome::TimedOut(incumbent.map(|(_, values)| values)));
            }
            nodes += 1;

            let (objective, values) = match self.relax(model, &fixed)? {
                Some(relaxation) => relaxation,
                None => continue,
            };
            if let Some((best, _)) = &incumbent {
                if objective >= best - INT_TOL {
                    continue;
                }
            }

            // Branch on the most fractional variable, if any.
            let fractional = values
                .iter()
                .enumerate()
                .filter(|(_, &v)| (v - v.round()).abs() > INT_TOL)
                .max_by(|(_, a), (_, b)| {
                    let da = 0.5 - (**a - 0.5).abs();
                    let db = 0.5 - (**b - 0.5).abs();
                    da.partial_cmp(&db).expect("fractionality is finite")
                })
                .map(|(idx, &v)| (idx, v));

            match fractional {
                None => {
                    let rounded: Vec<f64> = values.iter().map(|v| v.round()).collect();
                    debug!("incumbent {objective} after {nodes} nodes");
                    incumbent = Some((objective, rounded));
                }
                Some((idx, value)) => {
                    let near = value.round();
                    let far = 1.0 - near;
                    // Depth-first pops the last push: explore `near` first.
                    let mut far_fix = fixed.clone();
                    far_fix[idx] = Some(far);
                    stack.push(far_fix);
                    let mut near_fix = fixed;
                    near_fix[idx] = Some(near);
                    stack.push(near_fix);
                }
            }
        }

        Ok(match incumbent {
            Some((_, values)) => IpOutcome::Optimal(values),
            None => IpOutcome::Infeasible,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mip::{backend, ConstraintOp};

    fn solve(model: &IpModel) -> IpOutcome {
        let mut solver = backend("minilp").expect("registered");
        solver
            .solve(model, Duration::from_secs(10))
            .expect("backend ok")
    }

    #[test]
    fn test_picks_cheapest_assignment() {
        // min x + 3y subject to x + y = 1.
        let mut model = IpModel::new();
        let x = model.add_binary(1.0);
        let y = model.add_binary(3.0);
        model.add_constraint(vec![(x, 1.0), (y, 1.0)], ConstraintOp::Eq, 1.0);
        match solve(&model) {
            IpOutcome::Optimal(values) => {
                assert_eq!(values, vec![1.0, 0.0]);
            }
            other => panic!("expected optimal, got {other:?}"),
        }
    }

    #[test]
    fn test_infeasible() {
        // x <= 0 and x >= 1 cannot both hold.
        let mut model = IpModel::new();
        let x = model.add_binary(1.0);
        model.add_constraint(vec![(x, 1.0)], ConstraintOp::Le, 0.0);
        model.add_constraint(vec![(x, 1.0)], ConstraintOp::Ge, 1.0);
        assert!(matches!(solve(&model), IpOutcome::Infeasible));
    }

    #[test]
    fn test_branching_needed() {
        // Odd-cycle packing: the LP relaxation sits at x = y = z = 0.5
        // (objective -1.5), so integrality requires branching; the integer
        // optimum selects exactly one variable.
        let mut model = IpModel::new();
        let x = model.add_binary(-1.0);
        let y = model.add_binary(-1.0);
        let z = model.add_binary(-1.0);
        model.add_constraint(vec![(x, 1.0), (y, 1.0)], ConstraintOp::Le, 1.0);
        model.add_constraint(vec![(y, 1.0), (z, 1.0)], ConstraintOp::Le, 1.0);
        model.add_constraint(vec![(x, 1.0), (z, 1.0)], ConstraintOp::Le, 1.0);
        match solve(&model) {
            IpOutcome::Optimal(values) => {
                let objective: f64 = values
                    .iter()
                    .zip(model.objective())
                    .map(|(v, c)| v * c)
                    .sum();
                assert!((objective - (-1.0)).abs() < 1e-6);
            }
            other => panic!("expected optimal, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_budget_times_out() {
        let mut model = IpModel::new();
        let x = model.add_binary(1.0);
        model.add_constraint(vec![(x, 1.0)], ConstraintOp::Eq, 1.0);
        let mut solver = MinilpSolver::new();
        let outcome = solver.solve(&model, Duration::ZERO).expect("backend ok");
        assert!(matches!(outcome, IpOutcome::TimedOut(None)));
    }
}
