//! Generic 0/1 integer-program interface.
//!
//! The cutting-plane solver talks to an integer-program backend only
//! through [`IpSolver`]: it hands over an [`IpModel`] (binary variables, a
//! linear objective, a growing constraint set) and a time budget, and gets
//! back an assignment or a timeout/infeasible status. Backends are
//! selected by name through [`backend`], which also owns the mapping of
//! the time budget onto whatever knob the backend exposes.

mod branch_bound;

pub use branch_bound::MinilpSolver;

use std::time::Duration;

use crate::error::{Error, Result};

/// Handle to a model variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Var(pub(crate) usize);

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    Eq,
    Le,
    Ge,
}

/// A linear constraint `Σ coeff · var  op  rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub terms: Vec<(Var, f64)>,
    pub op: ConstraintOp,
    pub rhs: f64,
}

/// A 0/1 integer program: binary variables, a minimization objective, and
/// an append-only constraint list.
///
/// The model is a plain value; every [`IpSolver::solve`] call rehydrates
/// it into a fresh backend session, so constraints appended between calls
/// (cutting planes) are picked up without any warm-start protocol.
#[derive(Debug, Clone, Default)]
pub struct IpModel {
    objective: Vec<f64>,
    constraints: Vec<Constraint>,
}

impl IpModel {
    /// Creates an empty minimization model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binary variable with the given objective coefficient.
    pub fn add_binary(&mut self, obj_coeff: f64) -> Var {
        self.objective.push(obj_coeff);
        Var(self.objective.len() - 1)
    }

    /// Appends a constraint. Constraints are never removed.
    pub fn add_constraint(&mut self, terms: Vec<(Var, f64)>, op: ConstraintOp, rhs: f64) {
        self.constraints.push(Constraint { terms, op, rhs });
    }

    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

/// Outcome of one backend invocation.
#[derive(Debug, Clone)]
pub enum IpOutcome {
    /// Search completed; the assignment is optimal for the current model.
    Optimal(Vec<f64>),
    /// The time budget expired mid-search; the best feasible assignment
    /// found so far, if any.
    TimedOut(Option<Vec<f64>>),
    /// No feasible assignment exists.
    Infeasible,
}

/// An integer-program backend.
pub trait IpSolver: std::fmt::Debug {
    /// Solves `model` within `time_limit`, checked at backend-specific
    /// granularity (never preemptive).
    fn solve(&mut self, model: &IpModel, time_limit: Duration) -> Result<IpOutcome>;
}

/// Instantiates the backend registered under `name`.
///
/// Fails with [`Error::UnsupportedSolver`] before any solving work when
/// the name is not recognized.
///
/// # Examples
///
/// ```
/// use tsp_solve::mip::backend;
///
/// assert!(backend("minilp").is_ok());
/// assert!(backend("cplex").is_err());
/// ```
pub fn backend(name: &str) -> Result<Box<dyn IpSolver>> {
    match name.to_ascii_lowercase().as_str() {
        "minilp" => Ok(Box::new(MinilpSolver::new())),
        _ => Err(Error::UnsupportedSolver(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_builder() {
        let mut model = IpModel::new();
        let x = model.add_binary(1.0);
        let y = model.add_binary(2.0);
        model.add_constraint(vec![(x, 1.0), (y, 1.0)], ConstraintOp::Eq, 1.0);
        assert_eq!(model.num_vars(), 2);
        assert_eq!(model.num_constraints(), 1);
    }

    #[test]
    fn test_backend_factory() {
        assert!(backend("minilp").is_ok());
        assert!(backend("MiniLP").is_ok());
        let err = backend("gurobi").unwrap_err();
        assert!(matches!(err, Error::UnsupportedSolver(_)));
    }
}
