//! Crate error taxonomy.

use thiserror::Error as ThisError;

/// Errors surfaced by graph construction, tour utilities, and solvers.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The instance graph cannot be solved: fewer than two nodes,
    /// disconnected, or missing/invalid weights.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// The requested integer-program backend is not recognized.
    #[error("unsupported solver backend {0:?}, choose from: \"minilp\"")]
    UnsupportedSolver(String),

    /// An edge list claimed to form a single cycle does not close:
    /// `node` has no successor in the edge mapping.
    #[error("edge list is not circular: no successor for node {node}")]
    NotCircular {
        /// The node whose successor is missing.
        node: usize,
    },

    /// The integer program has no feasible assignment. With the standard
    /// degree constraints this indicates a malformed model, not a hard
    /// instance.
    #[error("integer program is infeasible")]
    Infeasible,

    /// Internal failure inside an integer-program backend.
    #[error("solver backend failed: {0}")]
    Backend(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_graph(message: impl Into<String>) -> Self {
        Self::InvalidGraph(message.into())
    }
}
