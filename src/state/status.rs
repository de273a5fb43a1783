//! Module for abstractions about the state of a solver, and reasons why a
//! solver may have terminated.

use serde::{Deserialize, Serialize};

/// The status of the solver
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Status {
    /// A solver can either be [`Status::NotTerminated`]
    NotTerminated,
    /// Or the solver can be terminated for [`Cause`]
    Terminated(Cause),
}

impl Default for Status {
    fn default() -> Self {
        Self::NotTerminated
    }
}

/// Causes for termination of a solver
///
/// Both causes are normal outcomes of a run, not errors: a solver that runs
/// out of iterations still hands back the trajectory it produced.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cause {
    /// The solver has converged to the requested tolerance
    Converged,
    /// The solver has exceeded the maximum allowable iterations
    ExceededMaxIterations,
}
