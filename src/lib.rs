//! An interactive solver for a sphere-constrained minimisation problem.
//!
//! The crate is split into a generic calculation loop and one concrete
//! calculation. [`Runner`] drives any [`Calculation`] through initialise,
//! iterate and finalise phases, watching progress through attached
//! [`Observer`]s. [`GradientProjection`] is the built-in calculation: it
//! minimises an [`Objective`] over a spherical region by taking a unit
//! gradient step and projecting the result onto the boundary of the
//! [`Sphere`] every iteration.
//!
//! The [`Session`] type holds the console boundary used by the binary: it
//! reads starting points and accuracies from a line-oriented reader and
//! reports solutions back.

mod calculation;
mod constraint;
mod objective;

pub mod prelude;
mod problem;
mod result;
mod runner;
mod session;
mod solver;
mod state;
mod trajectory;
mod watchers;
mod writer;

pub use calculation::Calculation;
pub use constraint::{SingularProjection, Sphere, SphereError};
pub use objective::{Objective, Quadratic};
pub use problem::{ConstrainedObjective, Problem};
pub use result::Solution;
pub use runner::{Builder, GenerateBuilder, Runner};
pub use session::{InputError, Session, SolverRequest};
pub use solver::{GradientProjection, SearchState, SolverError};
pub use state::{Cause, ErrorEstimate, State, Status, UserState};
pub use trajectory::{Iterate, Trajectory};
pub use watchers::{Frequency, Observation, Observer, Stage, Tracer};
pub use writer::TraceWriter;

pub use web_time::Duration;

/// Floats usable in the calculation loop must be printable and serialisable.
pub trait SolverFloat: std::fmt::Display + serde::Serialize {}

impl SolverFloat for f32 {}
impl SolverFloat for f64 {}
