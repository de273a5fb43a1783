pub use crate::Calculation;
pub use crate::Cause;
pub use crate::ConstrainedObjective;
pub use crate::Frequency;
pub use crate::GenerateBuilder;
pub use crate::GradientProjection;
pub use crate::Objective;
pub use crate::Observer;
pub use crate::Quadratic;
pub use crate::Session;
pub use crate::Solution;
pub use crate::SolverError;
pub use crate::SolverRequest;
pub use crate::Sphere;
pub use crate::State;
pub use crate::Status;
pub use crate::TraceWriter;
pub use crate::Tracer;
pub use crate::UserState;
