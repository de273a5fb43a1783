use crate::{Cause, Problem};

/// An iterative calculation driven by the [`Runner`](crate::Runner).
///
/// A calculation sees the problem at every step but owns none of the loop
/// bookkeeping: iteration counting, convergence testing and termination live
/// in the runner state.
pub trait Calculation<P, S> {
    /// The error associated with the calculation
    type Error: std::error::Error + 'static;
    /// What the calculation hands back once the loop has terminated
    type Output;

    const NAME: &'static str;

    /// Initialisation, seeding the state before the first iteration
    fn initialise(&mut self, problem: &mut Problem<P>, state: S) -> Result<S, Self::Error>;

    /// One iteration of the core algorithm
    fn next(&mut self, problem: &mut Problem<P>, state: S) -> Result<S, Self::Error>;

    /// Convert the terminal state into the calculation output
    fn finalise(
        &mut self,
        problem: &mut Problem<P>,
        state: S,
        cause: Cause,
    ) -> Result<Self::Output, Self::Error>;
}
