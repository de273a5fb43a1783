mod status;

use num_traits::float::FloatCore;
use web_time::Duration;

use crate::SolverFloat;

pub use status::{Cause, Status};

/// Iterations permitted before a run is cut off, unless overridden through
/// [`State::max_iters`].
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// The calculation-specific part of the solver state.
///
/// All loop bookkeeping is auto-implemented on [`State`], which wraps a type
/// implementing this trait.
pub trait UserState {
    type Float: SolverFloat;
    type Param;

    /// Create a new instance of the calculation-specific state
    fn new() -> Self;

    /// Returns true once the state has been seeded by the calculation
    fn is_initialised(&self) -> bool {
        true
    }

    /// Report the convergence measure after the latest step
    fn update(&mut self) -> ErrorEstimate<Self::Float>;

    /// Returns the current parameter value, if one is assigned
    fn get_param(&self) -> Option<&Self::Param>;
}

/// Wrapping for convergence estimates produced by the specific state.
#[repr(transparent)]
pub struct ErrorEstimate<F>(pub F);

/// The full state of a running calculation.
///
/// This contains generic fields common to all calculations, as well as a
/// calculation-specific state `S`.
pub struct State<S: UserState> {
    /// The specific component of the state implements the application specific code
    specific: Option<S>,
    /// The current iteration number
    iter: usize,
    /// The last iteration number where the smallest convergence measure was found
    last_best_iter: usize,
    /// The maximum number of permitted iterations
    max_iter: usize,
    /// The time since the calculation started
    time: Option<Duration>,
    /// The termination status of the calculation
    termination_status: Status,
    /// The convergence measure observed after the latest iteration
    error: S::Float,
    /// The best convergence measure observed during the entire run
    best_error: S::Float,
    /// Measures at or below this value terminate the run
    tolerance: S::Float,
}

impl<S> State<S>
where
    S: UserState,
    <S as UserState>::Float: FloatCore,
{
    /// Create a new instance of the iteration state
    pub(crate) fn new() -> Self {
        Self {
            specific: Some(S::new()),
            iter: 0,
            last_best_iter: 0,
            max_iter: DEFAULT_MAX_ITERATIONS,
            time: None,
            termination_status: Status::NotTerminated,
            error: <<S as UserState>::Float as FloatCore>::infinity(),
            best_error: <<S as UserState>::Float as FloatCore>::infinity(),
            tolerance: <<S as UserState>::Float as FloatCore>::epsilon(),
        }
    }

    /// Record the time since the calculation began
    pub(crate) fn record_time(&mut self, duration: Duration) {
        self.time = Some(duration);
    }

    pub fn duration(&self) -> Option<&Duration> {
        self.time.as_ref()
    }

    /// Increment the iteration count
    pub(crate) fn increment_iteration(&mut self) {
        self.iter += 1;
    }

    /// Returns the current iteration number
    pub fn current_iteration(&self) -> usize {
        self.iter
    }

    /// Returns the number of iterations since the best measure was observed
    pub fn iterations_since_best(&self) -> usize {
        self.iter - self.last_best_iter
    }

    /// Returns true if the state has been seeded by its calculation
    pub(crate) fn is_initialised(&self) -> bool {
        self.specific
            .as_ref()
            .map_or(false, |state| state.is_initialised())
    }

    /// Returns true if the termination status is [`Status::Terminated`]
    pub fn is_terminated(&self) -> bool {
        self.termination_status != Status::NotTerminated
    }

    /// Terminates the calculation for [`Cause`]
    pub(crate) fn terminate_due_to(mut self, reason: Cause) -> Self {
        self.termination_status = Status::Terminated(reason);
        self
    }

    /// Returns Some if the calculation is terminated, else returns None
    pub fn termination_cause(&self) -> Option<Cause> {
        match self.termination_status {
            Status::NotTerminated => None,
            Status::Terminated(cause) => Some(cause),
        }
    }

    /// Refresh the convergence measure and test for termination.
    ///
    /// Convergence is tested before iteration exhaustion, so a run whose
    /// final permitted iteration also meets the tolerance reports
    /// [`Cause::Converged`]. The tolerance comparison is inclusive: a
    /// measure exactly equal to the tolerance converges, which makes a zero
    /// tolerance reachable when successive values are identical.
    #[must_use]
    pub(crate) fn update(mut self) -> Self {
        let mut specific = self.specific.take().unwrap();
        let ErrorEstimate(error) = specific.update();
        self.specific = Some(specific);

        self.error = error;
        if self.error < self.best_error {
            self.best_error = self.error;
            self.last_best_iter = self.iter;
        }

        if self.error <= self.tolerance {
            return self.terminate_due_to(Cause::Converged);
        }
        if self.iter >= self.max_iter {
            return self.terminate_due_to(Cause::ExceededMaxIterations);
        }

        self
    }

    /// Returns the parameter vector from the inner state variable
    pub fn get_param(&self) -> Option<&S::Param> {
        self.specific
            .as_ref()
            .and_then(|specific| specific.get_param())
    }

    /// Returns the current measure of progress
    pub fn measure(&self) -> S::Float {
        self.error
    }

    /// Returns the best measure of progress
    pub fn best_measure(&self) -> S::Float {
        self.best_error
    }

    /// Removes the specific state from the state and returns it
    pub fn take_specific(&mut self) -> S {
        self.specific.take().unwrap()
    }

    #[must_use]
    /// Set the termination tolerance
    pub fn tolerance(mut self, tolerance: S::Float) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    /// Set the maximum allowable iteration count
    pub fn max_iters(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    #[must_use]
    /// Set the internal state object
    pub fn set_specific(mut self, specific: S) -> Self {
        self.specific = Some(specific);
        self
    }
}
