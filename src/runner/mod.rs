mod builder;

use num_traits::float::FloatCore;
use tracing::instrument;
use web_time::Instant;

use crate::watchers::{Observable, Observation, ObserverVec, Stage};
use crate::{Calculation, Cause, Problem, State, UserState};

pub use builder::{Builder, GenerateBuilder};

/// General purpose calculation runner
///
/// Drives a [`Calculation`] from its initialised state to termination,
/// keeping the loop bookkeeping in [`State`] and reporting progress to any
/// attached watchers. One runner performs one run; it is consumed by
/// [`Runner::run`].
pub struct Runner<C, P, S>
where
    C: Calculation<P, S>,
    S: UserState,
{
    /// Calculation to be run
    calculation: C,
    /// The problem to solve
    problem: Problem<P>,
    /// Current state of the run
    state: Option<State<S>>,
    /// Should execution be timed
    time: bool,
    observers: ObserverVec<State<S>>,
}

impl<C, P, S> Runner<C, P, S>
where
    C: Calculation<P, S>,
    S: UserState,
    <S as UserState>::Float: FloatCore,
{
    fn observe(&self, state: &State<S>, stage: Stage) {
        self.observers.update(&Observation {
            ident: C::NAME,
            stage,
            iteration: state.current_iteration(),
            state,
        });
    }

    #[instrument(name = "initialising calculation", skip_all)]
    fn initialise(&mut self, mut state: State<S>) -> Result<State<S>, C::Error> {
        let specific = self
            .calculation
            .initialise(&mut self.problem, state.take_specific())?;

        state = state.set_specific(specific).update();
        self.observe(&state, Stage::Initialisation);

        Ok(state)
    }

    #[instrument(name = "performing iteration", skip_all)]
    fn once(
        &mut self,
        mut state: State<S>,
        maybe_start_time: Option<&Instant>,
    ) -> Result<State<S>, C::Error> {
        let specific = self
            .calculation
            .next(&mut self.problem, state.take_specific())?;
        state = state.set_specific(specific);

        if let Some(start_time) = maybe_start_time {
            state.record_time(start_time.elapsed());
        }
        state.increment_iteration();
        state = state.update();

        self.observe(&state, Stage::Iteration);

        Ok(state)
    }

    #[instrument(name = "finalising calculation", skip_all)]
    fn finalise(&mut self, mut state: State<S>, cause: Cause) -> Result<C::Output, C::Error> {
        self.observe(&state, Stage::Finalisation);
        self.calculation
            .finalise(&mut self.problem, state.take_specific(), cause)
    }

    /// Execute the runner
    ///
    /// Runs to termination and hands back the calculation output. Both
    /// convergence and iteration exhaustion are normal completions; the
    /// output records which one occurred. Only calculation errors are
    /// returned as `Err`.
    #[instrument(name = "running calculation", skip_all)]
    pub fn run(mut self) -> Result<C::Output, C::Error> {
        let start_time = self.time.then(Instant::now);

        let mut state = self.state.take().unwrap();

        state = if !state.is_initialised() {
            self.initialise(state)?
        } else {
            state
        };

        loop {
            if state.is_terminated() {
                break;
            }
            state = self.once(state, start_time.as_ref())?;
        }

        let cause = match state.termination_cause() {
            Some(cause) => cause,
            None => unreachable!("the loop can only exit once the state has terminated"),
        };

        self.finalise(state, cause)
    }
}
