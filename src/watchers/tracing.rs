use num_traits::float::FloatCore;
use tracing::{debug, info, trace, Level};

use super::{Observation, Observer, Stage};
use crate::state::{State, UserState};

/// A progress watcher emitting events through the [`tracing`] crate.
///
/// Observations are invisible until the embedding application installs a
/// subscriber; the solver itself never writes to the console.
#[derive(Clone)]
pub struct Tracer {
    level: Level,
}

impl Tracer {
    pub fn new(level: Level) -> Self {
        if matches!(level, Level::ERROR | Level::WARN) {
            panic!("we won't emit non-error messages at ERROR or WARN...");
        }
        Self { level }
    }
}

impl<S> Observer<State<S>> for Tracer
where
    S: UserState,
    <S as UserState>::Float: FloatCore,
{
    fn observe(&self, observation: &Observation<'_, State<S>>) {
        match observation.stage {
            Stage::Initialisation => self.stage_event("starting", observation.ident),
            Stage::Finalisation => self.stage_event("finished", observation.ident),
            Stage::Iteration => self.iteration_event(observation),
        }
    }
}

impl Tracer {
    fn stage_event(&self, what: &str, ident: &str) {
        match self.level {
            Level::INFO => info!("{}: {}", what, ident),
            Level::DEBUG => debug!("{}: {}", what, ident),
            Level::TRACE => trace!("{}: {}", what, ident),
            _ => unreachable!(
                "constructor does not allow warn or error level events for non-error messages"
            ),
        };
    }

    fn iteration_event<S>(&self, observation: &Observation<'_, State<S>>)
    where
        S: UserState,
        <S as UserState>::Float: FloatCore,
    {
        let state = observation.state;
        match self.level {
            Level::INFO => info!(
                iteration = observation.iteration,
                measure = %state.measure(),
                best_measure = %state.best_measure(),
                since_best = state.iterations_since_best(),
            ),
            Level::DEBUG => debug!(
                iteration = observation.iteration,
                measure = %state.measure(),
                best_measure = %state.best_measure(),
                since_best = state.iterations_since_best(),
            ),
            Level::TRACE => trace!(
                iteration = observation.iteration,
                measure = %state.measure(),
                best_measure = %state.best_measure(),
                since_best = state.iterations_since_best(),
            ),
            _ => unreachable!(
                "constructor does not allow warn or error level events for non-error messages"
            ),
        };
    }
}
