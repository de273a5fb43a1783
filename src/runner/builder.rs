use std::sync::Arc;

use num_traits::float::FloatCore;

use super::Runner;
use crate::watchers::{Frequency, Observable, Observer, ObserverVec};
use crate::{Calculation, Problem, State, UserState};

/// Entry point turning a calculation into a configurable [`Builder`].
pub trait GenerateBuilder<P, S>: Sized
where
    S: UserState,
{
    fn build_for(self, problem: P) -> Builder<Self, P, S>;
}

impl<C, P, S> GenerateBuilder<P, S> for C
where
    C: Calculation<P, S>,
    S: UserState,
    <S as UserState>::Float: FloatCore,
{
    fn build_for(self, problem: P) -> Builder<Self, P, S> {
        Builder {
            calculation: self,
            problem,
            state: State::new(),
            time: true,
            observers: ObserverVec::default(),
        }
    }
}

pub struct Builder<C, P, S>
where
    S: UserState,
{
    calculation: C,
    problem: P,
    state: State<S>,
    time: bool,
    observers: ObserverVec<State<S>>,
}

impl<C, P, S> Builder<C, P, S>
where
    S: UserState,
    <S as UserState>::Float: FloatCore,
{
    #[must_use]
    pub fn time(mut self, time: bool) -> Self {
        self.time = time;
        self
    }

    /// Configure the attached state.
    ///
    /// Apply any runtime configuration option, such as the tolerance or the
    /// iteration cap, to the attached state.
    #[must_use]
    pub fn configure<F: FnOnce(State<S>) -> State<S>>(mut self, configure: F) -> Self {
        let state = configure(self.state);
        self.state = state;
        self
    }

    /// Attach a progress watcher.
    ///
    /// Watchers are held weakly: the caller keeps the [`Arc`] alive for as
    /// long as observations should be delivered.
    #[must_use]
    pub fn with_watcher(
        mut self,
        watcher: Arc<dyn Observer<State<S>>>,
        frequency: Frequency,
    ) -> Self {
        self.observers.attach(watcher, frequency);
        self
    }

    pub fn build(self) -> Runner<C, P, S>
    where
        C: Calculation<P, S>,
    {
        Runner {
            calculation: self.calculation,
            problem: Problem::new(self.problem),
            state: Some(self.state),
            time: self.time,
            observers: self.observers,
        }
    }
}
