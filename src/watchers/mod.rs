mod tracing;

use std::sync::{Arc, Weak};

pub use self::tracing::Tracer;

/// Point in the run lifecycle at which an observation was taken.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Stage {
    Initialisation,
    Iteration,
    Finalisation,
}

/// A view of the running calculation passed to every watcher.
pub struct Observation<'a, S> {
    /// Name of the calculation being observed
    pub ident: &'static str,
    pub stage: Stage,
    /// Iteration count at the time of observation
    pub iteration: usize,
    pub state: &'a S,
}

pub trait Observer<S> {
    fn observe(&self, observation: &Observation<'_, S>);
}

pub(crate) trait Observable<S> {
    type Observer;
    fn update(&self, observation: &Observation<'_, S>);
    fn attach(&mut self, observer: Self::Observer, frequency: Frequency);
    fn detach(&mut self, observer: Self::Observer);
}

/// Watchers attached to a runner, each with its own reporting cadence.
///
/// Observers are held weakly; ones dropped by their owner are skipped.
pub(crate) struct ObserverVec<S>(Vec<(Weak<dyn Observer<S>>, Frequency)>);

impl<S> Default for ObserverVec<S> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<S> Observable<S> for ObserverVec<S> {
    type Observer = Arc<dyn Observer<S>>;

    fn update(&self, observation: &Observation<'_, S>) {
        self.0
            .iter()
            .filter(|(_, frequency)| frequency.fires(observation.stage, observation.iteration))
            .flat_map(|(observer, _)| observer.upgrade())
            .for_each(|observer| observer.observe(observation));
    }

    fn attach(&mut self, observer: Self::Observer, frequency: Frequency) {
        self.0.push((Arc::downgrade(&observer), frequency));
    }

    fn detach(&mut self, observer: Self::Observer) {
        self.0
            .retain(|(weak, _)| !weak.ptr_eq(&Arc::downgrade(&observer)));
    }
}

/// How often a watcher is handed observations.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Frequency {
    Never,
    Always,
    /// Every n-th iteration, plus the initialisation and finalisation stages
    Every(usize),
    /// Only when the run finishes
    Last,
}

impl Default for Frequency {
    fn default() -> Self {
        Self::Never
    }
}

impl Frequency {
    fn fires(self, stage: Stage, iteration: usize) -> bool {
        match stage {
            Stage::Initialisation => !matches!(self, Self::Never | Self::Last),
            Stage::Finalisation => !matches!(self, Self::Never),
            Stage::Iteration => match self {
                Self::Always => true,
                Self::Every(n) => n <= 1 || iteration % n == 0,
                Self::Never | Self::Last => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Counter(Arc<AtomicUsize>);

    impl Observer<u8> for Counter {
        fn observe(&self, _observation: &Observation<'_, u8>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counter() -> (Arc<Counter>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        (Arc::new(Counter(count.clone())), count)
    }

    fn observe_iterations(observers: &ObserverVec<u8>, iterations: usize) {
        for iteration in 1..=iterations {
            observers.update(&Observation {
                ident: "count",
                stage: Stage::Iteration,
                iteration,
                state: &0,
            });
        }
    }

    #[test]
    fn every_n_fires_on_multiples_only() {
        let (observer, count) = counter();
        let mut observers = ObserverVec::default();
        observers.attach(observer.clone(), Frequency::Every(3));

        observe_iterations(&observers, 10);
        assert_eq!(count.load(Ordering::SeqCst), 3); // iterations 3, 6, 9
    }

    #[test]
    fn last_only_sees_finalisation() {
        let (observer, count) = counter();
        let mut observers = ObserverVec::default();
        observers.attach(observer.clone(), Frequency::Last);

        observers.update(&Observation {
            ident: "count",
            stage: Stage::Initialisation,
            iteration: 0,
            state: &0,
        });
        observe_iterations(&observers, 5);
        observers.update(&Observation {
            ident: "count",
            stage: Stage::Finalisation,
            iteration: 5,
            state: &0,
        });
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropped_observers_are_skipped() {
        let (observer, count) = counter();
        let mut observers = ObserverVec::default();
        observers.attach(observer.clone(), Frequency::Always);

        observe_iterations(&observers, 2);
        drop(observer);
        observe_iterations(&observers, 2);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn detached_observers_stop_receiving() {
        let (observer, count) = counter();
        let mut observers = ObserverVec::default();
        observers.attach(observer.clone(), Frequency::Always);
        observers.detach(observer.clone());

        observe_iterations(&observers, 3);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
