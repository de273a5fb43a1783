//! The gradient-projection calculation.

use num_traits::Float;

use crate::{
    Calculation, Cause, ConstrainedObjective, ErrorEstimate, Iterate, Objective, Problem,
    SingularProjection, Solution, SolverFloat, Trajectory, UserState,
};

const METHOD: &str = "Gradient Projection method";

/// Errors raised while iterating.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// The descent step landed exactly on the sphere centre. The run is
    /// abandoned; other requests against the same problem are unaffected.
    #[error(transparent)]
    SingularProjection(#[from] SingularProjection),
}

/// Minimises an objective over a spherical region by steepest descent with
/// boundary projection.
///
/// Each iteration takes a unit-length step against the gradient and then
/// projects the stepped point onto the sphere boundary. The projection is
/// applied every iteration, whether or not the stepped point left the
/// feasible region, so all iterates after the starting point sit on the
/// boundary. The method is undamped and carries no line search; for loose
/// tolerances it can circle the boundary until the iteration cap stops it.
pub struct GradientProjection<F> {
    start: (F, F),
}

impl<F> GradientProjection<F> {
    pub const NAME: &'static str = METHOD;

    /// A solver for one run from the given starting point.
    pub fn new(x1: F, x2: F) -> Self {
        Self { start: (x1, x2) }
    }
}

/// State specific to a gradient-projection run: the trajectory so far and
/// the objective value at the point before the latest one.
#[derive(Debug)]
pub struct SearchState<F> {
    trajectory: Trajectory<F>,
    prev_value: F,
}

impl<F: Copy> SearchState<F> {
    fn current(&self) -> Iterate<F> {
        *self
            .trajectory
            .last()
            .expect("the state is seeded before iteration")
    }

    pub fn trajectory(&self) -> &Trajectory<F> {
        &self.trajectory
    }

    fn seed(&mut self, iterate: Iterate<F>) {
        self.trajectory.push(iterate);
    }

    /// Accept a new iterate, rolling the convergence reference forward to
    /// the value of the point it was stepped from.
    fn advance(&mut self, iterate: Iterate<F>) {
        self.prev_value = self.current().value();
        self.trajectory.push(iterate);
    }

    fn into_trajectory(self) -> Trajectory<F> {
        self.trajectory
    }
}

impl<F> UserState for SearchState<F>
where
    F: SolverFloat + Float,
{
    type Float = F;
    type Param = Iterate<F>;

    fn new() -> Self {
        Self {
            trajectory: Trajectory::new(),
            // The first convergence test compares the seed value against
            // zero, so a starting point with |f| within tolerance converges
            // without iterating.
            prev_value: F::zero(),
        }
    }

    fn is_initialised(&self) -> bool {
        !self.trajectory.is_empty()
    }

    fn update(&mut self) -> ErrorEstimate<F> {
        ErrorEstimate((self.current().value() - self.prev_value).abs())
    }

    fn get_param(&self) -> Option<&Iterate<F>> {
        self.trajectory.last()
    }
}

impl<O, F> Calculation<ConstrainedObjective<O, F>, SearchState<F>> for GradientProjection<F>
where
    O: Objective<F>,
    F: SolverFloat + Float,
{
    type Error = SolverError;
    type Output = Solution<F>;

    const NAME: &'static str = METHOD;

    fn initialise(
        &mut self,
        problem: &mut Problem<ConstrainedObjective<O, F>>,
        mut state: SearchState<F>,
    ) -> Result<SearchState<F>, Self::Error> {
        let (x1, x2) = self.start;
        state.seed(Iterate::evaluated(problem.inner().objective(), x1, x2));
        Ok(state)
    }

    fn next(
        &mut self,
        problem: &mut Problem<ConstrainedObjective<O, F>>,
        mut state: SearchState<F>,
    ) -> Result<SearchState<F>, Self::Error> {
        let current = state.current();
        let inner = problem.inner();

        let (g1, g2) = inner.objective().gradient(current.x1(), current.x2());
        let z1 = current.x1() - g1;
        let z2 = current.x2() - g2;

        let (x1, x2) = inner.sphere().project(z1, z2)?;
        state.advance(Iterate::evaluated(inner.objective(), x1, x2));
        Ok(state)
    }

    fn finalise(
        &mut self,
        _problem: &mut Problem<ConstrainedObjective<O, F>>,
        state: SearchState<F>,
        cause: Cause,
    ) -> Result<Self::Output, Self::Error> {
        Ok(Solution::new(state.into_trajectory(), cause))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quadratic, Sphere};

    fn problem() -> Problem<ConstrainedObjective<Quadratic, f64>> {
        let sphere = Sphere::new(5.0, 2.0, 2.0).unwrap();
        Problem::new(ConstrainedObjective::new(Quadratic, sphere))
    }

    #[test]
    fn initialise_seeds_the_trajectory_with_the_start() {
        let mut solver = GradientProjection::new(6.0, 0.0);
        let state = solver
            .initialise(&mut problem(), SearchState::new())
            .unwrap();
        assert_eq!(state.trajectory().len(), 1);
        let seed = state.trajectory().first().unwrap();
        assert_eq!((seed.x1(), seed.x2(), seed.value()), (6.0, 0.0, 36.0));
    }

    #[test]
    fn next_steps_against_the_gradient_and_projects() {
        let mut solver = GradientProjection::new(6.0, 0.0);
        let mut problem = problem();
        let state = solver.initialise(&mut problem, SearchState::new()).unwrap();
        let state = solver.next(&mut problem, state).unwrap();

        // z = (6 - 12, 0 + 1) = (-6, 1); d = sqrt(121 + 1)
        let d = 122.0f64.sqrt();
        let accepted = state.current();
        assert_eq!(accepted.x1(), 5.0 - 11.0 / d * 2.0);
        assert_eq!(accepted.x2(), 2.0 - 1.0 / d * 2.0);
        assert_eq!(
            accepted.value(),
            accepted.x1().powi(2) - accepted.x2(),
        );
    }

    #[test]
    fn advance_keeps_the_previous_value_for_convergence() {
        let mut solver = GradientProjection::new(6.0, 0.0);
        let mut problem = problem();
        let mut state = solver.initialise(&mut problem, SearchState::new()).unwrap();

        // Seed comparison is against zero.
        let ErrorEstimate(initial) = state.update();
        assert_eq!(initial, 36.0);

        state = solver.next(&mut problem, state).unwrap();
        let before_latest = state.trajectory().points()[0].value();
        let latest = state.current().value();
        let ErrorEstimate(estimate) = state.update();
        assert_eq!(estimate, (latest - before_latest).abs());
    }

    #[test]
    fn stepping_onto_the_centre_is_an_error() {
        // From (-5, 1) the descent step lands exactly on the centre (5, 2).
        let mut solver = GradientProjection::new(-5.0, 1.0);
        let mut problem = problem();
        let state = solver.initialise(&mut problem, SearchState::new()).unwrap();
        let err = solver.next(&mut problem, state).unwrap_err();
        assert!(matches!(err, SolverError::SingularProjection(_)));
    }
}
