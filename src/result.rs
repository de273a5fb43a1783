//! This module defines the output type of a finished calculation.

use serde::Serialize;

use crate::{Cause, Iterate, SolverFloat, Trajectory};

/// The product of one solver run
///
/// Carries the label derived from the starting point, the reason the loop
/// stopped and the complete trajectory. The trajectory always holds at
/// least the starting point, so the final iterate is always available.
/// Solutions are not mutated after the run that produced them.
#[derive(Clone, Debug, Serialize)]
pub struct Solution<F> {
    label: String,
    cause: Cause,
    trajectory: Trajectory<F>,
}

impl<F> Solution<F>
where
    F: SolverFloat + Copy,
{
    pub(crate) fn new(trajectory: Trajectory<F>, cause: Cause) -> Self {
        let start = trajectory
            .first()
            .expect("a trajectory is seeded with its starting point");
        let label = format!("({},{})", start.x1(), start.x2());
        Self {
            label,
            cause,
            trajectory,
        }
    }

    /// Identifier derived from the starting point, formatted `(<x1>,<x2>)`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Why the run stopped.
    pub fn cause(&self) -> Cause {
        self.cause
    }

    pub fn trajectory(&self) -> &Trajectory<F> {
        &self.trajectory
    }

    /// The last accepted iterate.
    pub fn final_iterate(&self) -> &Iterate<F> {
        self.trajectory
            .last()
            .expect("a trajectory is seeded with its starting point")
    }

    /// Number of iterations performed. The trajectory holds one more point
    /// than this.
    pub fn iterations(&self) -> usize {
        self.trajectory.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quadratic, Trajectory};

    fn solution() -> Solution<f64> {
        let mut trajectory = Trajectory::new();
        trajectory.push(Iterate::evaluated(&Quadratic, 6.0, 0.0));
        trajectory.push(Iterate::evaluated(&Quadratic, 3.0, 1.8));
        Solution::new(trajectory, Cause::Converged)
    }

    #[test]
    fn label_comes_from_the_starting_point() {
        assert_eq!(solution().label(), "(6,0)");
    }

    #[test]
    fn iteration_count_excludes_the_seed() {
        let solution = solution();
        assert_eq!(solution.iterations(), 1);
        assert_eq!(solution.final_iterate().x1(), 3.0);
        assert_eq!(solution.cause(), Cause::Converged);
    }
}
