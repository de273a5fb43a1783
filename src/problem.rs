use crate::{Objective, Sphere};

/// Wrapper handed to every [`Calculation`](crate::Calculation) step.
pub struct Problem<P>(P);

impl<P> Problem<P> {
    pub(crate) fn new(inner: P) -> Self {
        Self(inner)
    }

    pub fn inner(&self) -> &P {
        &self.0
    }

    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.0
    }
}

/// An objective paired with the spherical region it is minimised over.
#[derive(Copy, Clone, Debug)]
pub struct ConstrainedObjective<O, F> {
    objective: O,
    sphere: Sphere<F>,
}

impl<O, F> ConstrainedObjective<O, F>
where
    O: Objective<F>,
{
    pub fn new(objective: O, sphere: Sphere<F>) -> Self {
        Self { objective, sphere }
    }

    pub fn objective(&self) -> &O {
        &self.objective
    }

    pub fn sphere(&self) -> &Sphere<F> {
        &self.sphere
    }
}
