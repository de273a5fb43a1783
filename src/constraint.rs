//! The spherical feasible region and its boundary projection.

use num_traits::Float;
use serde::Serialize;

/// Raised when a [`Sphere`] cannot be constructed.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum SphereError {
    #[error("sphere radius must be positive and finite")]
    InvalidRadius,
    #[error("sphere centre must be finite")]
    NonFiniteCentre,
}

/// The trial point coincides with the sphere centre, so the ray through it
/// is undefined and the projection denominator is zero.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
#[error("trial point coincides with the sphere centre, projection is undefined")]
pub struct SingularProjection;

/// A sphere with centre `(a, b)` and radius `r`, fixed for the lifetime of a
/// run.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Sphere<F> {
    a: F,
    b: F,
    r: F,
}

impl<F: Float> Sphere<F> {
    /// Build a sphere, rejecting non-finite centres and radii that are not
    /// strictly positive.
    pub fn new(a: F, b: F, r: F) -> Result<Self, SphereError> {
        if !(a.is_finite() && b.is_finite()) {
            return Err(SphereError::NonFiniteCentre);
        }
        if !r.is_finite() || r <= F::zero() {
            return Err(SphereError::InvalidRadius);
        }
        Ok(Self { a, b, r })
    }

    pub fn centre(&self) -> (F, F) {
        (self.a, self.b)
    }

    pub fn radius(&self) -> F {
        self.r
    }

    /// Project `(z1, z2)` onto the boundary, along the ray from the centre
    /// through the point.
    ///
    /// The projection is radial scaling: the offset from the centre is
    /// normalised by its length and stretched to the radius. It maps points
    /// inside the sphere outwards as well as points outside inwards, which
    /// is exactly how the calculation uses it. Fails when the point sits on
    /// the centre itself.
    pub fn project(&self, z1: F, z2: F) -> Result<(F, F), SingularProjection> {
        let dz1 = z1 - self.a;
        let dz2 = z2 - self.b;
        let d = (dz1.powi(2) + dz2.powi(2)).sqrt();
        if d == F::zero() {
            return Err(SingularProjection);
        }
        Ok((self.a + dz1 / d * self.r, self.b + dz2 / d * self.r))
    }
}
