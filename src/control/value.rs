use std::ops::{Add, AddAssign, Div, Mul, Sub};

use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// Value domain: scalar or per-axis vector signals
// ---------------------------------------------------------------------------

/// Capability trait for a controller's value domain.
///
/// A control value supports the arithmetic of the update step — addition,
/// subtraction, scaling by a gain or time step — plus a symmetric
/// per-component clamp. Implemented for `f64` (single-axis loops) and
/// `nalgebra::Vector3<f64>` (three independent axes sharing one bound).
pub trait ControlValue:
    Copy
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    /// Additive identity of the domain.
    fn zero() -> Self;

    /// Clamp every component to `[-bound, bound]`.
    ///
    /// For vectors this is a cube bound, independent per axis — not a norm
    /// bound. The clamp is a comparison chain: NaN components pass through
    /// unchanged, infinite components land on the bound, and a nonsense
    /// bound produces nonsense output instead of a panic.
    fn clamp_abs(self, bound: f64) -> Self;

    /// True when every component is finite.
    fn is_finite(self) -> bool;
}

fn clamp_component(c: f64, bound: f64) -> f64 {
    if c > bound {
        bound
    } else if c < -bound {
        -bound
    } else {
        c
    }
}

impl ControlValue for f64 {
    fn zero() -> Self {
        0.0
    }

    fn clamp_abs(self, bound: f64) -> Self {
        clamp_component(self, bound)
    }

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl ControlValue for Vector3<f64> {
    fn zero() -> Self {
        Vector3::zeros()
    }

    fn clamp_abs(self, bound: f64) -> Self {
        self.map(|c| clamp_component(c, bound))
    }

    fn is_finite(self) -> bool {
        self.iter().all(|c| c.is_finite())
    }
}
