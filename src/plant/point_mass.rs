use nalgebra::Vector3;

use crate::control::ControlValue;

// ---------------------------------------------------------------------------
// Damped point mass in the controller's value domain
// ---------------------------------------------------------------------------

/// A linearly damped point mass driven by a force.
///
/// The simplest actuator a correction output can push on: one mass per
/// axis, velocity-proportional damping, advanced with semi-implicit Euler.
#[derive(Debug, Clone)]
pub struct PointMass<V: ControlValue> {
    pub mass: f64,       // kg
    pub damping: f64,    // N·s/m, force opposing velocity
    pub pos: V,
    pub vel: V,
}

/// Single-axis mass.
pub type PointMass1 = PointMass<f64>;
/// Three-axis mass; the axes do not couple.
pub type PointMass3 = PointMass<Vector3<f64>>;

impl<V: ControlValue> PointMass<V> {
    pub fn new(mass: f64, damping: f64) -> Self {
        Self {
            mass,
            damping,
            pos: V::zero(),
            vel: V::zero(),
        }
    }

    /// Advance one step under the applied force.
    pub fn step(&mut self, force: V, dt: f64) {
        let accel = (force - self.vel * self.damping) / self.mass;
        self.vel += accel * dt;
        self.pos += self.vel * dt;
    }
}
