use super::pid::Pid;
use super::value::ControlValue;

/// Trait for feedback regulators.
///
/// Implement this to plug custom correction laws into the closed-loop
/// runner alongside [`Pid`].
pub trait Regulator<V: ControlValue> {
    /// Turn the current error and elapsed step time into a correction.
    fn correct(&mut self, error: V, dt: f64) -> V;

    /// Reset internal state (e.g., PID accumulators).
    fn reset(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}

impl<V: ControlValue> Regulator<V> for Pid<V> {
    fn correct(&mut self, error: V, dt: f64) -> V {
        self.update(error, dt)
    }

    fn reset(&mut self) {
        Pid::reset(self);
    }

    fn name(&self) -> &str {
        self.mode().as_str()
    }
}
