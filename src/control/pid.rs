use nalgebra::Vector3;

use super::gains::{Gains, Mode};
use super::value::ControlValue;

// ---------------------------------------------------------------------------
// Mode-dispatching PID controller
// ---------------------------------------------------------------------------

/// PID controller over a scalar or 3-axis error signal.
///
/// The controller classifies itself into one of four operating modes at
/// construction and (re)configuration time, from which gains are strictly
/// positive (see [`Gains::mode`]). `update` branches once on the stored
/// tag, so a P-only controller pays for no integral or derivative
/// bookkeeping per call.
///
/// Scalar and 3-axis loops share this one implementation through the
/// [`ControlValue`] domain; the 3-axis form controls each axis
/// independently under a single gain triple and per-axis output bound.
/// A controller is plain mutable state meant to be owned and stepped by
/// exactly one control loop; callers sharing one across threads must
/// serialize access themselves.
#[derive(Debug, Clone)]
pub struct Pid<V: ControlValue> {
    /// Gain triple. Writing this field directly does not re-derive the
    /// operating mode; `configure` and `retune` do.
    pub gains: Gains,
    /// Symmetric per-component output limit.
    pub output_bound: f64,
    integral: V,
    prev_error: V,
    mode: Mode,
}

/// Single-axis controller.
pub type ScalarPid = Pid<f64>;
/// Three independent axes sharing one gain triple and bound.
pub type VectorPid = Pid<Vector3<f64>>;

impl<V: ControlValue> Pid<V> {
    pub fn new(gains: Gains, output_bound: f64) -> Self {
        Self {
            gains,
            output_bound,
            integral: V::zero(),
            prev_error: V::zero(),
            mode: gains.mode(),
        }
    }

    /// Replace gains and bound, re-derive the mode, and clear accumulators.
    pub fn configure(&mut self, gains: Gains, output_bound: f64) {
        self.gains = gains;
        self.output_bound = output_bound;
        self.mode = gains.mode();
        self.reset();
    }

    /// Replace gains and bound and re-derive the mode, keeping the integral
    /// and previous-error history. For tuning a live loop without
    /// discarding in-flight control state.
    pub fn retune(&mut self, gains: Gains, output_bound: f64) {
        self.gains = gains;
        self.output_bound = output_bound;
        self.mode = gains.mode();
    }

    /// One control step: turn the current error and elapsed time into a
    /// clamped correction.
    ///
    /// Numeric edge cases are not guarded: `dt == 0` in a mode with a
    /// derivative term divides by zero, and the IEEE-754 result flows
    /// through the clamp (an infinite term lands on the bound, a 0/0
    /// difference comes out NaN); non-finite errors propagate the same
    /// way. [`Pid::update_guarded`] maps those inputs to a zero output
    /// instead. No default `dt` is ever substituted.
    pub fn update(&mut self, error: V, dt: f64) -> V {
        match self.mode {
            Mode::P => self.update_p(error),
            Mode::Pi => self.update_pi(error, dt),
            Mode::Pd => self.update_pd(error, dt),
            Mode::Pid => self.update_pid(error, dt),
        }
    }

    /// Guarded variant of [`Pid::update`]: returns the domain zero without
    /// touching any state when the error is non-finite, or when `dt == 0`
    /// in a mode that consumes it (P mode checks only the error).
    pub fn update_guarded(&mut self, error: V, dt: f64) -> V {
        if !error.is_finite() {
            return V::zero();
        }
        if dt == 0.0 && self.mode != Mode::P {
            return V::zero();
        }
        self.update(error, dt)
    }

    fn update_p(&self, error: V) -> V {
        (error * self.gains.kp).clamp_abs(self.output_bound)
    }

    fn update_pi(&mut self, error: V, dt: f64) -> V {
        self.integral += error * dt;
        let out = error * self.gains.kp + self.integral * self.gains.ki;
        out.clamp_abs(self.output_bound)
    }

    fn update_pd(&mut self, error: V, dt: f64) -> V {
        let derivative = (error - self.prev_error) / dt;
        self.prev_error = error;
        let out = error * self.gains.kp + derivative * self.gains.kd;
        out.clamp_abs(self.output_bound)
    }

    fn update_pid(&mut self, error: V, dt: f64) -> V {
        self.integral += error * dt;
        let derivative = (error - self.prev_error) / dt;
        self.prev_error = error;
        let out =
            error * self.gains.kp + self.integral * self.gains.ki + derivative * self.gains.kd;
        out.clamp_abs(self.output_bound)
    }

    /// Clear the integral and previous-error accumulators. Gains, bound,
    /// and mode are untouched.
    pub fn reset(&mut self) {
        self.integral = V::zero();
        self.prev_error = V::zero();
    }

    /// Operating mode derived at the last (re)configuration.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Accumulated integral error.
    pub fn integral(&self) -> V {
        self.integral
    }

    /// Last error sample consumed by a derivative-tracking update.
    pub fn last_error(&self) -> V {
        self.prev_error
    }
}

impl<V: ControlValue> Default for Pid<V> {
    /// All-zero gains and bound; the mode table falls back to `Pid`.
    fn default() -> Self {
        Self::new(Gains::default(), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn p_only_is_clamped_proportional() {
        let mut pid = ScalarPid::new(Gains::new(2.0, 0.0, 0.0), 3.0);
        assert_eq!(pid.mode(), Mode::P);
        assert_eq!(pid.update(1.0, 0.01), 2.0);
        // dt is irrelevant in P mode, even zero
        assert_eq!(pid.update(5.0, 0.0), 3.0);
        assert_eq!(pid.update(-5.0, 0.0), -3.0);
        assert_eq!(pid.integral(), 0.0, "P mode must not touch the integral");
        assert_eq!(pid.last_error(), 0.0, "P mode must not track previous error");
    }

    #[test]
    fn output_never_exceeds_bound() {
        let mut pid = ScalarPid::new(Gains::new(50.0, 10.0, 5.0), 4.0);
        for &e in &[1.0e6, -3.0e9, 2.5, -0.001, 7.7] {
            let out = pid.update(e, 0.1);
            assert!(out.abs() <= 4.0, "{} out of bound for error {}", out, e);
        }
    }

    #[test]
    fn integral_accumulates_over_variable_steps() {
        let mut pid = ScalarPid::new(Gains::new(1.0, 1.0, 0.0), 100.0);
        assert_eq!(pid.mode(), Mode::Pi);
        pid.update(1.0, 0.1);
        pid.update(-2.0, 0.3);
        let expected = 0.1 * 1.0 + 0.3 * (-2.0);
        assert!(
            (pid.integral() - expected).abs() < 1e-12,
            "integral {} != {}",
            pid.integral(),
            expected
        );
    }

    #[test]
    fn repeated_error_has_zero_derivative() {
        let mut pid = ScalarPid::new(Gains::new(1.0, 0.0, 5.0), 1000.0);
        pid.update(5.0, 1.0);
        let out = pid.update(5.0, 1.0);
        assert!(
            (out - 5.0).abs() < 1e-12,
            "unchanged error should leave only the P term, got {}",
            out
        );
    }

    #[test]
    fn all_zero_gains_fall_back_to_pid() {
        assert_eq!(ScalarPid::default().mode(), Mode::Pid);

        let mut pid = ScalarPid::new(Gains::default(), 10.0);
        assert_eq!(pid.mode(), Mode::Pid);
        assert_eq!(pid.update(123.0, 0.5), 0.0);
        // The full term set still runs its bookkeeping
        assert!((pid.integral() - 61.5).abs() < 1e-12);
        assert_eq!(pid.last_error(), 123.0);
    }

    #[test]
    fn pd_mode_never_touches_integral() {
        let mut pid = ScalarPid::new(Gains::new(1.0, 0.0, 1.0), 100.0);
        assert_eq!(pid.mode(), Mode::Pd);
        for i in 0..10 {
            pid.update(i as f64, 0.05);
        }
        assert_eq!(pid.integral(), 0.0);
    }

    #[test]
    fn reset_matches_fresh_controller() {
        let gains = Gains::new(3.0, 1.5, 0.7);
        let mut used = ScalarPid::new(gains, 50.0);
        for _ in 0..25 {
            used.update(2.0, 0.1);
        }
        used.reset();

        let mut fresh = ScalarPid::new(gains, 50.0);
        let a = used.update(1.3, 0.02);
        let b = fresh.update(1.3, 0.02);
        assert_eq!(a, b, "post-reset update must match a fresh controller");
    }

    #[test]
    fn retune_keeps_history_configure_clears_it() {
        let mut pid = ScalarPid::new(Gains::new(1.0, 2.0, 0.0), 100.0);
        pid.update(1.0, 0.5);
        assert!((pid.integral() - 0.5).abs() < 1e-12);

        pid.retune(Gains::new(4.0, 1.0, 0.0), 80.0);
        assert!(
            (pid.integral() - 0.5).abs() < 1e-12,
            "retune must preserve the integral"
        );
        // Next update sees the old history under the new gains
        let out = pid.update(0.0, 0.5);
        assert!((out - 0.5).abs() < 1e-12, "ki * preserved integral, got {}", out);

        pid.configure(Gains::new(4.0, 1.0, 0.0), 80.0);
        assert_eq!(pid.integral(), 0.0, "configure must clear the integral");
        assert_eq!(pid.last_error(), 0.0);
    }

    #[test]
    fn field_writes_do_not_reclassify() {
        let mut pid = ScalarPid::new(Gains::new(2.0, 0.0, 0.0), 10.0);
        assert_eq!(pid.mode(), Mode::P);
        pid.gains.ki = 5.0;
        assert_eq!(pid.mode(), Mode::P, "mode is fixed until configure/retune");
        pid.update(1.0, 1.0);
        assert_eq!(pid.integral(), 0.0, "still dispatching as P");
    }

    #[test]
    fn vector_axes_match_independent_scalars() {
        let gains = Gains::new(2.0, 0.5, 1.0);
        let mut vec_pid = VectorPid::new(gains, 6.0);
        let mut scalars = [
            ScalarPid::new(gains, 6.0),
            ScalarPid::new(gains, 6.0),
            ScalarPid::new(gains, 6.0),
        ];

        let errors = [
            Vector3::new(5.0, 0.0, -5.0),
            Vector3::new(1.0, -2.0, 0.5),
        ];
        for e in errors {
            let out = vec_pid.update(e, 0.1);
            for axis in 0..3 {
                let expected = scalars[axis].update(e[axis], 0.1);
                assert!(
                    (out[axis] - expected).abs() < 1e-15,
                    "axis {} diverged: {} vs {}",
                    axis,
                    out[axis],
                    expected
                );
            }
        }
    }

    #[test]
    fn vector_clamp_is_per_axis() {
        let mut pid = VectorPid::new(Gains::new(1.0, 0.0, 0.0), 2.0);
        let out = pid.update(Vector3::new(100.0, 1.0, -100.0), 0.01);
        assert_eq!(out, Vector3::new(2.0, 1.0, -2.0));
    }

    #[test]
    fn zero_dt_follows_ieee_division() {
        // First sample: (e - 0) / 0 is infinite and lands on the bound
        let mut pd = ScalarPid::new(Gains::new(1.0, 0.0, 1.0), 10.0);
        assert_eq!(pd.update(1.0, 0.0), 10.0);

        // Unchanged error: the 0/0 derivative is NaN and flows out
        let mut pid = ScalarPid::new(Gains::new(1.0, 1.0, 1.0), 10.0);
        pid.update(1.0, 0.1);
        assert!(pid.update(1.0, 0.0).is_nan());
    }

    #[test]
    fn nan_error_propagates_by_default() {
        let mut pid = ScalarPid::new(Gains::new(1.0, 1.0, 1.0), 10.0);
        assert!(pid.update(f64::NAN, 0.1).is_nan());
    }

    #[test]
    fn guarded_update_short_circuits_without_mutating() {
        let mut pid = ScalarPid::new(Gains::new(1.0, 1.0, 1.0), 10.0);
        assert_eq!(pid.update_guarded(f64::NAN, 0.1), 0.0);
        assert_eq!(pid.update_guarded(1.0, 0.0), 0.0);
        assert_eq!(pid.integral(), 0.0, "guarded rejects must leave state untouched");
        assert_eq!(pid.last_error(), 0.0);

        // P mode only guards the error; dt is unused
        let mut p = ScalarPid::new(Gains::new(2.0, 0.0, 0.0), 10.0);
        assert_eq!(p.update_guarded(3.0, 0.0), 6.0);

        // With ordinary inputs the guarded path is the plain update:
        // integral 0.1, derivative 10, p-term 1 -> 11.1 clamped to 10
        assert_eq!(pid.update_guarded(1.0, 0.1), 10.0);
    }
}
