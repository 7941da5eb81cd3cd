// ---------------------------------------------------------------------------
// Gain triple and operating mode
// ---------------------------------------------------------------------------

/// Proportional / integral / derivative gain triple.
///
/// Gains are expected non-negative but never validated: mode selection
/// treats a non-positive gain as absent and stores whatever it was given.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl Gains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    /// Select the operating mode from which gains are strictly positive.
    ///
    /// Every combination not covered below (all-zero, negative inputs,
    /// I or D without P) falls back to `Pid`: an unconfigured controller
    /// keeps evaluating the full term set and yields zero output instead
    /// of silently no-op-ing in an ambiguous state.
    pub fn mode(&self) -> Mode {
        if self.kp > 0.0 && self.ki > 0.0 && self.kd > 0.0 {
            Mode::Pid
        } else if self.kp > 0.0 && self.ki > 0.0 {
            Mode::Pi
        } else if self.kp > 0.0 && self.kd > 0.0 {
            Mode::Pd
        } else if self.kp > 0.0 {
            Mode::P
        } else {
            Mode::Pid
        }
    }
}

/// Which subset of the P/I/D terms an update evaluates.
///
/// Derived from the gains at (re)configuration time and committed until
/// the next one; the update step dispatches once on this tag instead of
/// re-inspecting gains every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    P,
    Pi,
    Pd,
    Pid,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::P => "P",
            Mode::Pi => "PI",
            Mode::Pd => "PD",
            Mode::Pid => "PID",
        }
    }
}
