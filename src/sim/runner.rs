use crate::control::{ControlValue, Regulator};
use crate::plant::PointMass;

// ---------------------------------------------------------------------------
// Closed-loop stepping
// ---------------------------------------------------------------------------

/// Fixed-step loop configuration.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub dt: f64,
    pub max_time: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,        // 100 Hz
            max_time: 10.0,
        }
    }
}

/// One record per control tick.
///
/// `error` is the pre-step deviation fed to the regulator; `measured` is
/// the plant position after the correction was applied.
#[derive(Debug, Clone, Copy)]
pub struct Sample<V> {
    pub time: f64,
    pub target: V,
    pub measured: V,
    pub error: V,
    pub output: V,
}

/// Step a regulator against a plant toward a fixed target.
///
/// Runs at `config.dt` until `config.max_time`, recording one sample per
/// tick plus the initial state at time zero. The loop owns the clock; the
/// regulator only ever sees `(error, dt)`.
pub fn run<V: ControlValue>(
    regulator: &mut dyn Regulator<V>,
    plant: &mut PointMass<V>,
    target: V,
    config: &LoopConfig,
) -> Vec<Sample<V>> {
    let capacity = (config.max_time / config.dt) as usize + 1;
    let cap = capacity.min(200_000);
    let mut samples = Vec::with_capacity(cap);

    samples.push(Sample {
        time: 0.0,
        target,
        measured: plant.pos,
        error: target - plant.pos,
        output: V::zero(),
    });

    let mut time = 0.0;
    while time < config.max_time {
        let error = target - plant.pos;
        let output = regulator.correct(error, config.dt);
        plant.step(output, config.dt);
        time += config.dt;

        samples.push(Sample {
            time,
            target,
            measured: plant.pos,
            error,
            output,
        });
    }

    samples
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
