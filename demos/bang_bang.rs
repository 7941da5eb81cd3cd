use pidloop::{run, Gains, LoopConfig, PointMass1, Regulator, ScalarPid};

/// A relay controller: full force toward the target whenever the error is
/// outside a dead band, nothing inside it.
struct BangBang {
    force: f64,
    dead_band: f64,
}

impl Regulator<f64> for BangBang {
    fn correct(&mut self, error: f64, _dt: f64) -> f64 {
        if error > self.dead_band {
            self.force
        } else if error < -self.dead_band {
            -self.force
        } else {
            0.0
        }
    }

    fn name(&self) -> &str {
        "BangBang"
    }
}

fn final_error(samples: &[pidloop::Sample<f64>]) -> f64 {
    samples.last().map_or(0.0, |s| s.error.abs())
}

fn main() {
    let config = LoopConfig { dt: 0.005, max_time: 8.0 };
    let target = 1.0;

    let mut relay = BangBang { force: 12.0, dead_band: 0.02 };
    let mut plant = PointMass1::new(1.0, 1.5);
    println!("Running {} ...", relay.name());
    let relay_trace = run(&mut relay, &mut plant, target, &config);

    let mut pid = ScalarPid::new(Gains::new(18.0, 6.0, 5.0), 12.0);
    let mut plant = PointMass1::new(1.0, 1.5);
    println!("Running {} ...", pid.mode().as_str());
    let pid_trace = run(&mut pid, &mut plant, target, &config);

    println!();
    println!("Final |error| after {:.0} s on identical plants:", config.max_time);
    println!("  BangBang: {:.4}", final_error(&relay_trace));
    println!("  PID:      {:.4}", final_error(&pid_trace));

    let relay_chatter = relay_trace
        .windows(2)
        .filter(|p| p[0].output != p[1].output)
        .count();
    println!("BangBang output switches: {}", relay_chatter);
}
