use pidloop::io::json::ResponseSummary;
use pidloop::sim::event::{self, BandDetector, CrossingDetector, EventDetector, EventKind, SaturationDetector};
use pidloop::{run, Gains, LoopConfig, PointMass1, ScalarPid};

fn main() {
    // -----------------------------------------------------------------------
    // Loop: position servo on a damped 1 kg mass
    // -----------------------------------------------------------------------
    let gains = Gains::new(18.0, 6.0, 5.0);
    let bound = 12.0; // N, actuator force limit
    let mut pid = ScalarPid::new(gains, bound);

    let mut plant = PointMass1::new(1.0, 1.5);
    let target = 1.0; // m, commanded step
    let config = LoopConfig { dt: 0.01, max_time: 8.0 };

    // -----------------------------------------------------------------------
    // Run closed loop
    // -----------------------------------------------------------------------
    let samples = run(&mut pid, &mut plant, target, &config);

    let settle_band = 0.02;
    let mut detectors: Vec<Box<dyn EventDetector>> = vec![
        Box::new(SaturationDetector::new(bound)),
        Box::new(CrossingDetector::new()),
        Box::new(BandDetector::new(settle_band * target.abs())),
    ];
    let events = event::scan(&samples, &mut detectors);
    let summary = ResponseSummary::from_samples(&samples, settle_band);

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  STEP RESPONSE — {} position servo", pid.mode().as_str());
    println!("====================================================================");
    println!();
    println!("  Loop Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Kp:            {:>8.2}       Ki:           {:>8.2}",
        gains.kp, gains.ki
    );
    println!(
        "  Kd:            {:>8.2}       Bound:        {:>8.1} N",
        gains.kd, bound
    );
    println!(
        "  Plant mass:    {:>8.1} kg    Damping:      {:>8.1} N·s/m",
        plant.mass, plant.damping
    );
    println!(
        "  Target:        {:>8.2} m     dt:           {:>8} s",
        target, config.dt
    );
    println!();

    println!("  Response Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    for e in &events {
        match e.kind {
            EventKind::Saturated { bound } => {
                println!("  SATURATED t={:>6.2}s   output pinned at ±{:.1} N", e.time, bound)
            }
            EventKind::ZeroCrossing => {
                println!("  CROSSING  t={:>6.2}s   error changed sign (overshoot)", e.time)
            }
            EventKind::EnteredBand { band } => {
                println!("  SETTLING  t={:>6.2}s   error inside ±{:.3} m", e.time, band)
            }
        }
    }
    if events.is_empty() {
        println!("  (none)");
    }
    println!();

    println!("  Response Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    match summary.rise_time {
        Some(t) => println!("  Rise time:     {:>8.2} s   (to 90% of step)", t),
        None => println!("  Rise time:         never reached 90%"),
    }
    println!("  Overshoot:     {:>8.1} %", summary.overshoot_pct);
    match summary.settling_time {
        Some(t) => println!("  Settling time: {:>8.2} s   (±{:.0}% band)", t, settle_band * 100.0),
        None => println!("  Settling time:     did not settle"),
    }
    println!("  Final error:   {:>8.4} m", summary.final_error);
    println!("  Peak output:   {:>8.2} N", summary.peak_output);
    println!();

    // -----------------------------------------------------------------------
    // Response table (sampled)
    // -----------------------------------------------------------------------
    println!("  Response");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>9}  {:>9}",
        "t (s)", "pos (m)", "err (m)", "out (N)", "phase"
    );
    println!("  {}", "─".repeat(54));

    let sample_interval = (samples.len() / 25).max(1);
    for (i, s) in samples.iter().enumerate() {
        let print = i % sample_interval == 0 || i == samples.len() - 1;
        if !print {
            continue;
        }

        let phase = if s.output.abs() >= bound {
            "SAT"
        } else if s.error.abs() <= settle_band * target.abs() {
            "SETTLED"
        } else {
            "TRACK"
        };

        println!(
            "  {:>7.2}  {:>9.4}  {:>9.4}  {:>9.3}  {:>9}",
            s.time, s.measured, s.error, s.output, phase
        );
    }

    println!();
    println!("  Loop: {} steps, dt={} s", samples.len(), config.dt);
    println!("====================================================================");
    println!();
}
