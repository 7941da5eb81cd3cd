use nalgebra::Vector3;

use pidloop::io::csv;
use pidloop::{run, Gains, LoopConfig, PointMass3, VectorPid};

fn main() {
    // Three independent axes under one gain triple: a thrust platform
    // holding position against its own damping.
    let mut pid = VectorPid::new(Gains::new(18.0, 6.0, 5.0), 20.0);
    let mut plant = PointMass3::new(2.0, 1.0);
    let target = Vector3::new(1.0, -2.0, 0.5);
    let config = LoopConfig { dt: 0.005, max_time: 10.0 };

    println!("Flying to ({}, {}, {}) ...", target.x, target.y, target.z);
    let samples = run(&mut pid, &mut plant, target, &config);

    let last = samples.last().unwrap();
    for (axis, label) in ["x", "y", "z"].iter().enumerate() {
        println!(
            "  {}: pos {:>7.4}  error {:>8.5}",
            label, last.measured[axis], last.error[axis]
        );
    }

    csv::write_response3_file("hover_response.csv", &samples)
        .expect("Failed to write CSV");
    println!("Exported: hover_response.csv ({} rows)", samples.len());
}
