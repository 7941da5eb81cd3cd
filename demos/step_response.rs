use pidloop::io::csv;
use pidloop::io::json::{self, ResponseSummary};
use pidloop::{run, Gains, LoopConfig, PointMass1, ScalarPid};

fn main() {
    let mut pid = ScalarPid::new(Gains::new(18.0, 6.0, 5.0), 12.0);
    let mut plant = PointMass1::new(1.0, 1.5);
    let config = LoopConfig { dt: 0.005, max_time: 8.0 };

    println!("Running {} step response ...", pid.mode().as_str());
    let samples = run(&mut pid, &mut plant, 1.0, &config);

    let summary = ResponseSummary::from_samples(&samples, 0.02);
    match summary.rise_time {
        Some(t) => println!("Rise time: {:.2} s", t),
        None => println!("Rise time: never reached 90%"),
    }
    println!("Overshoot: {:.1} %", summary.overshoot_pct);
    println!("Final error: {:.4}", summary.final_error);

    csv::write_response_file("step_response.csv", &samples)
        .expect("Failed to write CSV");
    json::write_summary_file("step_response.json", "position servo", &config, &summary)
        .expect("Failed to write JSON");

    println!("Exported: step_response.csv, step_response.json");
}
