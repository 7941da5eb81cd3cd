use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use nalgebra::Vector3;

use pidloop::{run, Gains, LoopConfig, PointMass1, PointMass3, Sample, ScalarPid, VectorPid};

fn main() -> eframe::Result {
    let config = LoopConfig { dt: 0.005, max_time: 8.0 };

    let mut pid = ScalarPid::new(Gains::new(18.0, 6.0, 5.0), 12.0);
    let mut plant = PointMass1::new(1.0, 1.5);
    let scalar = run(&mut pid, &mut plant, 1.0, &config);

    let mut vpid = VectorPid::new(Gains::new(18.0, 6.0, 5.0), 12.0);
    let mut vplant = PointMass3::new(1.0, 1.5);
    let vector = run(&mut vpid, &mut vplant, Vector3::new(1.0, -2.0, 0.5), &config);

    let app = LoopViz { mode: pid.mode().as_str(), scalar, vector };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("PID Step Response", options, Box::new(|_| Ok(Box::new(app))))
}

struct LoopViz {
    mode: &'static str,
    scalar: Vec<Sample<f64>>,
    vector: Vec<Sample<Vector3<f64>>>,
}

impl eframe::App for LoopViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let step = (self.scalar.len() / 2000).max(1);
        let sampled: Vec<&Sample<f64>> = self.scalar.iter().step_by(step).collect();
        let vsampled: Vec<&Sample<Vector3<f64>>> = self.vector.iter().step_by(step).collect();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("Controller: {}", self.mode));
            let final_err = self.scalar.last().map_or(0.0, |s| s.error.abs());
            let peak_out = self.scalar.iter().map(|s| s.output.abs()).fold(0.0_f64, f64::max);
            ui.label(format!(
                "Final error: {:.4}  |  Peak output: {:.2}  |  Steps: {}  |  Run: {:.1} s",
                final_err,
                peak_out,
                self.scalar.len(),
                self.scalar.last().map_or(0.0, |s| s.time),
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;
            let half_h = available.y / 2.0 - 8.0;

            ui.horizontal(|ui| {
                // Measured vs target
                ui.vertical(|ui| {
                    ui.label("Measured vs Target");
                    let measured: PlotPoints = sampled.iter()
                        .map(|s| [s.time, s.measured])
                        .collect();
                    let target: PlotPoints = sampled.iter()
                        .map(|s| [s.time, s.target])
                        .collect();
                    Plot::new("measured")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Measured", measured));
                            plot_ui.line(Line::new("Target", target));
                        });
                });

                // Error vs time
                ui.vertical(|ui| {
                    ui.label("Error");
                    let points: PlotPoints = sampled.iter()
                        .map(|s| [s.time, s.error])
                        .collect();
                    Plot::new("error")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Error", points));
                        });
                });
            });

            ui.horizontal(|ui| {
                // Correction output vs time
                ui.vertical(|ui| {
                    ui.label("Correction Output");
                    let points: PlotPoints = sampled.iter()
                        .map(|s| [s.time, s.output])
                        .collect();
                    Plot::new("output")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            plot_ui.line(Line::new("Output", points));
                        });
                });

                // Per-axis error of the 3-axis run
                ui.vertical(|ui| {
                    ui.label("3-Axis Error");
                    Plot::new("vector_error")
                        .width(half_w)
                        .height(half_h)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            for (axis, label) in ["x", "y", "z"].iter().enumerate() {
                                let points: PlotPoints = vsampled.iter()
                                    .map(|s| [s.time, s.error[axis]])
                                    .collect();
                                plot_ui.line(Line::new(*label, points));
                            }
                        });
                });
            });
        });
    }
}
