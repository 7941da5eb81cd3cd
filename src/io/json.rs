use std::io::{self, Write};

use crate::sim::runner::{LoopConfig, Sample};

// ---------------------------------------------------------------------------
// Step-response metrics
// ---------------------------------------------------------------------------

/// Summary statistics computed from a scalar response trace.
#[derive(Debug, Clone)]
pub struct ResponseSummary {
    /// Time to first reach 90% of the commanded step, if ever.
    pub rise_time: Option<f64>,
    /// Peak excursion past the target, as % of the commanded step.
    pub overshoot_pct: f64,
    /// Time after which the error stays inside the settle band, if it does.
    pub settling_time: Option<f64>,
    pub final_error: f64,
    pub peak_output: f64,
}

impl ResponseSummary {
    /// Compute step-response metrics from a trace.
    ///
    /// `settle_band` is the settling criterion as a fraction of the
    /// commanded step (0.02 = 2%). A trace commanding no net step
    /// reports no rise or settling time.
    pub fn from_samples(samples: &[Sample<f64>], settle_band: f64) -> Self {
        if samples.is_empty() {
            return ResponseSummary {
                rise_time: None,
                overshoot_pct: 0.0,
                settling_time: None,
                final_error: 0.0,
                peak_output: 0.0,
            };
        }

        let first = &samples[0];
        let last = &samples[samples.len() - 1];
        let step = first.target - first.measured;

        let peak_output = samples
            .iter()
            .map(|s| s.output.abs())
            .fold(0.0_f64, f64::max);

        if step == 0.0 {
            return ResponseSummary {
                rise_time: None,
                overshoot_pct: 0.0,
                settling_time: None,
                final_error: last.error,
                peak_output,
            };
        }

        let rise_time = samples
            .iter()
            .find(|s| (s.measured - first.measured) / step >= 0.9)
            .map(|s| s.time);

        let overshoot = samples
            .iter()
            .map(|s| (s.measured - s.target) / step)
            .fold(0.0_f64, f64::max);
        let overshoot_pct = overshoot * 100.0;

        let band = settle_band * step.abs();
        let mut last_outside = None;
        for (i, s) in samples.iter().enumerate() {
            if s.error.abs() > band {
                last_outside = Some(i);
            }
        }
        let settling_time = match last_outside {
            None => Some(first.time),
            Some(i) if i + 1 < samples.len() => Some(samples[i + 1].time),
            Some(_) => None,
        };

        ResponseSummary {
            rise_time,
            overshoot_pct,
            settling_time,
            final_error: last.error,
            peak_output,
        }
    }
}

fn json_num(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{:.4}", x),
        None => "null".to_string(),
    }
}

/// Write a response summary as JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    name: &str,
    config: &LoopConfig,
    summary: &ResponseSummary,
) -> io::Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"loop\": {{")?;
    writeln!(writer, "    \"name\": \"{}\",", name)?;
    writeln!(writer, "    \"dt_s\": {:.4},", config.dt)?;
    writeln!(writer, "    \"max_time_s\": {:.2}", config.max_time)?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"response\": {{")?;
    writeln!(writer, "    \"rise_time_s\": {},", json_num(summary.rise_time))?;
    writeln!(writer, "    \"overshoot_pct\": {:.2},", summary.overshoot_pct)?;
    writeln!(writer, "    \"settling_time_s\": {},", json_num(summary.settling_time))?;
    writeln!(writer, "    \"final_error\": {:.6},", summary.final_error)?;
    writeln!(writer, "    \"peak_output\": {:.4}", summary.peak_output)?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write a response summary JSON to a file.
pub fn write_summary_file(
    path: &str,
    name: &str,
    config: &LoopConfig,
    summary: &ResponseSummary,
) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, name, config, summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(time: f64, measured: f64, output: f64) -> Sample<f64> {
        Sample {
            time,
            target: 1.0,
            measured,
            error: 1.0 - measured,
            output,
        }
    }

    fn step_trace() -> Vec<Sample<f64>> {
        vec![
            s(0.0, 0.0, 10.0),
            s(0.1, 0.5, 8.0),
            s(0.2, 0.95, 4.0),
            s(0.3, 1.15, -2.0),
            s(0.4, 1.05, -1.0),
            s(0.5, 1.01, -0.2),
            s(0.6, 1.0, 0.0),
        ]
    }

    #[test]
    fn summary_computes_step_metrics() {
        let summary = ResponseSummary::from_samples(&step_trace(), 0.02);
        assert_eq!(summary.rise_time, Some(0.2));
        assert!(
            (summary.overshoot_pct - 15.0).abs() < 1e-9,
            "overshoot {}",
            summary.overshoot_pct
        );
        assert_eq!(summary.settling_time, Some(0.5));
        assert!(summary.final_error.abs() < 1e-12);
        assert!((summary.peak_output - 10.0).abs() < 1e-12);
    }

    #[test]
    fn unsettled_trace_reports_none() {
        let trace = vec![s(0.0, 0.0, 5.0), s(0.1, 0.3, 5.0), s(0.2, 0.1, 5.0)];
        let summary = ResponseSummary::from_samples(&trace, 0.02);
        assert_eq!(summary.settling_time, None);
        assert_eq!(summary.rise_time, None);
    }

    #[test]
    fn json_output_is_valid() {
        let summary = ResponseSummary::from_samples(&step_trace(), 0.02);
        let config = LoopConfig { dt: 0.1, max_time: 0.6 };

        let mut buf = Vec::new();
        write_summary(&mut buf, "servo", &config, &summary).unwrap();
        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains("\"loop\""));
        assert!(json.contains("\"servo\""));
        assert!(json.contains("\"overshoot_pct\": 15.00"));
    }

    #[test]
    fn missing_metrics_serialize_as_null() {
        let summary = ResponseSummary {
            rise_time: None,
            overshoot_pct: 0.0,
            settling_time: None,
            final_error: 0.0,
            peak_output: 0.0,
        };

        let mut buf = Vec::new();
        write_summary(&mut buf, "flat", &LoopConfig::default(), &summary).unwrap();
        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains("\"rise_time_s\": null,"));
    }
}
