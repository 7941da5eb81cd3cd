use std::io::{self, Write};

use nalgebra::Vector3;

use crate::sim::runner::Sample;

/// Write a scalar response trace to CSV format.
///
/// Columns: time, target, measured, error, output
pub fn write_response<W: Write>(writer: &mut W, samples: &[Sample<f64>]) -> io::Result<()> {
    writeln!(writer, "time,target,measured,error,output")?;

    for s in samples {
        writeln!(
            writer,
            "{:.4},{:.6},{:.6},{:.6},{:.6}",
            s.time, s.target, s.measured, s.error, s.output
        )?;
    }

    Ok(())
}

/// Write a scalar response trace to a CSV file at the given path.
pub fn write_response_file(path: &str, samples: &[Sample<f64>]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_response(&mut file, samples)
}

/// Write a 3-axis response trace to CSV format, one column set per axis.
pub fn write_response3<W: Write>(
    writer: &mut W,
    samples: &[Sample<Vector3<f64>>],
) -> io::Result<()> {
    writeln!(
        writer,
        "time,target_x,target_y,target_z,\
         measured_x,measured_y,measured_z,\
         error_x,error_y,error_z,\
         output_x,output_y,output_z"
    )?;

    for s in samples {
        writeln!(
            writer,
            "{:.4},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},\
             {:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            s.time,
            s.target.x, s.target.y, s.target.z,
            s.measured.x, s.measured.y, s.measured.z,
            s.error.x, s.error.y, s.error.z,
            s.output.x, s.output.y, s.output.z,
        )?;
    }

    Ok(())
}

/// Write a 3-axis response trace to a CSV file at the given path.
pub fn write_response3_file(path: &str, samples: &[Sample<Vector3<f64>>]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_response3(&mut file, samples)
}
