//! Export helpers for trajectory CSV and mission summary JSON artifacts.

pub mod trajectory {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use sail_motion::TrajectorySample;

    const HEADER: &str = "time_s,beta,distance_m";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard trajectory CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Write one sample row, matching the standard header ordering.
    pub fn write_sample(writer: &mut dyn Write, sample: &TrajectorySample) -> io::Result<()> {
        writeln!(
            writer,
            "{:.6},{:.9},{:.3}",
            sample.time_s, sample.beta, sample.distance_m
        )
    }

    /// Write the full trajectory with header.
    pub fn write_samples(writer: &mut dyn Write, samples: &[TrajectorySample]) -> io::Result<()> {
        write_header(writer)?;
        for sample in samples {
            write_sample(writer, sample)?;
        }
        Ok(())
    }
}

pub mod mission {
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use sail_model::summary::SailSummary;
    use sail_motion::TrajectorySample;
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    #[derive(Serialize)]
    struct MissionSidecar<'a> {
        sail: &'a SailSummary,
        final_beta: f64,
        final_distance_m: f64,
        samples: &'a [TrajectorySample],
    }

    /// Write the mission JSON sidecar: sail summary plus sampled trajectory.
    pub fn write_sidecar(
        output: &Path,
        summary: &SailSummary,
        samples: &[TrajectorySample],
    ) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let sidecar = MissionSidecar {
            sail: summary,
            final_beta: samples.last().map(|s| s.beta).unwrap_or_default(),
            final_distance_m: samples.last().map(|s| s.distance_m).unwrap_or_default(),
            samples,
        };
        to_writer_pretty(File::create(output)?, &sidecar)?;
        Ok(())
    }
}
