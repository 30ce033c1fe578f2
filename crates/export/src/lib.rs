//! Export helpers for leg archives (JSON) and per-segment reports (CSV).

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors raised while exporting or importing legs.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed leg archive: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported leg archive version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("archived leg is invalid: {0}")]
    Invalid(#[from] sf_lowthrust::ConfigurationError),
}

/// Create a buffered writer for the target path, handling stdout (`-`) by convention.
///
/// Missing parent directories are created.
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

pub mod leg {
    use std::io::{Read, Write};

    use serde::{Deserialize, Serialize};
    use serde_json::{from_reader, to_writer_pretty};
    use sf_core::{Epoch, StateVector};
    use sf_lowthrust::{Leg, ThrottleSegment};
    use sf_propulsion::Spacecraft;

    use super::ExportError;

    /// Version tag written into every archive.
    pub const ARCHIVE_VERSION: u32 = 1;

    #[derive(Serialize)]
    struct ArchiveOut<'a> {
        version: u32,
        leg: LegFieldsOut<'a>,
    }

    #[derive(Serialize)]
    struct LegFieldsOut<'a> {
        t_i: Epoch,
        x_i: &'a StateVector,
        throttles: &'a [ThrottleSegment],
        t_f: Epoch,
        x_f: &'a StateVector,
        spacecraft: &'a Spacecraft,
        mu: f64,
    }

    #[derive(Deserialize)]
    struct ArchiveIn {
        version: u32,
        leg: LegFieldsIn,
    }

    #[derive(Deserialize)]
    struct LegFieldsIn {
        t_i: Epoch,
        x_i: StateVector,
        throttles: Vec<ThrottleSegment>,
        t_f: Epoch,
        x_f: StateVector,
        spacecraft: Spacecraft,
        mu: f64,
    }

    /// Write the full field set of `leg` as a versioned JSON archive.
    pub fn write_json<W: Write>(mut writer: W, leg: &Leg) -> Result<(), ExportError> {
        let archive = ArchiveOut {
            version: ARCHIVE_VERSION,
            leg: LegFieldsOut {
                t_i: leg.t_i(),
                x_i: leg.x_i(),
                throttles: leg.throttles(),
                t_f: leg.t_f(),
                x_f: leg.x_f(),
                spacecraft: leg.spacecraft(),
                mu: leg.mu(),
            },
        };
        to_writer_pretty(&mut writer, &archive)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a leg archive, re-applying the configuration checks of [`Leg::new`].
    pub fn read_json<R: Read>(reader: R) -> Result<Leg, ExportError> {
        let archive: ArchiveIn = from_reader(reader)?;
        if archive.version != ARCHIVE_VERSION {
            return Err(ExportError::UnsupportedVersion {
                found: archive.version,
                expected: ARCHIVE_VERSION,
            });
        }
        let fields = archive.leg;
        Ok(Leg::new(
            fields.t_i,
            fields.x_i,
            fields.throttles,
            fields.t_f,
            fields.x_f,
            fields.spacecraft,
            fields.mu,
        )?)
    }
}

pub mod segments {
    use std::io::{self, Write};

    use sf_lowthrust::Leg;

    const HEADER: &str = "index,start_mjd2000,end_mjd2000,x,y,z,magnitude,constraint";

    /// Write one CSV row per throttle segment, preceded by the header.
    pub fn write_csv(writer: &mut dyn Write, leg: &Leg) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)?;
        let constraints = leg.throttle_constraints();
        for (index, (segment, constraint)) in leg.throttles().iter().zip(constraints).enumerate() {
            let [x, y, z] = *segment.value();
            writeln!(
                writer,
                "{},{},{},{:.9},{:.9},{:.9},{:.9},{:.9}",
                index,
                segment.start().mjd2000(),
                segment.end().mjd2000(),
                x,
                y,
                z,
                segment.norm(),
                constraint,
            )?;
        }
        writer.flush()
    }
}
