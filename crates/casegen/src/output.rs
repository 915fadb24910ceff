//! CSV and JSON writers for generated case batches.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::BatchCase;

pub const CSV_HEADER: &str = "name,body,rx_km,ry_km,rz_km,vx_km_s,vy_km_s,vz_km_s";

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

/// Write the batch as CSV: a fixed header, one row per case. Nine decimal
/// places keep sub-millimetre precision at body-radius scale.
pub fn write_cases_csv(writer: &mut dyn Write, cases: &[BatchCase]) -> io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for case in cases {
        writeln!(
            writer,
            "{},{},{:.9},{:.9},{:.9},{:.9},{:.9},{:.9}",
            case.name,
            case.body,
            case.position_km[0],
            case.position_km[1],
            case.position_km[2],
            case.velocity_km_s[0],
            case.velocity_km_s[1],
            case.velocity_km_s[2],
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
struct Manifest<'a> {
    total: usize,
    cases: &'a [BatchCase],
}

/// Write the batch as a pretty-printed JSON manifest.
pub fn write_manifest_json(writer: &mut dyn Write, cases: &[BatchCase]) -> io::Result<()> {
    let manifest = Manifest {
        total: cases.len(),
        cases,
    };
    to_writer_pretty(&mut *writer, &manifest)?;
    writeln!(writer)?;
    Ok(())
}
