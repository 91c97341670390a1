//! CSV sink for ranked candidates.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::ExportError;
use crate::model::Candidate;

/// Writes a header row and one row per candidate, in the given order.
pub fn write_csv<W: Write>(writer: W, candidates: &[Candidate]) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(writer);
    if candidates.is_empty() {
        // serde only emits the header alongside the first record
        wtr.write_record(HEADER)?;
    }
    for c in candidates {
        wtr.serialize(c)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_csv(path: impl AsRef<Path>, candidates: &[Candidate]) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(file, candidates)?;
    info!(path = %path.display(), rows = candidates.len(), "wrote candidates csv");
    Ok(())
}

pub const HEADER: [&str; 8] = [
    "name",
    "position",
    "ready_to_work",
    "education",
    "additional_education",
    "skills",
    "english",
    "url",
];
