//! High-level output orchestration over the `NemFile` seam.

use std::path::{Path, PathBuf};

use nemfile_records::NemFile;
use tracing::info;

use crate::archive::write_zip;
use crate::csv_write::write_csv;
use crate::error::IoError;

/// Writes a NEM file as CSV, deriving the destination from the builder's
/// suggested filename when no path is given.
///
/// The record stream is built before the destination is resolved, so an
/// empty builder fails without creating or truncating any file.
///
/// # Errors
///
/// Returns [`IoError::Record`] when the builder holds no readings, or
/// the serialization errors of [`write_csv`].
pub fn output_csv(file: &impl NemFile, path: Option<&Path>) -> Result<PathBuf, IoError> {
    let records = file.records()?;
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(format!("{}.csv", file.suggested_filename()?)),
    };
    write_csv(&path, &records)?;
    info!(path = %path.display(), n_records = records.len(), "wrote NEM csv");
    Ok(path)
}

/// Writes a NEM file as a zip-wrapped CSV, deriving the destination from
/// the builder's suggested filename when no path is given.
///
/// # Errors
///
/// Returns [`IoError::Record`] when the builder holds no readings, or
/// the serialization errors of [`write_zip`].
pub fn output_zip(file: &impl NemFile, path: Option<&Path>) -> Result<PathBuf, IoError> {
    let records = file.records()?;
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(format!("{}.zip", file.suggested_filename()?)),
    };
    write_zip(&path, &records)?;
    info!(path = %path.display(), n_records = records.len(), "wrote NEM zip");
    Ok(path)
}
