//! Zip packaging of a serialized NEM file.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use nemfile_records::Record;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::csv_write::to_csv_string;
use crate::error::IoError;

/// Writes a record stream into a zip archive holding one
/// deflate-compressed CSV entry named after the archive's base name.
///
/// The CSV text is encoded fully in memory before the archive is
/// created, so an encoding failure never leaves a partial file behind.
///
/// # Errors
///
/// Returns [`IoError::Csv`] on encoding failure, [`IoError::Zip`] on
/// archive failure, or [`IoError::Io`] on filesystem failure.
pub fn write_zip(path: &Path, records: &[Record]) -> Result<(), IoError> {
    let text = to_csv_string(records)?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("nemfile");

    let file = File::create(path)?;
    let mut archive = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    archive.start_file(format!("{stem}.csv"), options)?;
    archive.write_all(text.as_bytes())?;
    archive.finish()?;
    Ok(())
}
