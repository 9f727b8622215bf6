//! CSV encoding of NEM record streams.

use std::fs;
use std::path::Path;

use nemfile_records::Record;

use crate::error::IoError;

/// Encodes a record stream as CSV text, one row per record.
///
/// Rows vary in field count by record type, so the writer runs in
/// flexible mode; fields are quoted only when they contain a delimiter,
/// matching the minimal-quoting convention of NEM files. Lines end in
/// CRLF, the terminator the wire format uses.
///
/// # Errors
///
/// Returns [`IoError::Csv`] if encoding fails.
pub fn to_csv_string(records: &[Record]) -> Result<String, IoError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    for record in records {
        writer.write_record(record.fields())?;
    }
    let bytes = writer.into_inner().map_err(|e| IoError::Csv {
        reason: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| IoError::Csv {
        reason: e.to_string(),
    })
}

/// Writes a record stream to a CSV file.
///
/// The stream is encoded fully in memory before the destination is
/// touched, so an encoding failure never leaves a partial file behind.
///
/// # Errors
///
/// Returns [`IoError::Csv`] on encoding failure or [`IoError::Io`] on
/// filesystem failure.
pub fn write_csv(path: &Path, records: &[Record]) -> Result<(), IoError> {
    let text = to_csv_string(records)?;
    fs::write(path, text)?;
    Ok(())
}
