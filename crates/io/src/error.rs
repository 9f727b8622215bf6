//! Error types for nemfile-io.

use nemfile_records::RecordError;

/// Error type for all fallible operations in the nemfile-io crate.
///
/// This enum covers CSV encoding failures, zip archive failures, plain
/// file I/O, and record-assembly errors surfaced while building the
/// stream to serialize.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Wraps an error from the CSV encoder.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps an error from the zip archive writer.
    #[error("zip error: {reason}")]
    Zip {
        /// Description of the underlying zip failure.
        reason: String,
    },

    /// Wraps an error from the record-assembly layer.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Wraps a filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for IoError {
    fn from(e: zip::result::ZipError) -> Self {
        IoError::Zip {
            reason: e.to_string(),
        }
    }
}
