//! Error types for the nemfile-records crate.

/// Error type for all fallible operations in the nemfile-records crate.
///
/// This enum covers interval-length configuration failures discovered while
/// assembling day records, shape mismatches in tabular input, and the
/// empty-store condition raised when output is requested before any
/// readings were added.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// Returned when an interval length does not evenly divide a 1440-minute day.
    #[error("interval length {minutes} min does not divide a 1440 min day")]
    IndivisibleInterval {
        /// The offending interval length in minutes.
        minutes: u32,
    },

    /// Returned when the inferred interval length is zero or negative.
    ///
    /// This happens when a day contains two readings with the same end
    /// timestamp, making the minimum observed gap zero.
    #[error("inferred interval length {minutes} min is not positive")]
    NonPositiveInterval {
        /// The inferred (invalid) interval length in minutes.
        minutes: i64,
    },

    /// Returned when a tabular column does not match the timestamp index length.
    #[error("column '{column}' has {got} rows, expected {expected}")]
    ColumnLength {
        /// Name of the mismatched column.
        column: String,
        /// Number of rows in the timestamp index.
        expected: usize,
        /// Number of rows in the column.
        got: usize,
    },

    /// Returned when output is requested from a file with no readings.
    #[error("no readings have been added, refusing to build an empty file")]
    EmptyFile,
}
