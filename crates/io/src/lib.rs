//! # nemfile-io
//!
//! Serialize NEM record streams to CSV files or zip-wrapped CSV
//! archives. Bridges the in-memory [`nemfile_records::Record`] stream
//! into on-disk interchange files.

mod archive;
mod csv_write;
mod error;
mod output;

pub use archive::write_zip;
pub use csv_write::{to_csv_string, write_csv};
pub use error::IoError;
pub use output::{output_csv, output_zip};
