//! # nemfile-records
//!
//! Assemble electricity-meter readings into AEMO NEM12 (interval) and
//! NEM13 (accumulated) record streams.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["IntervalRead"] -->|"bucket_days"| B["DayBucket"]
//!     B -->|"assign_slots"| C["Slot sequence"]
//!     C -->|"compress_runs"| D["EventRun partition"]
//!     D -->|"IntervalFile::add_readings"| E["200/300/400 records"]
//!     F["AccumulatedRead"] -->|"AccumulatedFile::add_reading"| G["250 records"]
//!     E -->|"NemFile::records"| H["100 .. 900 stream"]
//!     G -->|"NemFile::records"| H
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use nemfile_records::{ChannelConfig, IntervalFile, IntervalRead, NemFile};
//!
//! let mut file = IntervalFile::new("RETAILER", None);
//! let config = ChannelConfig::new("NMI123", "E1", "E1", "kWh");
//! let base = NaiveDate::from_ymd_opt(2004, 4, 18).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let reads: Vec<_> = (1..=48)
//!     .map(|i| IntervalRead::new(base + chrono::Duration::minutes(30 * i), 1.0).with_quality("A"))
//!     .collect();
//! file.add_readings(&config, &reads)?;
//! let records = file.records()?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `reading` | Interval reading input type |
//! | `channel` | Channel configuration and unit-of-measure defaults |
//! | `day` | Calendar-day bucketing and interval-length inference |
//! | `slots` | Slot assignment and missing-interval gap filling |
//! | `events` | Run-length compression of quality/event metadata |
//! | `record` | Typed records and their CSV column layouts |
//! | `interval` | NEM12 interval-file builder |
//! | `accumulated` | NEM13 accumulated-file builder |
//! | `table` | Timestamp-indexed tabular input adapter |
//! | `error` | Error types |

mod accumulated;
mod channel;
mod day;
mod error;
mod events;
mod interval;
mod reading;
mod record;
mod slots;
mod table;

pub use accumulated::{AccumulatedFile, AccumulatedRead, RegisterRead};
pub use channel::{ChannelConfig, default_uom};
pub use error::RecordError;
pub use interval::IntervalFile;
pub use reading::IntervalRead;
pub use record::{ChannelHeader, EventRecord, IntervalDay, NemFile, Record};
pub use table::{EVENT_DESC_COLUMN, QUALITY_COLUMN, ReadingTable};
