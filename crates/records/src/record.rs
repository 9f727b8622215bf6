//! Typed NEM record-stream units and their fixed CSV column layouts.

use chrono::{NaiveDate, NaiveDateTime};

use crate::accumulated::AccumulatedRead;
use crate::error::RecordError;

/// `Date(8)` wire format.
pub(crate) const DATE_FMT: &str = "%Y%m%d";
/// `DateTime(12)` wire format, used for the file creation stamp.
pub(crate) const DATETIME_12_FMT: &str = "%Y%m%d%H%M";
/// `DateTime(14)` wire format, used for read and update/load timestamps.
pub(crate) const DATETIME_14_FMT: &str = "%Y%m%d%H%M%S";

/// One record of a NEM file, in emission order inside the record stream.
///
/// [`Record::fields`] produces the CSV fields for the row, including the
/// leading record indicator (`100`/`200`/`300`/`400`/`250`/`900`).
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// `100` file header.
    FileHeader {
        /// Format version tag, `"NEM12"` or `"NEM13"`.
        version: &'static str,
        /// File creation timestamp, written as `DateTime(12)`.
        created: NaiveDateTime,
        /// Sending participant code, empty when unset.
        from_participant: Option<String>,
        /// Receiving participant code.
        to_participant: String,
    },
    /// `200` channel header.
    ChannelHeader(ChannelHeader),
    /// `300` interval day record.
    IntervalDay(IntervalDay),
    /// `400` interval event record.
    Event(EventRecord),
    /// `250` accumulated read record.
    AccumulatedRead(Box<AccumulatedRead>),
    /// `900` end-of-data record.
    EndOfData,
}

/// Payload of a `200` channel header record.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelHeader {
    pub nmi: String,
    pub configuration: String,
    pub register_id: Option<String>,
    pub suffix: String,
    pub datastream_id: Option<String>,
    pub serial_number: Option<String>,
    pub uom: String,
    pub interval_length: u32,
    pub next_scheduled_read: Option<NaiveDate>,
}

/// Payload of a `300` interval day record.
///
/// `values` holds exactly `1440 / interval_length` entries, one per slot.
/// The trailing quality/event fields describe the whole day; when the
/// quality-method is `"V"` the detail lives in the following `400`
/// records instead.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalDay {
    pub date: NaiveDate,
    pub values: Vec<f64>,
    pub quality_method: Option<String>,
    pub event_code: Option<String>,
    pub event_desc: Option<String>,
    pub update_time: Option<NaiveDateTime>,
    pub load_time: Option<NaiveDateTime>,
}

/// Payload of a `400` interval event record.
///
/// Slot positions on the wire are 1-based: a run covering zero-based
/// slots `[start, end)` is written as `(start + 1, end)`.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub start_pos: usize,
    pub end_pos: usize,
    pub quality: Option<String>,
    pub event_code: Option<String>,
    pub event_desc: Option<String>,
}

impl Record {
    /// Returns the CSV fields for this record, absent values as empty
    /// strings.
    pub fn fields(&self) -> Vec<String> {
        match self {
            Record::FileHeader {
                version,
                created,
                from_participant,
                to_participant,
            } => vec![
                "100".to_string(),
                (*version).to_string(),
                created.format(DATETIME_12_FMT).to_string(),
                opt_str(from_participant),
                to_participant.clone(),
            ],
            Record::ChannelHeader(h) => vec![
                "200".to_string(),
                h.nmi.clone(),
                h.configuration.clone(),
                opt_str(&h.register_id),
                h.suffix.clone(),
                opt_str(&h.datastream_id),
                opt_str(&h.serial_number),
                h.uom.clone(),
                h.interval_length.to_string(),
                opt_date(h.next_scheduled_read),
            ],
            Record::IntervalDay(d) => {
                let mut fields = Vec::with_capacity(d.values.len() + 7);
                fields.push("300".to_string());
                fields.push(d.date.format(DATE_FMT).to_string());
                fields.extend(d.values.iter().map(|v| fmt_value(*v)));
                fields.push(opt_str(&d.quality_method));
                fields.push(opt_str(&d.event_code));
                fields.push(opt_str(&d.event_desc));
                fields.push(opt_datetime_14(d.update_time));
                fields.push(opt_datetime_14(d.load_time));
                fields
            }
            Record::Event(e) => vec![
                "400".to_string(),
                e.start_pos.to_string(),
                e.end_pos.to_string(),
                opt_str(&e.quality),
                opt_str(&e.event_code),
                opt_str(&e.event_desc),
            ],
            Record::AccumulatedRead(r) => r.fields(),
            Record::EndOfData => vec!["900".to_string()],
        }
    }
}

/// Common surface of the NEM12 and NEM13 builders; the seam the
/// serialization layer writes through.
pub trait NemFile {
    /// Builds the complete ordered record stream: file header, channel
    /// groups sorted by metering point then channel, end-of-data trailer.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::EmptyFile`] when no readings were added.
    fn records(&self) -> Result<Vec<Record>, RecordError>;

    /// Returns the suggested output file name, without an extension.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::EmptyFile`] when no readings were added.
    fn suggested_filename(&self) -> Result<String, RecordError>;
}

pub(crate) fn opt_str(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub(crate) fn opt_date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format(DATE_FMT).to_string())
        .unwrap_or_default()
}

pub(crate) fn opt_datetime_14(value: Option<NaiveDateTime>) -> String {
    value
        .map(|t| t.format(DATETIME_14_FMT).to_string())
        .unwrap_or_default()
}

/// Formats a reading value: integral values (including the missing
/// sentinel 0) drop the fractional part to keep the file small.
pub(crate) fn fmt_value(value: f64) -> String {
    value.to_string()
}
