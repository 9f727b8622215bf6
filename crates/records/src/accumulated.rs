//! NEM13 accumulated (register-read) file builder.
//!
//! Each added reading maps directly onto one `250` record; there is no
//! day bucketing, slot filling, or run-length logic here.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::RecordError;
use crate::record::{
    DATE_FMT, DATETIME_14_FMT, NemFile, Record, fmt_value, opt_date, opt_datetime_14, opt_str,
};

/// One side of a register-read pair: the value shown on the register at
/// an instant, with its quality and reason metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterRead {
    value: f64,
    time: NaiveDateTime,
    quality_method: Option<String>,
    reason_code: Option<String>,
    reason_desc: Option<String>,
}

impl RegisterRead {
    /// Creates a register read with no quality or reason metadata.
    pub fn new(value: f64, time: NaiveDateTime) -> Self {
        Self {
            value,
            time,
            quality_method: None,
            reason_code: None,
            reason_desc: None,
        }
    }

    /// Sets the quality-method code.
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality_method = Some(quality.into());
        self
    }

    /// Sets the reason code.
    pub fn with_reason_code(mut self, code: impl Into<String>) -> Self {
        self.reason_code = Some(code.into());
        self
    }

    /// Sets the reason description.
    pub fn with_reason_desc(mut self, desc: impl Into<String>) -> Self {
        self.reason_desc = Some(desc.into());
        self
    }

    /// Returns the read timestamp.
    pub fn time(&self) -> NaiveDateTime {
        self.time
    }
}

/// One accumulated meter reading, written as a `250` record.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatedRead {
    nmi: String,
    configuration: String,
    suffix: String,
    register_id: Option<String>,
    datastream_id: Option<String>,
    serial_number: Option<String>,
    direction_indicator: String,
    previous: RegisterRead,
    current: RegisterRead,
    quantity: f64,
    uom: String,
    next_scheduled_read: Option<NaiveDate>,
    update_time: Option<NaiveDateTime>,
    load_time: Option<NaiveDateTime>,
}

impl AccumulatedRead {
    /// Creates an accumulated read from the mandatory fields.
    ///
    /// Direction defaults to `"E"` (export to grid accounting) and the
    /// unit of measure to `"kWh"`.
    pub fn new(
        nmi: impl Into<String>,
        configuration: impl Into<String>,
        suffix: impl Into<String>,
        previous: RegisterRead,
        current: RegisterRead,
        quantity: f64,
    ) -> Self {
        Self {
            nmi: nmi.into(),
            configuration: configuration.into(),
            suffix: suffix.into(),
            register_id: None,
            datastream_id: None,
            serial_number: None,
            direction_indicator: "E".to_string(),
            previous,
            current,
            quantity,
            uom: "kWh".to_string(),
            next_scheduled_read: None,
            update_time: None,
            load_time: None,
        }
    }

    /// Sets the register identifier.
    pub fn with_register_id(mut self, id: impl Into<String>) -> Self {
        self.register_id = Some(id.into());
        self
    }

    /// Sets the MDM datastream identifier.
    pub fn with_datastream_id(mut self, id: impl Into<String>) -> Self {
        self.datastream_id = Some(id.into());
        self
    }

    /// Sets the meter serial number.
    pub fn with_serial_number(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    /// Sets the direction indicator (`"E"` or `"I"`).
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction_indicator = direction.into();
        self
    }

    /// Sets the unit of measure.
    pub fn with_uom(mut self, uom: impl Into<String>) -> Self {
        self.uom = uom.into();
        self
    }

    /// Sets the next scheduled read date.
    pub fn with_next_scheduled_read(mut self, date: NaiveDate) -> Self {
        self.next_scheduled_read = Some(date);
        self
    }

    /// Sets the update timestamp.
    pub fn with_update_time(mut self, time: NaiveDateTime) -> Self {
        self.update_time = Some(time);
        self
    }

    /// Sets the MSATS load timestamp.
    pub fn with_load_time(mut self, time: NaiveDateTime) -> Self {
        self.load_time = Some(time);
        self
    }

    /// Returns the metering point identifier.
    pub fn nmi(&self) -> &str {
        &self.nmi
    }

    /// Returns the channel/register suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Returns the previous register read.
    pub fn previous(&self) -> &RegisterRead {
        &self.previous
    }

    /// Returns the current register read.
    pub fn current(&self) -> &RegisterRead {
        &self.current
    }

    /// Returns the CSV fields of the `250` record.
    pub(crate) fn fields(&self) -> Vec<String> {
        vec![
            "250".to_string(),
            self.nmi.clone(),
            self.configuration.clone(),
            opt_str(&self.register_id),
            self.suffix.clone(),
            opt_str(&self.datastream_id),
            opt_str(&self.serial_number),
            self.direction_indicator.clone(),
            fmt_value(self.previous.value),
            self.previous.time.format(DATETIME_14_FMT).to_string(),
            opt_str(&self.previous.quality_method),
            opt_str(&self.previous.reason_code),
            opt_str(&self.previous.reason_desc),
            fmt_value(self.current.value),
            self.current.time.format(DATETIME_14_FMT).to_string(),
            opt_str(&self.current.quality_method),
            opt_str(&self.current.reason_code),
            opt_str(&self.current.reason_desc),
            fmt_value(self.quantity),
            self.uom.clone(),
            opt_date(self.next_scheduled_read),
            opt_datetime_14(self.update_time),
            opt_datetime_14(self.load_time),
        ]
    }
}

/// Builder for a NEM13 (accumulated metering data) file.
///
/// Not safe for concurrent writers; wrap in external synchronization if
/// shared.
#[derive(Debug)]
pub struct AccumulatedFile {
    created: NaiveDateTime,
    from_participant: Option<String>,
    to_participant: String,
    meters: BTreeMap<String, BTreeMap<String, Vec<AccumulatedRead>>>,
}

impl AccumulatedFile {
    /// Creates an empty NEM13 builder addressed to `to_participant`.
    pub fn new(to_participant: impl Into<String>, from_participant: Option<&str>) -> Self {
        Self {
            created: Local::now().naive_local(),
            from_participant: from_participant.map(str::to_string),
            to_participant: to_participant.into(),
            meters: BTreeMap::new(),
        }
    }

    /// Pins the file creation timestamp written into the `100` header.
    pub fn with_created(mut self, created: NaiveDateTime) -> Self {
        self.created = created;
        self
    }

    /// Appends one accumulated reading to its metering-point channel.
    pub fn add_reading(&mut self, read: AccumulatedRead) {
        debug!(nmi = read.nmi(), suffix = read.suffix(), "added register read");
        self.meters
            .entry(read.nmi.clone())
            .or_default()
            .entry(read.suffix.clone())
            .or_default()
            .push(read);
    }
}

impl NemFile for AccumulatedFile {
    fn records(&self) -> Result<Vec<Record>, RecordError> {
        if self.meters.is_empty() {
            return Err(RecordError::EmptyFile);
        }

        let mut records = vec![Record::FileHeader {
            version: "NEM13",
            created: self.created,
            from_participant: self.from_participant.clone(),
            to_participant: self.to_participant.clone(),
        }];
        for channels in self.meters.values() {
            for reads in channels.values() {
                records.extend(
                    reads
                        .iter()
                        .map(|r| Record::AccumulatedRead(Box::new(r.clone()))),
                );
            }
        }
        records.push(Record::EndOfData);
        Ok(records)
    }

    fn suggested_filename(&self) -> Result<String, RecordError> {
        let (nmi, channels) = self.meters.first_key_value().ok_or(RecordError::EmptyFile)?;
        let reads = channels.first_key_value().map(|(_, r)| r).ok_or(RecordError::EmptyFile)?;
        let (first, last) = match (reads.first(), reads.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(RecordError::EmptyFile),
        };

        let start = first.previous.time.format(DATE_FMT);
        let end = last.current.time.format(DATE_FMT);
        let uid = if self.meters.len() == 1 {
            format!("{nmi}_{start}_{end}")
        } else {
            format!("{start}_{end}")
        };
        let from = self.from_participant.as_deref().unwrap_or_default();
        Ok(format!("NEM13#{uid}#{from}#{}", self.to_participant))
    }
}
