//! NEM12 interval-file builder.
//!
//! Accumulates interval readings per metering-point channel, assembling
//! `200` channel headers, `300` day records, and `400` event records as
//! readings arrive. The final stream is produced by [`NemFile::records`].

use std::collections::{BTreeMap, HashMap};

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::channel::{ChannelConfig, default_uom};
use crate::day::{DayBucket, bucket_days};
use crate::error::RecordError;
use crate::events::compress_runs;
use crate::reading::IntervalRead;
use crate::record::{ChannelHeader, DATE_FMT, EventRecord, IntervalDay, NemFile, Record};
use crate::slots::assign_slots;
use crate::table::ReadingTable;

/// Quality-method written on a day whose intervals vary in quality or
/// event metadata; the per-run detail moves into `400` records.
const QUALITY_VARIABLE: &str = "V";

/// Interval length adopted for a day with a single reading, where no gap
/// can be observed.
const DEFAULT_FALLBACK_INTERVAL: u32 = 5;

/// Per-channel record list plus the last header emitted for it, used for
/// content de-duplication of `200` records.
#[derive(Debug, Default)]
struct Channel {
    records: Vec<Record>,
    last_header: Option<ChannelHeader>,
}

/// Builder for a NEM12 (interval metering data) file.
///
/// One instance accumulates readings for any number of metering points
/// and channels; requesting the record stream or a filename finalizes
/// nothing, so further readings may still be added afterwards.
///
/// Not safe for concurrent writers; wrap in external synchronization if
/// shared.
#[derive(Debug)]
pub struct IntervalFile {
    created: NaiveDateTime,
    from_participant: Option<String>,
    to_participant: String,
    fallback_interval: u32,
    meters: BTreeMap<String, BTreeMap<String, Channel>>,
    first_day: Option<NaiveDate>,
    last_day: Option<NaiveDate>,
}

impl IntervalFile {
    /// Creates an empty NEM12 builder addressed to `to_participant`.
    ///
    /// The file creation timestamp is captured now; use
    /// [`IntervalFile::with_created`] to pin it for deterministic output.
    pub fn new(to_participant: impl Into<String>, from_participant: Option<&str>) -> Self {
        Self {
            created: Local::now().naive_local(),
            from_participant: from_participant.map(str::to_string),
            to_participant: to_participant.into(),
            fallback_interval: DEFAULT_FALLBACK_INTERVAL,
            meters: BTreeMap::new(),
            first_day: None,
            last_day: None,
        }
    }

    /// Pins the file creation timestamp written into the `100` header.
    pub fn with_created(mut self, created: NaiveDateTime) -> Self {
        self.created = created;
        self
    }

    /// Sets the interval length, in minutes, adopted for single-reading
    /// days (default 5).
    pub fn with_fallback_interval(mut self, minutes: u32) -> Self {
        self.fallback_interval = minutes;
        self
    }

    /// Adds a batch of readings for one metering-point channel.
    ///
    /// Readings are bucketed by calendar day, each day's interval length
    /// is inferred from the minimum observed gap, missing slots are
    /// filled with the `0`/`"N"` sentinel, and quality/event runs are
    /// compressed into `400` records where the day is not uniform. A
    /// `200` header is appended only when its content differs from the
    /// previous header emitted for the channel.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NonPositiveInterval`] on duplicate end
    /// timestamps within a day, or [`RecordError::IndivisibleInterval`]
    /// when an inferred interval length does not divide a day. A failed
    /// call leaves the store untouched.
    pub fn add_readings(
        &mut self,
        config: &ChannelConfig,
        readings: &[IntervalRead],
    ) -> Result<(), RecordError> {
        self.add_readings_with_times(config, readings, None, None)
    }

    /// Like [`IntervalFile::add_readings`], with update and MSATS load
    /// timestamps written into the trailing `300` columns.
    pub fn add_readings_with_times(
        &mut self,
        config: &ChannelConfig,
        readings: &[IntervalRead],
        update_time: Option<NaiveDateTime>,
        load_time: Option<NaiveDateTime>,
    ) -> Result<(), RecordError> {
        let days = bucket_days(readings, self.fallback_interval)?;
        if days.is_empty() {
            return Ok(());
        }

        // Stage into a scratch channel so a failing day commits nothing.
        let mut staged = Channel {
            records: Vec::new(),
            last_header: self
                .meters
                .get(config.nmi())
                .and_then(|channels| channels.get(config.suffix()))
                .and_then(|channel| channel.last_header.clone()),
        };
        let mut first_day = self.first_day;
        let mut last_day = self.last_day;
        let n_days = days.len();
        for day in days {
            append_day(&mut staged, config, &day, update_time, load_time)?;
            match first_day {
                Some(first) if first <= day.date => {}
                _ => first_day = Some(day.date),
            }
            match last_day {
                Some(last) if last >= day.date => {}
                _ => last_day = Some(day.date),
            }
        }

        let channel = self
            .meters
            .entry(config.nmi().to_string())
            .or_default()
            .entry(config.suffix().to_string())
            .or_default();
        channel.records.append(&mut staged.records);
        channel.last_header = staged.last_header;
        self.first_day = first_day;
        self.last_day = last_day;

        debug!(
            nmi = config.nmi(),
            suffix = config.suffix(),
            n_readings = readings.len(),
            n_days,
            "added interval readings"
        );
        Ok(())
    }

    /// Adds every channel of a tabular reading set for one metering
    /// point.
    ///
    /// The configuration string is the concatenation of the table's
    /// channel names; units of measure come from `uoms`, falling back to
    /// the conventional mapping for energy suffixes.
    ///
    /// # Errors
    ///
    /// Propagates the per-channel errors of
    /// [`IntervalFile::add_readings`].
    pub fn add_table(
        &mut self,
        nmi: &str,
        table: &ReadingTable,
        uoms: &HashMap<String, String>,
        serial_number: Option<&str>,
    ) -> Result<(), RecordError> {
        let configuration = table.configuration();
        for (suffix, reads) in table.channels() {
            let uom = uoms
                .get(suffix)
                .map(String::as_str)
                .unwrap_or_else(|| default_uom(suffix));
            let mut config = ChannelConfig::new(nmi, &configuration, suffix, uom);
            if let Some(serial) = serial_number {
                config = config.with_serial_number(serial);
            }
            self.add_readings(&config, &reads)?;
        }
        Ok(())
    }
}

/// Appends one day's header (if changed), `300` record, and any `400`
/// records to a channel. Slots are assigned before anything is pushed,
/// so a rejected interval length never leaves a header without its day
/// record.
fn append_day(
    channel: &mut Channel,
    config: &ChannelConfig,
    day: &DayBucket,
    update_time: Option<NaiveDateTime>,
    load_time: Option<NaiveDateTime>,
) -> Result<(), RecordError> {
    let slots = assign_slots(day)?;
    let runs = compress_runs(&slots);
    let values = slots.iter().map(|s| s.value).collect();

    let mut events = Vec::new();
    let (quality_method, event_code, event_desc) = if runs.len() == 1 {
        let run = &runs[0];
        (
            run.quality.clone(),
            run.event_code.clone(),
            run.event_desc.clone(),
        )
    } else {
        for (i, run) in runs.iter().enumerate() {
            let end_pos = runs.get(i + 1).map_or(slots.len(), |next| next.start);
            events.push(Record::Event(EventRecord {
                start_pos: run.start + 1,
                end_pos,
                quality: run.quality.clone(),
                event_code: run.event_code.clone(),
                event_desc: run.event_desc.clone(),
            }));
        }
        (Some(QUALITY_VARIABLE.to_string()), None, None)
    };

    let header = ChannelHeader {
        nmi: config.nmi().to_string(),
        configuration: config.configuration().to_string(),
        register_id: config.register_id().map(str::to_string),
        suffix: config.suffix().to_string(),
        datastream_id: config.datastream_id().map(str::to_string),
        serial_number: config.serial_number().map(str::to_string),
        uom: config.uom().to_string(),
        interval_length: day.interval_length,
        next_scheduled_read: config.next_scheduled_read(),
    };
    if channel.last_header.as_ref() != Some(&header) {
        channel.records.push(Record::ChannelHeader(header.clone()));
    }
    channel.last_header = Some(header);

    channel.records.push(Record::IntervalDay(IntervalDay {
        date: day.date,
        values,
        quality_method,
        event_code,
        event_desc,
        update_time,
        load_time,
    }));
    channel.records.extend(events);
    Ok(())
}

impl NemFile for IntervalFile {
    fn records(&self) -> Result<Vec<Record>, RecordError> {
        if self.meters.is_empty() {
            return Err(RecordError::EmptyFile);
        }

        let mut records = vec![Record::FileHeader {
            version: "NEM12",
            created: self.created,
            from_participant: self.from_participant.clone(),
            to_participant: self.to_participant.clone(),
        }];
        for channels in self.meters.values() {
            for channel in channels.values() {
                records.extend(channel.records.iter().cloned());
            }
        }
        records.push(Record::EndOfData);
        Ok(records)
    }

    fn suggested_filename(&self) -> Result<String, RecordError> {
        let (Some(first), Some(last)) = (self.first_day, self.last_day) else {
            return Err(RecordError::EmptyFile);
        };
        let first = first.format(DATE_FMT);
        let last = last.format(DATE_FMT);
        let uid = match self.meters.first_key_value() {
            Some((nmi, _)) if self.meters.len() == 1 => format!("{nmi}_{first}_{last}"),
            _ => format!("{first}_{last}"),
        };
        let from = self.from_participant.as_deref().unwrap_or_default();
        Ok(format!("NEM12#{uid}#{from}#{}", self.to_participant))
    }
}
