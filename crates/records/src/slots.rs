//! Slot assignment and missing-interval gap filling.

use chrono::{Duration, Timelike};

use crate::day::DayBucket;
use crate::error::RecordError;

/// Minutes in one calendar day.
pub(crate) const MINUTES_PER_DAY: u32 = 1440;

/// Quality-method code for a missing interval.
pub(crate) const QUALITY_MISSING: &str = "N";

/// One fixed-width time slot of a day.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slot {
    pub value: f64,
    pub quality: Option<String>,
    pub event_code: Option<String>,
    pub event_desc: Option<String>,
}

impl Slot {
    /// The missing-interval sentinel: value 0, quality `"N"`, no events.
    ///
    /// The zero here is a placeholder, not a measured value; the quality
    /// code is what distinguishes it from a real zero-consumption read.
    fn missing() -> Self {
        Self {
            value: 0.0,
            quality: Some(QUALITY_MISSING.to_string()),
            event_code: None,
            event_desc: None,
        }
    }
}

/// Returns the number of slots in a day at the given interval length.
///
/// # Errors
///
/// Returns [`RecordError::IndivisibleInterval`] when `interval_length`
/// does not evenly divide 1440 minutes.
pub(crate) fn num_slots(interval_length: u32) -> Result<usize, RecordError> {
    if interval_length == 0 || MINUTES_PER_DAY % interval_length != 0 {
        return Err(RecordError::IndivisibleInterval {
            minutes: interval_length,
        });
    }
    Ok((MINUTES_PER_DAY / interval_length) as usize)
}

/// Places a day's readings into their time slots and fills uncovered
/// positions with the missing sentinel.
///
/// A reading's slot is derived from its interval start (`end` minus one
/// interval length): minutes-since-midnight divided by the interval
/// length, floored. When two readings land on the same slot the later one
/// in input order wins.
pub(crate) fn assign_slots(day: &DayBucket) -> Result<Vec<Slot>, RecordError> {
    let n = num_slots(day.interval_length)?;
    let mut slots: Vec<Option<Slot>> = vec![None; n];

    for read in &day.reads {
        let start = read.end() - Duration::minutes(i64::from(day.interval_length));
        let minutes = start.time().hour() * 60 + start.time().minute();
        let pos = (minutes / day.interval_length) as usize;
        slots[pos] = Some(Slot {
            value: read.value(),
            quality: read.quality().map(str::to_string),
            event_code: read.event_code().map(str::to_string),
            event_desc: read.event_desc().map(str::to_string),
        });
    }

    Ok(slots
        .into_iter()
        .map(|s| s.unwrap_or_else(Slot::missing))
        .collect())
}
