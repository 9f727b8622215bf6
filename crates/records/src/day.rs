//! Calendar-day bucketing and interval-length inference.

use chrono::{Duration, NaiveDate};

use crate::error::RecordError;
use crate::reading::IntervalRead;

/// One calendar day of readings with its inferred interval length.
#[derive(Debug, Clone)]
pub(crate) struct DayBucket {
    pub date: NaiveDate,
    pub interval_length: u32,
    pub reads: Vec<IntervalRead>,
}

/// Groups readings into calendar-day buckets and infers each day's
/// interval length.
///
/// A reading belongs to the calendar date of its interval *start*, so the
/// date is taken a few seconds before `end`: a reading ending exactly at
/// midnight lands on the prior day. Buckets appear in first-seen order and
/// keep their readings in input order, which the slot assigner relies on
/// for deterministic overwrite behaviour.
///
/// The interval length of a day is the minimum gap in whole minutes
/// between consecutive readings sorted by end timestamp. A day with a
/// single reading has no observable gap and adopts `fallback_minutes`.
///
/// # Errors
///
/// Returns [`RecordError::NonPositiveInterval`] when two readings in one
/// day share an end timestamp, which makes the minimum gap zero.
pub(crate) fn bucket_days(
    reads: &[IntervalRead],
    fallback_minutes: u32,
) -> Result<Vec<DayBucket>, RecordError> {
    let mut grouped: Vec<(NaiveDate, Vec<IntervalRead>)> = Vec::new();

    for read in reads {
        let date = (read.end() - Duration::seconds(5)).date();
        match grouped.iter_mut().find(|(d, _)| *d == date) {
            Some((_, bucket)) => bucket.push(read.clone()),
            None => grouped.push((date, vec![read.clone()])),
        }
    }

    grouped
        .into_iter()
        .map(|(date, reads)| {
            let interval_length = infer_interval(&reads, fallback_minutes)?;
            Ok(DayBucket {
                date,
                interval_length,
                reads,
            })
        })
        .collect()
}

/// Infers a day's interval length as the minimum successive gap in whole
/// minutes, falling back when only one reading exists.
fn infer_interval(reads: &[IntervalRead], fallback_minutes: u32) -> Result<u32, RecordError> {
    let mut ends: Vec<_> = reads.iter().map(IntervalRead::end).collect();
    ends.sort_unstable();

    let minutes = ends
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_minutes())
        .min();

    match minutes {
        None => Ok(fallback_minutes),
        Some(m) if m > 0 => Ok(m as u32),
        Some(m) => Err(RecordError::NonPositiveInterval { minutes: m }),
    }
}
