//! Tabular input adapter for interval readings.
//!
//! Mirrors the timestamp-indexed table shape callers often hold: one
//! column of interval-end timestamps, one value column per channel, and
//! the reserved `Quality` / `EventDesc` columns applying row-wise across
//! all channels.

use chrono::NaiveDateTime;

use crate::error::RecordError;
use crate::reading::IntervalRead;

/// Column name carrying per-row quality-method codes.
pub const QUALITY_COLUMN: &str = "Quality";
/// Column name carrying per-row event descriptions.
pub const EVENT_DESC_COLUMN: &str = "EventDesc";

/// Quality-method assumed when a table has no `Quality` column.
const QUALITY_ACTUAL: &str = "A";

/// A timestamp-indexed table of interval readings for one metering point.
///
/// Channels may cover different subsets of the timestamp index: an empty
/// cell (`None`) means the channel has no reading at that instant, which
/// lets channels of different interval lengths share one table.
#[derive(Debug, Clone, Default)]
pub struct ReadingTable {
    times: Vec<NaiveDateTime>,
    channels: Vec<(String, Vec<Option<f64>>)>,
    qualities: Option<Vec<String>>,
    event_descs: Option<Vec<Option<String>>>,
}

impl ReadingTable {
    /// Creates a table over the given interval-end timestamp index.
    pub fn new(times: Vec<NaiveDateTime>) -> Self {
        Self {
            times,
            channels: Vec::new(),
            qualities: None,
            event_descs: None,
        }
    }

    /// Adds a channel value column.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::ColumnLength`] when the column length does
    /// not match the timestamp index.
    pub fn add_channel(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<(), RecordError> {
        let name = name.into();
        self.check_len(&name, values.len())?;
        self.channels.push((name, values));
        Ok(())
    }

    /// Sets the per-row quality-method column.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::ColumnLength`] on a length mismatch.
    pub fn set_qualities(&mut self, qualities: Vec<String>) -> Result<(), RecordError> {
        self.check_len(QUALITY_COLUMN, qualities.len())?;
        self.qualities = Some(qualities);
        Ok(())
    }

    /// Sets the per-row event-description column.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::ColumnLength`] on a length mismatch.
    pub fn set_event_descs(&mut self, descs: Vec<Option<String>>) -> Result<(), RecordError> {
        self.check_len(EVENT_DESC_COLUMN, descs.len())?;
        self.event_descs = Some(descs);
        Ok(())
    }

    fn check_len(&self, column: &str, got: usize) -> Result<(), RecordError> {
        if got != self.times.len() {
            return Err(RecordError::ColumnLength {
                column: column.to_string(),
                expected: self.times.len(),
                got,
            });
        }
        Ok(())
    }

    /// Returns the NMI configuration string: the channel names joined in
    /// column order.
    pub fn configuration(&self) -> String {
        self.channels
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Returns each channel with its readings, skipping empty cells.
    ///
    /// Quality defaults to `"A"` when the table carries no `Quality`
    /// column; event codes are never populated from tables.
    pub fn channels(&self) -> impl Iterator<Item = (&str, Vec<IntervalRead>)> {
        self.channels.iter().map(|(name, values)| {
            let reads = values
                .iter()
                .enumerate()
                .filter_map(|(i, value)| value.map(|v| self.read_at(i, v)))
                .collect();
            (name.as_str(), reads)
        })
    }

    fn read_at(&self, row: usize, value: f64) -> IntervalRead {
        let quality = self
            .qualities
            .as_ref()
            .map_or(QUALITY_ACTUAL, |q| q[row].as_str());
        let mut read = IntervalRead::new(self.times[row], value).with_quality(quality);
        if let Some(descs) = &self.event_descs
            && let Some(desc) = &descs[row]
        {
            read = read.with_event_desc(desc);
        }
        read
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn times(n: usize, step: u32) -> Vec<NaiveDateTime> {
        let base = NaiveDate::from_ymd_opt(2004, 4, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (1..=n)
            .map(|i| base + chrono::Duration::minutes(i64::from(step * i as u32)))
            .collect()
    }

    #[test]
    fn configuration_joins_channel_names() {
        let mut table = ReadingTable::new(times(2, 30));
        table.add_channel("E1", vec![Some(1.0), Some(2.0)]).unwrap();
        table.add_channel("B1", vec![Some(0.5), None]).unwrap();
        assert_eq!(table.configuration(), "E1B1");
    }

    #[test]
    fn quality_defaults_to_actual() {
        let mut table = ReadingTable::new(times(2, 30));
        table.add_channel("E1", vec![Some(1.0), Some(2.0)]).unwrap();
        let (_, reads) = table.channels().next().unwrap();
        assert!(reads.iter().all(|r| r.quality() == Some("A")));
    }

    #[test]
    fn quality_column_applies_row_wise() {
        let mut table = ReadingTable::new(times(2, 30));
        table.add_channel("E1", vec![Some(1.0), Some(2.0)]).unwrap();
        table
            .set_qualities(vec!["A".to_string(), "E".to_string()])
            .unwrap();
        let (_, reads) = table.channels().next().unwrap();
        assert_eq!(reads[0].quality(), Some("A"));
        assert_eq!(reads[1].quality(), Some("E"));
    }

    #[test]
    fn event_desc_column_is_optional_per_row() {
        let mut table = ReadingTable::new(times(2, 30));
        table.add_channel("E1", vec![Some(1.0), Some(2.0)]).unwrap();
        table
            .set_event_descs(vec![None, Some("estimate".to_string())])
            .unwrap();
        let (_, reads) = table.channels().next().unwrap();
        assert_eq!(reads[0].event_desc(), None);
        assert_eq!(reads[1].event_desc(), Some("estimate"));
    }

    #[test]
    fn empty_cells_are_skipped() {
        let mut table = ReadingTable::new(times(3, 30));
        table
            .add_channel("E1", vec![Some(1.0), None, Some(3.0)])
            .unwrap();
        let (_, reads) = table.channels().next().unwrap();
        assert_eq!(reads.len(), 2);
        assert_eq!(reads[0].value(), 1.0);
        assert_eq!(reads[1].value(), 3.0);
    }

    #[test]
    fn column_length_mismatch_errors() {
        let mut table = ReadingTable::new(times(3, 30));
        let err = table.add_channel("E1", vec![Some(1.0)]).unwrap_err();
        assert_eq!(
            err,
            RecordError::ColumnLength {
                column: "E1".to_string(),
                expected: 3,
                got: 1,
            }
        );
    }
}
