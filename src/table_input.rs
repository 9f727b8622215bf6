//! CSV parsing of tabular reading input.
//!
//! Interval input is a timestamp-indexed table: the first column holds
//! interval-end timestamps, every other column is a channel except the
//! reserved `Quality` and `EventDesc` columns. Accumulated input holds
//! one register-read pair per row, addressed by header names.
//!
//! A row missing its mandatory timestamp or value aborts the whole
//! conversion; silently skipping rows would produce a structurally valid
//! but incomplete file.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use nemfile_records::{
    AccumulatedRead, EVENT_DESC_COLUMN, QUALITY_COLUMN, ReadingTable, RegisterRead,
};

/// Accepted timestamp spellings, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y%m%d%H%M%S",
    "%Y%m%d%H%M",
];

fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .ok_or_else(|| anyhow!("unrecognized timestamp: {text:?}"))
}

/// Reads an interval-reading table from a CSV file.
pub fn read_interval_table(path: &Path) -> Result<ReadingTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open input: {}", path.display()))?;
    let headers = reader.headers()?.clone();
    if headers.len() < 2 {
        bail!("input needs a timestamp column and at least one channel column");
    }

    let rows: Vec<StringRecord> = reader.records().collect::<Result<_, _>>()?;

    let mut times = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let cell = row
            .get(0)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| anyhow!("row {}: missing timestamp", i + 2))?;
        times.push(parse_timestamp(cell).with_context(|| format!("row {}", i + 2))?);
    }

    let mut table = ReadingTable::new(times);
    for (col, name) in headers.iter().enumerate().skip(1) {
        let cells = rows.iter().map(|row| row.get(col).unwrap_or(""));
        match name {
            QUALITY_COLUMN => {
                let qualities = cells
                    .map(|c| if c.is_empty() { "A" } else { c }.to_string())
                    .collect();
                table.set_qualities(qualities)?;
            }
            EVENT_DESC_COLUMN => {
                let descs = cells
                    .map(|c| (!c.is_empty()).then(|| c.to_string()))
                    .collect();
                table.set_event_descs(descs)?;
            }
            _ => {
                let values = cells
                    .enumerate()
                    .map(|(i, c)| {
                        if c.is_empty() {
                            Ok(None)
                        } else {
                            c.parse::<f64>()
                                .map(Some)
                                .with_context(|| format!("row {}: column {name:?}: {c:?}", i + 2))
                        }
                    })
                    .collect::<Result<Vec<_>>>()?;
                table.add_channel(name, values)?;
            }
        }
    }
    Ok(table)
}

/// Reads accumulated register-read rows from a CSV file.
pub fn read_accumulated_rows(path: &Path) -> Result<Vec<AccumulatedRead>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open input: {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let required = |name: &'static str| {
        column(name).ok_or_else(|| anyhow!("input is missing the {name:?} column"))
    };

    let nmi = required("nmi")?;
    let configuration = required("configuration")?;
    let suffix = required("suffix")?;
    let previous_read = required("previous_read")?;
    let previous_date = required("previous_read_date")?;
    let current_read = required("current_read")?;
    let current_date = required("current_read_date")?;
    let quantity = required("quantity")?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let cell = |col: usize| record.get(col).unwrap_or("");
        let opt_cell = |name: &str| column(name).map(cell).filter(|c| !c.is_empty());
        let float = |col: usize| {
            cell(col)
                .parse::<f64>()
                .with_context(|| format!("row {}: {:?} is not a number", i + 2, cell(col)))
        };

        let previous = register_read(
            float(previous_read)?,
            cell(previous_date),
            opt_cell("previous_quality_method"),
        )
        .with_context(|| format!("row {}", i + 2))?;
        let current = register_read(
            float(current_read)?,
            cell(current_date),
            opt_cell("current_quality_method"),
        )
        .with_context(|| format!("row {}", i + 2))?;

        let mut read = AccumulatedRead::new(
            cell(nmi),
            cell(configuration),
            cell(suffix),
            previous,
            current,
            float(quantity)?,
        );
        if let Some(id) = opt_cell("register_id") {
            read = read.with_register_id(id);
        }
        if let Some(serial) = opt_cell("serial_number") {
            read = read.with_serial_number(serial);
        }
        if let Some(direction) = opt_cell("direction_indicator") {
            read = read.with_direction(direction);
        }
        if let Some(uom) = opt_cell("uom") {
            read = read.with_uom(uom);
        }
        if let Some(next) = opt_cell("next_scheduled_read") {
            let date = NaiveDate::parse_from_str(next, "%Y%m%d")
                .or_else(|_| NaiveDate::parse_from_str(next, "%Y-%m-%d"))
                .with_context(|| format!("row {}: unrecognized date: {next:?}", i + 2))?;
            read = read.with_next_scheduled_read(date);
        }
        rows.push(read);
    }
    Ok(rows)
}

fn register_read(value: f64, date: &str, quality: Option<&str>) -> Result<RegisterRead> {
    let mut read = RegisterRead::new(value, parse_timestamp(date)?);
    if let Some(quality) = quality {
        read = read.with_quality(quality);
    }
    Ok(read)
}
