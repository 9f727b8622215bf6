//! Integration tests for the NEM12 interval-file builder.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use nemfile_records::{ChannelConfig, IntervalFile, IntervalRead, NemFile, Record, RecordError};

fn midnight(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2004, 4, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn created() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2004, 4, 20)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

/// One day of readings at the given interval, ends starting one interval
/// after midnight, values 0, 1, 2, ...
fn day_of_reads(day: u32, interval: i64, quality: &str) -> Vec<IntervalRead> {
    let n = 1440 / interval;
    (1..=n)
        .map(|i| {
            IntervalRead::new(midnight(day) + Duration::minutes(interval * i), (i - 1) as f64)
                .with_quality(quality)
        })
        .collect()
}

fn config() -> ChannelConfig {
    ChannelConfig::new("NMI123", "E1B1B2", "E1", "kWh")
}

#[test]
fn full_day_96_readings_at_15_minutes() {
    let mut file = IntervalFile::new("123", None).with_created(created());
    file.add_readings(&config(), &day_of_reads(18, 15, "A"))
        .expect("add succeeds");

    let records = file.records().expect("non-empty");
    assert_eq!(records.len(), 4); // 100, 200, 300, 900

    let header = records[0].fields();
    assert_eq!(header[0], "100");
    assert_eq!(header[1], "NEM12");
    assert_eq!(header[2], "200404201030");

    let channel = records[1].fields();
    assert_eq!(
        channel,
        vec!["200", "NMI123", "E1B1B2", "", "E1", "", "", "kWh", "15", ""]
    );

    let day = records[2].fields();
    assert_eq!(day[0], "300");
    assert_eq!(day[1], "20040418");
    assert_eq!(day.len(), 2 + 96 + 5);
    for (i, value) in day[2..98].iter().enumerate() {
        assert_eq!(value, &i.to_string());
    }
    // Single uniform run: shared quality on the 300, no 400 records.
    assert_eq!(&day[98..], &["A", "", "", "", ""]);

    assert_eq!(records[3], Record::EndOfData);
}

#[test]
fn missing_intervals_get_sentinel_and_event_records() {
    // 30 minute day with slots 0, 1, and 3 missing.
    let reads: Vec<_> = day_of_reads(2, 30, "A")
        .into_iter()
        .enumerate()
        .filter(|(i, _)| ![0, 1, 3].contains(i))
        .map(|(_, r)| r)
        .collect();

    let mut file = IntervalFile::new("123", None).with_created(created());
    file.add_readings(&config(), &reads).expect("add succeeds");

    let records = file.records().expect("non-empty");
    let day = records[2].fields();

    // Sentinel value 0 at the missing positions.
    assert_eq!(day[2], "0");
    assert_eq!(day[3], "0");
    assert_eq!(day[4], "2");
    assert_eq!(day[5], "0");
    assert_eq!(day[6], "4");
    // Varying day: quality-method V, empty trailing event fields.
    assert_eq!(&day[50..], &["V", "", "", "", ""]);

    // Four runs: N N | A | N | A...A
    let events: Vec<Vec<String>> = records
        .iter()
        .filter(|r| matches!(r, Record::Event(_)))
        .map(Record::fields)
        .collect();
    assert_eq!(
        events,
        vec![
            vec!["400", "1", "2", "N", "", ""],
            vec!["400", "3", "3", "A", "", ""],
            vec!["400", "4", "4", "N", "", ""],
            vec!["400", "5", "48", "A", "", ""],
        ]
    );

    // 400 records sit directly after their 300 record.
    assert!(matches!(records[3], Record::Event(_)));
    assert_eq!(records.len(), 4 + 4); // 100, 200, 300, 4x400, 900
}

#[test]
fn quality_change_mid_day_emits_event_records() {
    let mut reads = day_of_reads(2, 30, "A");
    for read in reads.iter_mut().skip(24) {
        *read = IntervalRead::new(read.end(), read.value()).with_quality("E");
    }

    let mut file = IntervalFile::new("123", None);
    file.add_readings(&config(), &reads).expect("add succeeds");

    let records = file.records().expect("non-empty");
    let events: Vec<Vec<String>> = records
        .iter()
        .filter(|r| matches!(r, Record::Event(_)))
        .map(Record::fields)
        .collect();
    assert_eq!(
        events,
        vec![
            vec!["400", "1", "24", "A", "", ""],
            vec!["400", "25", "48", "E", "", ""],
        ]
    );
}

#[test]
fn consecutive_days_share_one_header() {
    let mut reads = day_of_reads(18, 30, "A");
    reads.extend(day_of_reads(19, 30, "A"));

    let mut file = IntervalFile::new("123", None);
    file.add_readings(&config(), &reads).expect("add succeeds");

    let records = file.records().expect("non-empty");
    let n_headers = records
        .iter()
        .filter(|r| matches!(r, Record::ChannelHeader(_)))
        .count();
    assert_eq!(n_headers, 1);
    // 100, 200, 300, 300, 900
    assert_eq!(records.len(), 5);
}

#[test]
fn uom_change_emits_second_header() {
    let mut file = IntervalFile::new("123", None);
    file.add_readings(&config(), &day_of_reads(18, 30, "A"))
        .expect("add succeeds");
    let changed = ChannelConfig::new("NMI123", "E1B1B2", "E1", "MWh");
    file.add_readings(&changed, &day_of_reads(19, 30, "A"))
        .expect("add succeeds");

    let records = file.records().expect("non-empty");
    let uoms: Vec<String> = records
        .iter()
        .filter(|r| matches!(r, Record::ChannelHeader(_)))
        .map(|r| r.fields()[7].clone())
        .collect();
    assert_eq!(uoms, vec!["kWh", "MWh"]);
}

#[test]
fn header_deduplication_spans_calls() {
    let mut file = IntervalFile::new("123", None);
    file.add_readings(&config(), &day_of_reads(18, 30, "A"))
        .expect("add succeeds");
    file.add_readings(&config(), &day_of_reads(19, 30, "A"))
        .expect("add succeeds");

    let records = file.records().expect("non-empty");
    let n_headers = records
        .iter()
        .filter(|r| matches!(r, Record::ChannelHeader(_)))
        .count();
    assert_eq!(n_headers, 1);
}

#[test]
fn interval_length_change_emits_new_header() {
    let mut reads = day_of_reads(18, 30, "A");
    reads.extend(day_of_reads(19, 5, "A"));

    let mut file = IntervalFile::new("123", None);
    file.add_readings(&config(), &reads).expect("add succeeds");

    let records = file.records().expect("non-empty");
    let intervals: Vec<String> = records
        .iter()
        .filter(|r| matches!(r, Record::ChannelHeader(_)))
        .map(|r| r.fields()[8].clone())
        .collect();
    assert_eq!(intervals, vec!["30", "5"]);

    // The 5 minute day carries 288 values.
    let day_lens: Vec<usize> = records
        .iter()
        .filter(|r| matches!(r, Record::IntervalDay(_)))
        .map(|r| r.fields().len() - 7)
        .collect();
    assert_eq!(day_lens, vec![48, 288]);
}

#[test]
fn metering_points_and_channels_sort_lexically() {
    let mut file = IntervalFile::new("123", None);
    let reads = day_of_reads(18, 30, "A");
    file.add_readings(&ChannelConfig::new("B200", "E1", "E1", "kWh"), &reads)
        .expect("add succeeds");
    file.add_readings(&ChannelConfig::new("A100", "E1E2", "E2", "kWh"), &reads)
        .expect("add succeeds");
    file.add_readings(&ChannelConfig::new("A100", "E1E2", "E1", "kWh"), &reads)
        .expect("add succeeds");

    let records = file.records().expect("non-empty");
    let headers: Vec<(String, String)> = records
        .iter()
        .filter(|r| matches!(r, Record::ChannelHeader(_)))
        .map(|r| {
            let f = r.fields();
            (f[1].clone(), f[4].clone())
        })
        .collect();
    assert_eq!(
        headers,
        vec![
            ("A100".to_string(), "E1".to_string()),
            ("A100".to_string(), "E2".to_string()),
            ("B200".to_string(), "E1".to_string()),
        ]
    );
}

#[test]
fn update_and_load_times_fill_trailing_columns() {
    let update = NaiveDate::from_ymd_opt(2004, 4, 20)
        .unwrap()
        .and_hms_opt(9, 1, 3)
        .unwrap();
    let load = NaiveDate::from_ymd_opt(2004, 4, 19)
        .unwrap()
        .and_hms_opt(1, 23, 40)
        .unwrap();

    let mut file = IntervalFile::new("123", None);
    file.add_readings_with_times(&config(), &day_of_reads(18, 30, "A"), Some(update), Some(load))
        .expect("add succeeds");

    let records = file.records().expect("non-empty");
    let day = records[2].fields();
    assert_eq!(day.len(), 55);
    assert_eq!(day[53], "20040420090103");
    assert_eq!(day[54], "20040419012340");
}

#[test]
fn empty_file_errors() {
    let file = IntervalFile::new("123", None);
    assert_eq!(file.records().unwrap_err(), RecordError::EmptyFile);
    assert_eq!(
        file.suggested_filename().unwrap_err(),
        RecordError::EmptyFile
    );
}

#[test]
fn duplicate_timestamps_error_without_touching_other_channels() {
    let mut file = IntervalFile::new("123", None);
    file.add_readings(&config(), &day_of_reads(18, 30, "A"))
        .expect("add succeeds");

    let dup = vec![
        IntervalRead::new(midnight(19) + Duration::minutes(30), 1.0),
        IntervalRead::new(midnight(19) + Duration::minutes(30), 2.0),
    ];
    let other = ChannelConfig::new("NMI999", "E1", "E1", "kWh");
    let err = file.add_readings(&other, &dup).unwrap_err();
    assert_eq!(err, RecordError::NonPositiveInterval { minutes: 0 });

    // Prior state is intact and the failed channel was never created.
    let records = file.records().expect("non-empty");
    assert!(
        records
            .iter()
            .filter(|r| matches!(r, Record::ChannelHeader(_)))
            .all(|r| r.fields()[1] == "NMI123")
    );
}

#[test]
fn indivisible_interval_commits_no_records() {
    let mut file = IntervalFile::new("123", None);

    // 7 minute gaps infer an interval length that does not divide a day.
    let reads = vec![
        IntervalRead::new(midnight(18) + Duration::minutes(7), 1.0),
        IntervalRead::new(midnight(18) + Duration::minutes(14), 2.0),
    ];
    let err = file.add_readings(&config(), &reads).unwrap_err();
    assert_eq!(err, RecordError::IndivisibleInterval { minutes: 7 });

    // No dangling 200 header: the builder is still empty.
    assert_eq!(file.records().unwrap_err(), RecordError::EmptyFile);
    assert_eq!(file.suggested_filename().unwrap_err(), RecordError::EmptyFile);

    // A later failing add on the same channel leaves prior data as-is.
    file.add_readings(&config(), &day_of_reads(18, 30, "A"))
        .expect("add succeeds");
    let before = file.records().expect("non-empty");
    let err = file.add_readings(&config(), &reads).unwrap_err();
    assert_eq!(err, RecordError::IndivisibleInterval { minutes: 7 });
    assert_eq!(file.records().expect("non-empty"), before);
}

#[test]
fn suggested_filename_single_metering_point() {
    let mut file = IntervalFile::new("RETAILER", Some("MDA1"));
    let mut reads = day_of_reads(18, 30, "A");
    reads.extend(day_of_reads(19, 30, "A"));
    file.add_readings(&config(), &reads).expect("add succeeds");

    assert_eq!(
        file.suggested_filename().unwrap(),
        "NEM12#NMI123_20040418_20040419#MDA1#RETAILER"
    );
}

#[test]
fn suggested_filename_multiple_metering_points() {
    let mut file = IntervalFile::new("RETAILER", None);
    file.add_readings(&ChannelConfig::new("A100", "E1", "E1", "kWh"), &day_of_reads(18, 30, "A"))
        .expect("add succeeds");
    file.add_readings(&ChannelConfig::new("B200", "E1", "E1", "kWh"), &day_of_reads(19, 30, "A"))
        .expect("add succeeds");

    assert_eq!(
        file.suggested_filename().unwrap(),
        "NEM12#20040418_20040419##RETAILER"
    );
}
