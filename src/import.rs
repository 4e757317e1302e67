//! Sensor file import
//!
//! Adapters that parse delimited sensor exports into the normalized
//! [`TimeSeriesTable`] the engine consumes. Two shapes are supported:
//! plain two-column exports (timestamp, value) and triaxial accelerometer
//! exports (timestamp, x, y, z), which are collapsed to a single magnitude
//! scalar before the table is built.
//!
//! Timestamps are parsed with a caller-supplied chrono format string; files
//! carry no header row. Malformed rows fail fast with the 1-based line
//! number rather than producing a silently wrong table.

use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::MetricsError;
use crate::types::{SensorRecord, TimeSeriesTable};

/// Timestamp format of the original device exports.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Accelerometer calibration offset subtracted from the vector magnitude.
/// Device-specific; opaque to the metrics engine.
const ACCELEROMETER_BASELINE: f64 = 64.0;

/// Import a two-column (timestamp, value) CSV file.
pub fn import_sensor_csv<P: AsRef<Path>>(
    path: P,
    timestamp_format: &str,
) -> Result<TimeSeriesTable, MetricsError> {
    let contents = fs::read_to_string(path)?;
    parse_sensor_records(&contents, timestamp_format)
}

/// Import a four-column (timestamp, x, y, z) accelerometer CSV file,
/// collapsing each sample to `sqrt(x² + y² + z²) − 64`.
pub fn import_accelerometer_csv<P: AsRef<Path>>(
    path: P,
    timestamp_format: &str,
) -> Result<TimeSeriesTable, MetricsError> {
    let contents = fs::read_to_string(path)?;
    parse_accelerometer_records(&contents, timestamp_format)
}

/// Parse two-column CSV text into a table.
pub fn parse_sensor_records(
    contents: &str,
    timestamp_format: &str,
) -> Result<TimeSeriesTable, MetricsError> {
    let mut records = Vec::new();
    for (line, fields) in rows(contents) {
        if fields.len() != 2 {
            return Err(MetricsError::Schema {
                line,
                expected: 2,
                found: fields.len(),
            });
        }
        let timestamp = parse_timestamp(fields[0], timestamp_format, line)?;
        let value = parse_value(fields[1], line)?;
        records.push(SensorRecord::new(timestamp, value));
    }
    Ok(TimeSeriesTable::new(records))
}

/// Parse four-column accelerometer CSV text into a table of magnitudes.
pub fn parse_accelerometer_records(
    contents: &str,
    timestamp_format: &str,
) -> Result<TimeSeriesTable, MetricsError> {
    let mut records = Vec::new();
    for (line, fields) in rows(contents) {
        if fields.len() != 4 {
            return Err(MetricsError::Schema {
                line,
                expected: 4,
                found: fields.len(),
            });
        }
        let timestamp = parse_timestamp(fields[0], timestamp_format, line)?;
        let x = parse_value(fields[1], line)?;
        let y = parse_value(fields[2], line)?;
        let z = parse_value(fields[3], line)?;
        let magnitude = (x * x + y * y + z * z).sqrt() - ACCELEROMETER_BASELINE;
        records.push(SensorRecord::new(timestamp, magnitude));
    }
    Ok(TimeSeriesTable::new(records))
}

/// Non-blank rows split on commas, paired with 1-based line numbers.
fn rows<'a>(contents: &'a str) -> impl Iterator<Item = (usize, Vec<&'a str>)> + 'a {
    contents
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| (i + 1, l.split(',').map(str::trim).collect()))
}

fn parse_timestamp(
    field: &str,
    format: &str,
    line: usize,
) -> Result<NaiveDateTime, MetricsError> {
    NaiveDateTime::parse_from_str(field, format).map_err(|_| MetricsError::TimestampParse {
        line,
        value: field.to_string(),
        format: format.to_string(),
    })
}

/// Parse a sensor reading. An empty field or a literal `nan` is a missing
/// sample and parses as NaN.
fn parse_value(field: &str, line: usize) -> Result<f64, MetricsError> {
    if field.is_empty() || field.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    field.parse::<f64>().map_err(|_| MetricsError::ValueParse {
        line,
        value: field.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_sensor_records() {
        let csv = "2024-03-01 08:00:00.000,1.25\n2024-03-02 08:00:00.500,2.5\n";
        let table = parse_sensor_records(csv, DEFAULT_TIMESTAMP_FORMAT).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.records()[0].day,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert_eq!(
            table.records()[1].day,
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
        assert!((table.records()[0].value - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_custom_timestamp_format() {
        let csv = "03/01/2024 08:30,10.0\n";
        let table = parse_sensor_records(csv, "%m/%d/%Y %H:%M").unwrap();
        assert_eq!(
            table.records()[0].day,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_missing_sample_parses_as_nan() {
        let csv = "2024-03-01 08:00:00.0,nan\n2024-03-01 08:01:00.0,\n";
        let table = parse_sensor_records(csv, DEFAULT_TIMESTAMP_FORMAT).unwrap();
        assert!(table.records()[0].value.is_nan());
        assert!(table.records()[1].value.is_nan());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let csv = "\n2024-03-01 08:00:00.0,1.0\n\n2024-03-01 08:01:00.0,2.0\n\n";
        let table = parse_sensor_records(csv, DEFAULT_TIMESTAMP_FORMAT).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_wrong_column_count_is_schema_error() {
        let csv = "2024-03-01 08:00:00.0,1.0\n2024-03-01 08:01:00.0,1.0,extra\n";
        let err = parse_sensor_records(csv, DEFAULT_TIMESTAMP_FORMAT).unwrap_err();
        match err {
            MetricsError::Schema {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_timestamp_reports_line() {
        let csv = "not-a-time,1.0\n";
        let err = parse_sensor_records(csv, DEFAULT_TIMESTAMP_FORMAT).unwrap_err();
        match err {
            MetricsError::TimestampParse { line, .. } => assert_eq!(line, 1),
            other => panic!("expected timestamp error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_value_reports_line() {
        let csv = "2024-03-01 08:00:00.0,abc\n";
        let err = parse_sensor_records(csv, DEFAULT_TIMESTAMP_FORMAT).unwrap_err();
        match err {
            MetricsError::ValueParse { line, value } => {
                assert_eq!(line, 1);
                assert_eq!(value, "abc");
            }
            other => panic!("expected value error, got {other:?}"),
        }
    }

    #[test]
    fn test_accelerometer_magnitude() {
        // 3-4-12 triple: magnitude 13, minus the 64 baseline
        let csv = "2024-03-01 08:00:00.0,3.0,4.0,12.0\n";
        let table = parse_accelerometer_records(csv, DEFAULT_TIMESTAMP_FORMAT).unwrap();
        assert!((table.records()[0].value - (13.0 - 64.0)).abs() < 1e-9);
    }

    #[test]
    fn test_accelerometer_column_count() {
        let csv = "2024-03-01 08:00:00.0,3.0,4.0\n";
        let err = parse_accelerometer_records(csv, DEFAULT_TIMESTAMP_FORMAT).unwrap_err();
        assert!(matches!(
            err,
            MetricsError::Schema {
                expected: 4,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_import_grouping_matches_manual_bucketing() {
        let csv = "\
2024-03-01 23:59:59.0,1.0\n\
2024-03-02 00:00:00.0,2.0\n\
2024-03-02 12:00:00.0,3.0\n\
2024-03-03 06:00:00.0,4.0\n";
        let table = parse_sensor_records(csv, DEFAULT_TIMESTAMP_FORMAT).unwrap();

        // Regrouping by the stored day equals bucketing by calendar date
        for record in table.records() {
            assert_eq!(record.day, record.timestamp.date());
        }
        let days = table.days();
        assert_eq!(days.len(), 3);
        assert_eq!(table.day_values(days[1]), vec![2.0, 3.0]);
    }
}
