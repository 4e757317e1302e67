//! Core types for the wearvar engine
//!
//! This module defines the normalized time-series table consumed by every
//! metric, plus the fixed-arity result structures the engine returns.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single sensor sample.
///
/// `day` is derived from the date component of `timestamp` exactly once, at
/// construction, so every metric partitions days identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    /// Sample timestamp (naive; wearable exports carry no offset)
    pub timestamp: NaiveDateTime,
    /// Sensor reading; NaN marks a missing sample
    pub value: f64,
    /// Calendar day the sample belongs to
    pub day: NaiveDate,
}

impl SensorRecord {
    /// Build a record, deriving `day` from the timestamp.
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self {
            timestamp,
            value,
            day: timestamp.date(),
        }
    }
}

/// Normalized time-series table: an ordered, immutable sequence of records.
///
/// The engine only ever borrows the table; metric calls are read-only
/// projections and may run concurrently on a shared reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesTable {
    records: Vec<SensorRecord>,
}

impl TimeSeriesTable {
    /// Build a table from records in input order.
    pub fn new(records: Vec<SensorRecord>) -> Self {
        Self { records }
    }

    /// Build a table from (timestamp, value) pairs, deriving days.
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDateTime, f64)>,
    {
        Self {
            records: samples
                .into_iter()
                .map(|(ts, v)| SensorRecord::new(ts, v))
                .collect(),
        }
    }

    /// All records, in input order.
    pub fn records(&self) -> &[SensorRecord] {
        &self.records
    }

    /// All sensor values, in input order.
    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.value).collect()
    }

    /// Distinct days in first-appearance order.
    pub fn days(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        for record in &self.records {
            if !days.contains(&record.day) {
                days.push(record.day);
            }
        }
        days
    }

    /// Sensor values for one calendar day, in input order.
    pub fn day_values(&self, day: NaiveDate) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| r.day == day)
            .map(|r| r.value)
            .collect()
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Cross-day summary of a per-day statistic: the (mean, median, SD) triple
/// returned by every intraday metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispersionSummary {
    pub mean: f64,
    pub median: f64,
    pub sd: f64,
}

/// Whole-series descriptive statistics, NaN-skipping throughout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
}
