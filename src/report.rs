//! Report encoding
//!
//! Computes every variability metric for a table and packages the results
//! into a serializable report with producer and provenance metadata, so
//! callers downstream of the engine only handle presentation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MetricsError;
use crate::metrics;
use crate::types::{DispersionSummary, SummaryStatistics, TimeSeriesTable};
use crate::{PRODUCER_NAME, WEARVAR_VERSION};

/// Report producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Parameters the range metrics were computed with
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReportParameters {
    /// Band half-width in standard deviations
    pub sd_multiplier: f64,
    /// Time-per-sample multiplier applied to range durations
    pub sample_rate: f64,
}

impl Default for ReportParameters {
    fn default() -> Self {
        Self {
            sd_multiplier: metrics::DEFAULT_SD_MULTIPLIER,
            sample_rate: metrics::DEFAULT_SAMPLE_RATE,
        }
    }
}

/// Full variability report over one time-series table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariabilityReport {
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    pub parameters: ReportParameters,
    /// Number of samples in the table
    pub record_count: usize,
    /// Number of distinct calendar days
    pub day_count: usize,
    pub summary: SummaryStatistics,
    pub interday_sd: f64,
    pub interday_cv: f64,
    pub intraday_sd: DispersionSummary,
    pub intraday_cv: DispersionSummary,
    pub intraday_mean: DispersionSummary,
    pub time_in_range: f64,
    pub time_out_of_range: f64,
    pub percent_out_of_range: f64,
    pub mean_amplitude_of_excursions: f64,
}

/// Encoder producing [`VariabilityReport`]s with a stable instance id.
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    /// Compute every metric for `table` into a report.
    pub fn encode(&self, table: &TimeSeriesTable, params: ReportParameters) -> VariabilityReport {
        let k = params.sd_multiplier;
        let sr = params.sample_rate;

        VariabilityReport {
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: WEARVAR_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            parameters: params,
            record_count: table.len(),
            day_count: table.days().len(),
            summary: metrics::summary_statistics(table),
            interday_sd: metrics::interday_sd(table),
            interday_cv: metrics::interday_cv(table),
            intraday_sd: metrics::intraday_sd(table),
            intraday_cv: metrics::intraday_cv(table),
            intraday_mean: metrics::intraday_mean(table),
            time_in_range: metrics::time_in_range(table, k, sr),
            time_out_of_range: metrics::time_out_of_range(table, k, sr),
            percent_out_of_range: metrics::percent_out_of_range(table, k, sr),
            mean_amplitude_of_excursions: metrics::mean_amplitude_of_excursions(table, k),
        }
    }

    /// Encode to JSON string. NaN metrics serialize as `null`.
    pub fn encode_to_json(
        &self,
        table: &TimeSeriesTable,
        params: ReportParameters,
    ) -> Result<String, MetricsError> {
        let report = self.encode(table, params);
        serde_json::to_string_pretty(&report).map_err(MetricsError::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(day: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(8, min, 0)
            .unwrap()
    }

    fn sample_table() -> TimeSeriesTable {
        TimeSeriesTable::from_samples(vec![
            (ts(1, 0), 1.0),
            (ts(1, 1), 2.0),
            (ts(1, 2), 3.0),
            (ts(2, 0), 4.0),
            (ts(2, 1), 5.0),
        ])
    }

    #[test]
    fn test_report_counts_and_metrics() {
        let encoder = ReportEncoder::with_instance_id("test".to_string());
        let report = encoder.encode(&sample_table(), ReportParameters::default());

        assert_eq!(report.record_count, 5);
        assert_eq!(report.day_count, 2);
        assert!((report.interday_sd - 2.0_f64.sqrt()).abs() < 1e-9);
        assert!((report.summary.median - 3.0).abs() < 1e-9);
        assert_eq!(report.producer.name, PRODUCER_NAME);
        assert_eq!(report.producer.instance_id, "test");
    }

    #[test]
    fn test_report_json_round_trip() {
        let encoder = ReportEncoder::new();
        let json = encoder
            .encode_to_json(&sample_table(), ReportParameters::default())
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["record_count"], 5);
        assert_eq!(value["day_count"], 2);
        assert_eq!(value["producer"]["name"], PRODUCER_NAME);
        assert!(value["interday_sd"].as_f64().is_some());
    }

    #[test]
    fn test_empty_table_serializes_nan_as_null() {
        let encoder = ReportEncoder::new();
        let json = encoder
            .encode_to_json(&TimeSeriesTable::default(), ReportParameters::default())
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["interday_sd"].is_null());
        assert!(value["summary"]["mean"].is_null());
        assert_eq!(value["record_count"], 0);
    }

    #[test]
    fn test_parameters_are_recorded() {
        let encoder = ReportEncoder::new();
        let params = ReportParameters {
            sd_multiplier: 2.0,
            sample_rate: 0.25,
        };
        let report = encoder.encode(&sample_table(), params);
        assert!((report.parameters.sd_multiplier - 2.0).abs() < 1e-9);
        assert!((report.parameters.sample_rate - 0.25).abs() < 1e-9);
        // Durations reflect the sample rate
        assert!(
            (report.time_in_range + report.time_out_of_range)
                >= report.record_count as f64 * 0.25 - 1e-9
        );
    }
}
