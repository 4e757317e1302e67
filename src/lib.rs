//! wearvar - Descriptive variability metrics for longitudinal wearable
//! sensor time series
//!
//! The crate is a pure, stateless function library over an in-memory
//! time-series table: import a delimited sensor export into a
//! [`TimeSeriesTable`], then compute interday/intraday dispersion, range
//! durations, excursion amplitude, and summary statistics from it.
//!
//! ## Modules
//!
//! - **import**: Parse sensor and accelerometer CSV exports into tables
//! - **metrics**: The variability metrics engine
//! - **report**: Package all metrics into a serializable report

pub mod error;
pub mod import;
pub mod metrics;
pub mod report;
pub mod stats;
pub mod types;

pub use error::MetricsError;
pub use import::{import_accelerometer_csv, import_sensor_csv, DEFAULT_TIMESTAMP_FORMAT};
pub use report::{ReportEncoder, ReportParameters, VariabilityReport};
pub use types::{DispersionSummary, SensorRecord, SummaryStatistics, TimeSeriesTable};

/// Crate version embedded in all report payloads
pub const WEARVAR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "wearvar";
