//! Variability metrics
//!
//! The metrics engine: pure, read-only reductions over a [`TimeSeriesTable`].
//! Interday metrics pool the whole series; intraday metrics reduce each
//! calendar day first, then summarize the per-day statistics across days.
//! A single global SD conflates diurnal pattern with day-to-day drift, which
//! is why both levels exist.
//!
//! Insufficient data (empty table, empty day) yields NaN, never an error.

use crate::stats;
use crate::types::{DispersionSummary, SummaryStatistics, TimeSeriesTable};

/// Default band half-width, in standard deviations.
pub const DEFAULT_SD_MULTIPLIER: f64 = 1.0;

/// Default time-per-sample multiplier.
pub const DEFAULT_SAMPLE_RATE: f64 = 1.0;

/// Population standard deviation of the whole series. NaN-propagating.
pub fn interday_sd(table: &TimeSeriesTable) -> f64 {
    stats::population_sd(&table.values())
}

/// Coefficient of variation of the whole series, in percent.
///
/// The SD numerator propagates NaN; the mean denominator skips NaN. A
/// constant-zero series divides zero by zero and yields NaN.
pub fn interday_cv(table: &TimeSeriesTable) -> f64 {
    series_cv(&table.values())
}

/// Per-day population SD, summarized across days.
pub fn intraday_sd(table: &TimeSeriesTable) -> DispersionSummary {
    per_day_summary(table, stats::population_sd)
}

/// Per-day coefficient of variation, summarized across days.
pub fn intraday_cv(table: &TimeSeriesTable) -> DispersionSummary {
    per_day_summary(table, series_cv)
}

/// Per-day mean, summarized across days.
pub fn intraday_mean(table: &TimeSeriesTable) -> DispersionSummary {
    per_day_summary(table, stats::mean)
}

/// Time in range: samples within `mean ± k·sd` (inclusive), scaled by
/// `sample_rate` to express a duration.
///
/// NaN samples satisfy neither bound and are never counted; a NaN band
/// (empty or all-NaN series) counts nothing.
pub fn time_in_range(table: &TimeSeriesTable, k: f64, sample_rate: f64) -> f64 {
    let values = table.values();
    let (lower, upper) = range_band(&values, k);
    let hits = values.iter().filter(|v| **v >= lower && **v <= upper).count();
    hits as f64 * sample_rate
}

/// Time out of range: samples at or beyond `mean ± k·sd`, scaled by
/// `sample_rate`.
///
/// Both band edges are inclusive here and in [`time_in_range`], so a sample
/// sitting exactly on `mean ± k·sd` is counted by both metrics. Downstream
/// consumers depend on this boundary behavior; do not tighten either
/// predicate.
pub fn time_out_of_range(table: &TimeSeriesTable, k: f64, sample_rate: f64) -> f64 {
    let values = table.values();
    let (lower, upper) = range_band(&values, k);
    let hits = values.iter().filter(|v| **v >= upper || **v <= lower).count();
    hits as f64 * sample_rate
}

/// Percent of total time spent out of range.
pub fn percent_out_of_range(table: &TimeSeriesTable, k: f64, sample_rate: f64) -> f64 {
    let out = time_out_of_range(table, k, sample_rate);
    (out / (table.len() as f64 * sample_rate)) * 100.0
}

/// Mean amplitude of sensor excursions: the NaN-skipping mean of samples
/// outside the `mean ± k·sd` band. NaN when no sample excurses.
pub fn mean_amplitude_of_excursions(table: &TimeSeriesTable, k: f64) -> f64 {
    let values = table.values();
    let (lower, upper) = range_band(&values, k);
    let excursions: Vec<f64> = values
        .iter()
        .copied()
        .filter(|v| *v >= upper || *v <= lower)
        .collect();
    stats::nan_mean(&excursions)
}

/// Whole-series descriptive statistics. Every field skips NaN samples, so a
/// series with gaps still summarizes its observed values.
pub fn summary_statistics(table: &TimeSeriesTable) -> SummaryStatistics {
    let values = table.values();
    SummaryStatistics {
        mean: stats::nan_mean(&values),
        median: stats::nan_median(&values),
        min: stats::nan_min(&values),
        max: stats::nan_max(&values),
        q1: stats::nan_percentile(&values, 25.0),
        q3: stats::nan_percentile(&values, 75.0),
    }
}

/// Coefficient of variation of one value slice, in percent.
fn series_cv(values: &[f64]) -> f64 {
    (stats::population_sd(values) / stats::nan_mean(values)) * 100.0
}

/// Shared two-level reduction: reduce each day's values with `inner`, then
/// summarize the per-day statistics across days.
fn per_day_summary<F>(table: &TimeSeriesTable, inner: F) -> DispersionSummary
where
    F: Fn(&[f64]) -> f64,
{
    let per_day: Vec<f64> = table
        .days()
        .into_iter()
        .map(|day| inner(&table.day_values(day)))
        .collect();

    DispersionSummary {
        mean: stats::mean(&per_day),
        median: stats::median(&per_day),
        sd: stats::population_sd(&per_day),
    }
}

/// Band around the series mean: `(mean − k·sd, mean + k·sd)` from the
/// NaN-propagating full-series mean and population SD.
fn range_band(values: &[f64], k: f64) -> (f64, f64) {
    let mu = stats::mean(values);
    let sd = stats::population_sd(values);
    (mu - k * sd, mu + k * sd)
}
