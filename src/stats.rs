//! Scalar reductions with explicit NaN policies
//!
//! Every metric in this crate is built from these reductions. Each one comes
//! in at most two flavors: a propagating form (any NaN input makes the result
//! NaN) and a NaN-skipping form (missing samples are dropped before reducing).
//! Which flavor a metric uses is part of its contract; see `metrics`.
//!
//! All reductions return NaN, not an error, on empty input. A statistic over
//! an empty set is undefined, and NaN is the engine's signal for
//! "insufficient data".

/// Arithmetic mean; NaN-propagating, NaN on empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Arithmetic mean over non-NaN values; NaN when none remain.
pub fn nan_mean(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    mean(&finite)
}

/// Population standard deviation (divisor N); NaN-propagating, NaN on empty.
pub fn population_sd(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mu = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - mu).powi(2)).sum();
    (sum_sq / values.len() as f64).sqrt()
}

/// Median; NaN-propagating, NaN on empty input.
pub fn median(values: &[f64]) -> f64 {
    if values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    sorted_median(values)
}

/// Median over non-NaN values; NaN when none remain.
pub fn nan_median(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted_median(&finite)
}

/// Minimum over non-NaN values; NaN when none remain.
pub fn nan_min(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, f64::min)
}

/// Maximum over non-NaN values; NaN when none remain.
pub fn nan_max(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, f64::max)
}

/// Percentile over non-NaN values with linear interpolation between ranks.
///
/// `p` is in percent (0-100). Rank is `p/100 * (n-1)`; fractional ranks
/// interpolate between the two surrounding order statistics.
pub fn nan_percentile(values: &[f64], p: f64) -> f64 {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return f64::NAN;
    }
    finite.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let rank = (p / 100.0) * (finite.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return finite[lo];
    }
    let frac = rank - lo as f64;
    finite[lo] + (finite[hi] - finite[lo]) * frac
}

fn sorted_median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}
