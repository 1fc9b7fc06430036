//! Descriptive statistics over competitor price samples.
//!
//! Percentiles use the linear-interpolation method (the same as Postgres
//! `PERCENTILE_CONT`), operating on an already-sorted slice.

use serde::Serializer;

/// Arithmetic mean. `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median via linear-interpolation percentile. `None` for an empty sample.
pub fn median(sorted: &[f64]) -> Option<f64> {
    percentile(sorted, 50.0)
}

/// Linear-interpolation percentile over an ascending-sorted slice.
///
/// `p` is in [0, 100]. Rank is `p/100 * (n-1)`; fractional ranks
/// interpolate between the two surrounding observations.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }
    if sorted.len() == 1 {
        return Some(sorted[0]);
    }

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let frac = rank - lo as f64;

    if frac == 0.0 {
        Some(sorted[lo])
    } else {
        Some(sorted[lo] + frac * (sorted[lo + 1] - sorted[lo]))
    }
}

/// Weighted mean over (value, weight) pairs. `None` for an empty sample.
///
/// Weights are used as given - the caller is responsible for normalization.
pub fn weighted_mean(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.is_empty() {
        return None;
    }
    Some(pairs.iter().map(|(v, w)| v * w).sum())
}

/// Round to `places` decimal places (half away from zero).
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Serde serializer: emit an f64 rounded to 2 decimal places.
///
/// Rounding happens only at the serialization boundary so in-memory
/// invariants hold at full precision.
pub fn serde_round2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 2))
}

/// Serde serializer: emit an f64 rounded to 4 decimal places.
pub fn serde_round4<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 4))
}

/// Serde serializer: emit an optional f64 rounded to 2 decimal places.
pub fn serde_opt_round2<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_some(&round_to(*v, 2)),
        None => serializer.serialize_none(),
    }
}
