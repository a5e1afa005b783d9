//! Per-group reducers: every function maps each node count of a [`Grouped`]
//! dataset to one value, failing the whole call on the first degenerate group.

use crate::analyzers::types::{GroupStats, Grouped};
use crate::analyzers::utility;
use crate::error::{Error, Result};

/// Rejects empty groups and groups holding NaN or infinite values.
fn checked(node_count: usize, values: &[f64]) -> Result<&[f64]> {
    if values.is_empty() {
        Err(Error::EmptyGroup { node_count })
    } else if values.iter().any(|v| !v.is_finite()) {
        Err(Error::NonFiniteValue { node_count })
    } else {
        Ok(values)
    }
}

fn bounds(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Mean of a non-empty slice, kept inside `[min, max]` despite rounding.
fn group_mean(values: &[f64]) -> f64 {
    let (lo, hi) = bounds(values);
    match utility::mean(values) {
        Some(m) if lo <= hi => m.clamp(lo, hi),
        Some(m) => m,
        None => lo,
    }
}

/// Population variance of a non-empty slice; exactly zero for a constant slice.
fn group_variance(values: &[f64]) -> f64 {
    let (lo, hi) = bounds(values);
    if lo == hi {
        return 0.0;
    }
    utility::variance(values, group_mean(values)).unwrap_or(0.0)
}

/// Arithmetic mean of every group.
pub fn average(grouped: &Grouped) -> Result<GroupStats> {
    grouped
        .iter()
        .map(|(&nodes, values)| checked(nodes, values).map(|v| (nodes, group_mean(v))))
        .collect()
}

/// Population variance (divisor `n`) of every group.
pub fn variance(grouped: &Grouped) -> Result<GroupStats> {
    grouped
        .iter()
        .map(|(&nodes, values)| checked(nodes, values).map(|v| (nodes, group_variance(v))))
        .collect()
}

/// Largest value of every group.
pub fn maximum(grouped: &Grouped) -> Result<GroupStats> {
    grouped
        .iter()
        .map(|(&nodes, values)| checked(nodes, values).map(|v| (nodes, bounds(v).1)))
        .collect()
}

/// Quantile of a non-empty slice by linear interpolation between order
/// statistics (`pos = p * (n - 1)`). `p` is clamped to `[0, 1]`.
fn quantile_of(values: &[f64], p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let pos = p * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let frac = pos - lo as f64;

    if lo + 1 < n {
        (1.0 - frac) * sorted[lo] + frac * sorted[lo + 1]
    } else {
        sorted[n - 1]
    }
}

/// `p`-quantile of every group, interpolating linearly between order statistics.
pub fn quantile(grouped: &Grouped, p: f64) -> Result<GroupStats> {
    grouped
        .iter()
        .map(|(&nodes, values)| checked(nodes, values).map(|v| (nodes, quantile_of(v, p))))
        .collect()
}

/// Population Pearson correlation between two parallel groupings, per node count.
///
/// The i-th values of a key in `first` and `second` must come from the same
/// record, as produced by [`crate::analyzers::aggregate::group_pair`].
///
/// # Errors
///
/// [`Error::ZeroVariance`] if either series of a group is constant,
/// [`Error::NonFiniteValue`] if either holds a NaN or infinite value,
/// [`Error::MismatchedGroups`] if the groupings disagree on keys or lengths.
pub fn correlation(first: &Grouped, second: &Grouped) -> Result<GroupStats> {
    if first.len() != second.len() {
        let node_count = first
            .keys()
            .chain(second.keys())
            .find(|&&k| !(first.contains_key(&k) && second.contains_key(&k)))
            .copied()
            .unwrap_or_default();
        return Err(Error::MismatchedGroups { node_count });
    }

    let mut correlations = GroupStats::new();

    for (&nodes, a) in first {
        let b = second
            .get(&nodes)
            .filter(|b| b.len() == a.len())
            .ok_or(Error::MismatchedGroups { node_count: nodes })?;
        let a = checked(nodes, a)?;
        let b = checked(nodes, b)?;

        let (mean_a, mean_b) = (group_mean(a), group_mean(b));
        let (var_a, var_b) = (group_variance(a), group_variance(b));
        if var_a == 0.0 || var_b == 0.0 {
            return Err(Error::ZeroVariance { node_count: nodes });
        }

        let covariance_sum: f64 = a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - mean_a) * (y - mean_b))
            .sum();

        correlations.insert(
            nodes,
            covariance_sum / (a.len() as f64 * (var_a * var_b).sqrt()),
        );
    }

    Ok(correlations)
}
