//! Exponential smoothing of a score history.

/// Smoothing factor used when the caller has no preference.
pub const DEFAULT_ALPHA: f64 = 0.4;

/// Exponential moving average of `series`, seeded with the first observation.
///
/// Each later observation updates the estimate as `v = alpha * x + (1 - alpha) * v`.
/// Returns `None` for an empty series: an absent history is not a zero score.
///
/// `alpha` is used as given. Values outside `(0, 1]` are arithmetic
/// pass-through; [`TrendConfig::validate`](crate::TrendConfig::validate) is
/// where configured values are checked.
pub fn smooth(series: &[f64], alpha: f64) -> Option<f64> {
    let (&first, rest) = series.split_first()?;
    Some(
        rest.iter()
            .fold(first, |v, &x| alpha * x + (1.0 - alpha) * v),
    )
}

/// Every intermediate value of [`smooth`], one per observation.
///
/// The last element equals `smooth(series, alpha)`.
pub fn smoothed_series(series: &[f64], alpha: f64) -> Vec<f64> {
    let Some((&first, rest)) = series.split_first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(series.len());
    let mut v = first;
    out.push(v);
    for &x in rest {
        v = alpha * x + (1.0 - alpha) * v;
        out.push(v);
    }
    out
}
