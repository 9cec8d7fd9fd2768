use crate::error::TrendError;

/// Check that every score is finite and inside `[0, 1]`.
///
/// The analytics functions accept any input and never call this; it is for
/// callers that want to reject a bad history before analyzing it.
pub fn validate_series(series: &[f64]) -> Result<(), TrendError> {
    for (index, &value) in series.iter().enumerate() {
        if !value.is_finite() {
            return Err(TrendError::NonFinite { index });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(TrendError::OutOfRange { index, value });
        }
    }
    Ok(())
}
