use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ScoringError>;

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("`{field}` = {value} is outside the accepted range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown pitcher level `{0}` (expected youth, hs, college or pro)")]
    UnknownLevel(String),

    #[error("weight `{name}` = {value} must be finite and non-negative")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("band {lo}..={hi} must lie within [0, 1] with lo <= hi")]
    InvalidBand { lo: f64, hi: f64 },

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reject `value` unless `min <= value <= max`.
pub(crate) fn check_range(
    field: &'static str,
    value: impl Into<f64>,
    min: f64,
    max: f64,
) -> Result<()> {
    let value = value.into();
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ScoringError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_check_is_inclusive_and_rejects_nan() {
        assert!(check_range("age", 50u32, 50.0, 120.0).is_ok());
        assert!(check_range("age", 120u32, 50.0, 120.0).is_ok());
        assert!(check_range("gait", f64::NAN, 0.0, 3.0).is_err());

        let err = check_range("age", 49u32, 50.0, 120.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`age` = 49 is outside the accepted range 50..=120"
        );
    }
}
