//! Tunable parameters for a trend report, loadable from TOML.
//!
//! ```toml
//! alpha = 0.3
//! horizon = 7
//!
//! [drift]
//! tolerance = 0.02
//! threshold = 0.10
//! ```
//!
//! Every key is optional; missing keys take the library defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::drift::{DEFAULT_THRESHOLD, DEFAULT_TOLERANCE};
use crate::error::ConfigError;
use crate::forecast::DEFAULT_HORIZON;
use crate::smoothing::DEFAULT_ALPHA;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendConfig {
    /// Smoothing factor, `0 < alpha <= 1`.
    pub alpha: f64,
    /// Number of periods to forecast.
    pub horizon: usize,
    pub drift: DriftParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriftParams {
    pub tolerance: f64,
    pub threshold: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            horizon: DEFAULT_HORIZON,
            drift: DriftParams::default(),
        }
    }
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl TrendConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: TrendConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded trend config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(ConfigError::invalid(
                "alpha",
                format!("{} is not in (0, 1]", self.alpha),
            ));
        }
        if self.horizon == 0 {
            return Err(ConfigError::invalid("horizon", "must be at least 1"));
        }
        check_non_negative("drift.tolerance", self.drift.tolerance)?;
        check_non_negative("drift.threshold", self.drift.threshold)?;
        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{value} is not a finite, non-negative number"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_gives_defaults() {
        let config = TrendConfig::from_toml_str("").unwrap();
        assert_eq!(config, TrendConfig::default());
        assert_eq!(config.alpha, 0.4);
        assert_eq!(config.horizon, 4);
        assert_eq!(config.drift.tolerance, 0.03);
        assert_eq!(config.drift.threshold, 0.12);
    }

    #[test]
    fn partial_document_overrides_only_given_keys() {
        let config = TrendConfig::from_toml_str(
            r#"
            horizon = 7

            [drift]
            threshold = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            TrendConfig {
                alpha: DEFAULT_ALPHA,
                horizon: 7,
                drift: DriftParams {
                    tolerance: DEFAULT_TOLERANCE,
                    threshold: 0.2,
                },
            }
        );
    }

    #[test]
    fn rejects_out_of_range_alpha() {
        for bad in ["alpha = 0.0", "alpha = 1.5", "alpha = -0.1"] {
            let err = TrendConfig::from_toml_str(bad).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { field: "alpha", .. }),
                "{bad}: {err}"
            );
        }
        assert!(TrendConfig::from_toml_str("alpha = 1.0").is_ok());
    }

    #[test]
    fn rejects_zero_horizon_and_negative_drift_params() {
        let err = TrendConfig::from_toml_str("horizon = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "horizon", .. }));

        let err = TrendConfig::from_toml_str("[drift]\ntolerance = -0.01").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "drift.tolerance",
                ..
            }
        ));
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let err = TrendConfig::from_toml_str("smoothing = 0.3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let path = dir.path().join("trend.toml");
        std::fs::write(&path, "alpha = 0.25\nhorizon = 2\n").expect("write");
        let config = TrendConfig::load(&path).expect("load");
        assert_eq!(config.alpha, 0.25);
        assert_eq!(config.horizon, 2);

        let err = TrendConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn serialized_config_parses_back() {
        let config = TrendConfig {
            alpha: 0.5,
            horizon: 3,
            drift: DriftParams {
                tolerance: 0.01,
                threshold: 0.3,
            },
        };
        let text = config.to_toml().unwrap();
        assert_eq!(TrendConfig::from_toml_str(&text).unwrap(), config);
    }
}
