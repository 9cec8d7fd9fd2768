use std::path::PathBuf;

/// A score series that cannot be analyzed as given.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrendError {
    #[error("score at index {index} is not a finite number")]
    NonFinite { index: usize },

    #[error("score {value} at index {index} is outside [0, 1]")]
    OutOfRange { index: usize, value: f64 },
}

/// Failure to load or accept a [`TrendConfig`](crate::TrendConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed trend config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
