//! Weighted daily index over normalized monitoring signals.
//!
//! Each signal is a `[0, 1]` intensity for one day (1.0 = fully present). The
//! index is their weighted sum; with the standard weights summing to one, the
//! index itself stays in `[0, 1]` and a run of daily indices is the score
//! series the trend utilities analyze.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::band::{BandTable, RiskBand};
use crate::error::{Result, ScoringError};

/// One day's signals. Missing fields deserialize as absent (0.0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailySignals {
    pub recent_fall: f64,
    pub dizziness: f64,
    pub orthostatic_drop: f64,
    /// Drop in step count against the subject's own baseline.
    pub steps_delta: f64,
    pub sleep_frag: f64,
    pub gait_flag: f64,
    pub med_change: f64,
    pub hydration_low: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalWeights {
    pub recent_fall: f64,
    pub dizziness: f64,
    pub orthostatic_drop: f64,
    pub steps_delta: f64,
    pub sleep_frag: f64,
    pub gait_flag: f64,
    pub med_change: f64,
    pub hydration_low: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            recent_fall: 0.25,
            dizziness: 0.12,
            orthostatic_drop: 0.12,
            steps_delta: 0.16,
            sleep_frag: 0.10,
            gait_flag: 0.10,
            med_change: 0.10,
            hydration_low: 0.05,
        }
    }
}

impl SignalWeights {
    fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("recent_fall", self.recent_fall),
            ("dizziness", self.dizziness),
            ("orthostatic_drop", self.orthostatic_drop),
            ("steps_delta", self.steps_delta),
            ("sleep_frag", self.sleep_frag),
            ("gait_flag", self.gait_flag),
            ("med_change", self.med_change),
            ("hydration_low", self.hydration_low),
        ]
    }

    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, w)| w).sum()
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.entries() {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ScoringError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }

    /// Daily index: weighted sum of signals, each clamped to `[0, 1]`, then
    /// the sum clamped to `[0, 1]`.
    pub fn score(&self, s: &DailySignals) -> f64 {
        let signals = [
            s.recent_fall,
            s.dizziness,
            s.orthostatic_drop,
            s.steps_delta,
            s.sleep_frag,
            s.gait_flag,
            s.med_change,
            s.hydration_low,
        ];
        let sum: f64 = self
            .entries()
            .iter()
            .zip(signals)
            .map(|((_, w), x)| w * x.clamp(0.0, 1.0))
            .sum();
        sum.clamp(0.0, 1.0)
    }

    /// Daily index together with its band under `bands`.
    pub fn score_banded(&self, s: &DailySignals, bands: &BandTable) -> (f64, Option<RiskBand>) {
        let score = self.score(s);
        (score, bands.band_for(score))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let weights: SignalWeights = toml::from_str(text)?;
        weights.validate()?;
        Ok(weights)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let weights: SignalWeights = serde_json::from_str(text)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Load a weight table; `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScoringError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let weights = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            _ => Self::from_toml_str(&text)?,
        };
        let total = weights.total();
        if (total - 1.0).abs() > 1e-9 {
            log::warn!(
                "weights in {} sum to {total:.3}; daily index will be clamped to [0, 1]",
                path.display()
            );
        }
        Ok(weights)
    }
}
