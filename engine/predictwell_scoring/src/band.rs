//! Named bands over normalized `[0, 1]` scores.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskBand::Low => "Low",
            RiskBand::Moderate => "Moderate",
            RiskBand::High => "High",
        })
    }
}

/// Inclusive score interval mapped to a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub lo: f64,
    pub hi: f64,
    pub band: RiskBand,
}

impl Band {
    pub const fn new(lo: f64, hi: f64, band: RiskBand) -> Self {
        Self { lo, hi, band }
    }

    pub fn contains(&self, score: f64) -> bool {
        self.lo <= score && score <= self.hi
    }
}

/// Bands used by the daily index.
///
/// The intervals stop at two decimals, so scores such as 0.295 fall between
/// bands and have no name.
pub const STANDARD_BANDS: [Band; 3] = [
    Band::new(0.00, 0.29, RiskBand::Low),
    Band::new(0.30, 0.59, RiskBand::Moderate),
    Band::new(0.60, 1.00, RiskBand::High),
];

/// Ordered band table; the first interval containing a score wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    pub bands: Vec<Band>,
}

impl Default for BandTable {
    fn default() -> Self {
        Self {
            bands: STANDARD_BANDS.to_vec(),
        }
    }
}

impl BandTable {
    pub fn band_for(&self, score: f64) -> Option<RiskBand> {
        lookup(&self.bands, score)
    }

    pub fn validate(&self) -> Result<()> {
        for b in &self.bands {
            if !(0.0 <= b.lo && b.lo <= b.hi && b.hi <= 1.0) {
                return Err(ScoringError::InvalidBand { lo: b.lo, hi: b.hi });
            }
        }
        Ok(())
    }

    /// Parse a table written as `[[bands]]` entries with `lo`, `hi` and `band`.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: BandTable = toml::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScoringError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_toml_str(&text)?;
        log::debug!("loaded {} band(s) from {}", table.bands.len(), path.display());
        Ok(table)
    }
}

/// Band for `score` under [`STANDARD_BANDS`].
pub fn band_for(score: f64) -> Option<RiskBand> {
    lookup(&STANDARD_BANDS, score)
}

fn lookup(bands: &[Band], score: f64) -> Option<RiskBand> {
    bands.iter().find(|b| b.contains(score)).map(|b| b.band)
}
