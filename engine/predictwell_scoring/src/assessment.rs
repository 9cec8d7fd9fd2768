use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse level for a 0–100 risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const MODERATE_FROM: f64 = 40.0;
    pub const HIGH_FROM: f64 = 70.0;

    pub fn from_score(score: f64) -> Self {
        if score >= Self::HIGH_FROM {
            RiskLevel::High
        } else if score >= Self::MODERATE_FROM {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        })
    }
}

/// A finding that contributed to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    // eldercare
    RecentFall,
    MedicationChange,
    SlowGait,
    LowWordRecall,
    // pitcher
    OverDailyCap,
    HighThreeDayWorkload,
    InsufficientRest,
    HighPain,
    MultipleMechanicsFlags,
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskFlag::RecentFall => "Recent fall",
            RiskFlag::MedicationChange => "Recent medication change",
            RiskFlag::SlowGait => "Slow gait (<0.8 m/s)",
            RiskFlag::LowWordRecall => "Low word recall",
            RiskFlag::OverDailyCap => "Over daily pitch cap",
            RiskFlag::HighThreeDayWorkload => "High 3-day workload",
            RiskFlag::InsufficientRest => "Insufficient rest",
            RiskFlag::HighPain => "Pain ≥5/10",
            RiskFlag::MultipleMechanicsFlags => "Multiple mechanics flags",
        })
    }
}

/// Result of a 0–100 rule-based scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Clamped to `[0, 100]` and rounded to one decimal.
    pub score: f64,
    pub level: RiskLevel,
    /// In the order the rules fired.
    pub flags: Vec<RiskFlag>,
}

impl RiskAssessment {
    pub(crate) fn from_raw(raw: f64, flags: Vec<RiskFlag>) -> Self {
        let score = round_to(raw.clamp(0.0, 100.0), 1);
        Self {
            score,
            level: RiskLevel::from_score(score),
            flags,
        }
    }

    /// Score on the `[0, 1]` scale the trend utilities work with.
    pub fn normalized(&self) -> f64 {
        self.score / 100.0
    }
}

pub(crate) fn round_to(x: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}
