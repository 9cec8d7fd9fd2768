//! Logistic wellness risk from workload, sleep, stress and self-rated wellbeing.

use serde::{Deserialize, Serialize};

use crate::assessment::round_to;
use crate::band::RiskBand;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellnessInput {
    /// Training load or activity intensity, 0–10.
    pub workload: f64,
    pub sleep_hours: f64,
    /// Subjective, 1–10.
    pub stress_level: f64,
    /// General wellbeing, 0–100.
    pub wellness_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WellnessRisk {
    /// Probability-like score in `(0, 1)`, rounded to three decimals.
    pub risk_score: f64,
    pub category: RiskBand,
}

const STEEPNESS: f64 = 8.0;
const MIDPOINT: f64 = 0.5;

pub fn wellness_risk(input: &WellnessInput) -> WellnessRisk {
    let x = 0.4 * (input.workload / 10.0) + 0.3 * (input.stress_level / 10.0)
        - 0.2 * (input.sleep_hours / 8.0)
        - 0.1 * (input.wellness_score / 100.0);
    let risk = 1.0 / (1.0 + (-STEEPNESS * (x - MIDPOINT)).exp());

    let category = if risk < 0.33 {
        RiskBand::Low
    } else if risk < 0.66 {
        RiskBand::Moderate
    } else {
        RiskBand::High
    };

    WellnessRisk {
        risk_score: round_to(risk, 3),
        category,
    }
}
