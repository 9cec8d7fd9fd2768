//! Regional fatigue scores from the detailed pitcher intake.
//!
//! Soreness items are self-rated on a 0–5 scale, readiness items (recovery,
//! hydration, nutrition, motivation, concentration, mood) on 0–10 where higher
//! is better. Regions share no common scale: workload counts raw pitch
//! volume and routinely exceeds 10.

use serde::{Deserialize, Serialize};

use crate::assessment::round_to;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitcherIntake {
    // arm and shoulder
    pub shoulder_soreness: u32,
    #[serde(alias = "elbow_soreness")]
    pub inner_elbow_pain: u32,
    pub forearm_tightness: u32,
    pub triceps_fatigue: u32,
    pub biceps_pain: u32,
    pub shoulder_clicking: u32,

    // workload and mechanics
    pub pitches_today: u32,
    pub pitches_7d: u32,
    pub velocity_drop: u32,
    pub arm_slot_change: u32,
    pub command_loss: u32,
    pub effort_level: u32,
    pub follow_through_pain: u32,

    // recovery and readiness
    pub sleep_hours: f64,
    pub recovery_quality: u32,
    pub hydration_level: u32,
    pub nutrition_quality: u32,
    pub soreness_recovery: u32,
    pub rest_days: u32,

    // focus and stress
    pub stress_level: u32,
    pub motivation_level: u32,
    pub concentration_score: u32,
    pub mood_level: u32,

    // lower body
    pub hip_flexor_tightness: u32,
    pub quad_soreness: u32,
    pub hamstring_tightness: u32,
    pub glute_activation: u32,
    pub calf_soreness: u32,
    pub ankle_stability: u32,
    pub knee_pain: u32,
    pub groin_tightness: u32,
    pub push_off_cramps: u32,
    pub balance_stability: u32,
}

/// Per-region scores and their weighted total, each rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionScores {
    pub arm_load: f64,
    pub workload: f64,
    pub recovery: f64,
    pub mental: f64,
    pub lower_body: f64,
    pub total_risk: f64,
}

pub const ARM_WEIGHT: f64 = 0.35;
pub const WORKLOAD_WEIGHT: f64 = 0.25;
pub const RECOVERY_WEIGHT: f64 = 0.15;
pub const MENTAL_WEIGHT: f64 = 0.10;
pub const LOWER_BODY_WEIGHT: f64 = 0.15;

fn mean(items: &[u32]) -> f64 {
    items.iter().map(|&x| f64::from(x)).sum::<f64>() / items.len() as f64
}

/// Readiness shortfall: `10 - x`, so a perfect 10 contributes nothing.
fn shortfall(x: u32) -> f64 {
    10.0 - f64::from(x)
}

pub fn regional_scores(d: &PitcherIntake) -> RegionScores {
    let arm_load = mean(&[
        d.shoulder_soreness,
        d.inner_elbow_pain,
        d.forearm_tightness,
        d.triceps_fatigue,
        d.biceps_pain,
        d.shoulder_clicking,
    ]);

    let workload = (f64::from(d.pitches_today) / 100.0
        + f64::from(d.pitches_7d) / 300.0
        + f64::from(d.velocity_drop) / 5.0
        + f64::from(d.arm_slot_change) / 5.0
        + f64::from(d.command_loss) / 5.0
        + f64::from(d.effort_level) / 5.0
        + f64::from(d.follow_through_pain) / 5.0)
        * 10.0;

    let recovery = (shortfall(d.recovery_quality)
        + shortfall(d.hydration_level)
        + shortfall(d.nutrition_quality)
        + shortfall(d.soreness_recovery))
        / 4.0;

    let mental = (f64::from(d.stress_level)
        + shortfall(d.motivation_level)
        + shortfall(d.concentration_score)
        + shortfall(d.mood_level))
        / 4.0;

    let lower_body = mean(&[
        d.hip_flexor_tightness,
        d.quad_soreness,
        d.hamstring_tightness,
        d.glute_activation,
        d.calf_soreness,
        d.ankle_stability,
        d.knee_pain,
        d.groin_tightness,
        d.push_off_cramps,
        d.balance_stability,
    ]);

    let total_risk = arm_load * ARM_WEIGHT
        + workload * WORKLOAD_WEIGHT
        + recovery * RECOVERY_WEIGHT
        + mental * MENTAL_WEIGHT
        + lower_body * LOWER_BODY_WEIGHT;

    RegionScores {
        arm_load: round_to(arm_load, 2),
        workload: round_to(workload, 2),
        recovery: round_to(recovery, 2),
        mental: round_to(mental, 2),
        lower_body: round_to(lower_body, 2),
        total_risk: round_to(total_risk, 2),
    }
}
