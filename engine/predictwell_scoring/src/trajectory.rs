//! Two- and four-week projection of the portal fall-risk index.

use serde::{Deserialize, Serialize};

use crate::assessment::round_to;
use crate::portal::{reading, FallCount, PortalBucket, PortalIntake, LOW_SPO2, LOW_SYSTOLIC};

/// Points added per risk driver over one 14-day step.
pub const DRIVER_STEP: f64 = 2.5;
/// Points removed per mitigating intervention over one 14-day step.
pub const MITIGATOR_STEP: f64 = 3.0;
/// Index the projection is pulled toward.
pub const RESTING_RISK: f64 = 35.0;
/// Fraction of the gap to [`RESTING_RISK`] closed per step.
pub const REVERSION: f64 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Rounded to one decimal.
    pub score: f64,
    pub bucket: PortalBucket,
}

impl Projection {
    fn new(score: f64) -> Self {
        Self {
            score: round_to(score, 1),
            bucket: PortalBucket::from_score(score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub now: Projection,
    pub day_14: Projection,
    pub day_28: Projection,
}

/// Findings that push the index up between check-ins.
pub fn risk_drivers(intake: &PortalIntake) -> u32 {
    let a = intake.answers();
    let c = intake.conditions;
    let low_vitals = reading(intake.spo2).is_some_and(|v| v < LOW_SPO2)
        || reading(intake.bp_syst).is_some_and(|v| v < LOW_SYSTOLIC);
    [
        matches!(a.falls_12m, Some(FallCount::One | FallCount::TwoOrMore)),
        a.is_unsteady(),
        a.chair_rise_impaired(),
        a.memory_changed(),
        a.hazards_at_home(),
        c.gait_balance || c.neuropathy || c.dementia,
        low_vitals,
    ]
    .into_iter()
    .map(u32::from)
    .sum()
}

/// Interventions and follow-ups already in place.
pub fn mitigators(intake: &PortalIntake) -> u32 {
    let i = intake.interventions;
    let f = intake.followup;
    [
        i.pain,
        i.wound,
        f.pt,
        f.home_safety,
        f.med_review,
        f.orthostatics,
    ]
    .into_iter()
    .map(u32::from)
    .sum()
}

/// Project `now` (0–100) forward by two 14-day steps.
///
/// Each step adds the net driver/mitigator pressure and closes part of the
/// gap to [`RESTING_RISK`]; the result is clamped to `[0, 100]` before the
/// next step starts from it.
pub fn project_trajectory(now: f64, intake: &PortalIntake) -> Trajectory {
    let drivers = risk_drivers(intake);
    let relief = mitigators(intake);
    let pressure = f64::from(drivers) * DRIVER_STEP - f64::from(relief) * MITIGATOR_STEP;
    let step = |r: f64| (r + pressure + (RESTING_RISK - r) * REVERSION).clamp(0.0, 100.0);

    let r14 = step(now);
    let r28 = step(r14);
    log::debug!(
        "trajectory: drivers={drivers} mitigators={relief} {now} -> {r14:.2} -> {r28:.2}"
    );
    Trajectory {
        now: Projection::new(now),
        day_14: Projection::new(r14),
        day_28: Projection::new(r28),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::assess_portal_intake;
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;

    fn intake(json: &str) -> PortalIntake {
        serde_json::from_str(json).expect("portal intake")
    }

    #[test]
    fn quiet_profile_drifts_toward_resting_risk() {
        let t = project_trajectory(0.0, &PortalIntake::default());
        // 35 * 0.08, then 2.8 + 32.2 * 0.08
        assert_eq!(t.day_14.score, 2.8);
        assert_eq!(t.day_28.score, 5.4);
        assert_eq!(t.day_28.bucket, PortalBucket::Low);

        let t = project_trajectory(RESTING_RISK, &PortalIntake::default());
        assert_abs_diff_eq!(t.day_28.score, 35.0, epsilon = 1e-12);
    }

    #[test]
    fn many_drivers_saturate_at_the_top() {
        let p = intake(
            r#"{"inputs": {"age": "82", "living": "alone", "falls_12m": "2plus",
                "unsteady": "sometimes", "fear_fall": "yes", "chair_rise": "hard",
                "dizzy": "occasional", "med_count": "8+", "memory": "mild",
                "mood": "sometimes", "activity": "low", "home_haz": "some"}}"#,
        );
        assert_eq!(risk_drivers(&p), 5);
        let now = assess_portal_intake(&p).score;
        let t = project_trajectory(now, &p);
        // 88 + 12.5 - 53 * 0.08
        assert_eq!(t.now.score, 88.0);
        assert_eq!(t.day_14.score, 96.3);
        assert_eq!(t.day_28.score, 100.0);
        assert_eq!(t.day_28.bucket, PortalBucket::VeryHigh);
    }

    #[test]
    fn follow_up_plan_pulls_the_index_down() {
        let p = intake(
            r#"{
                "pt_age": 70, "falls_12m_doctor": "1",
                "spo2": 90, "hr": 110, "bp_syst": 95, "bp_diast": 70,
                "temp": 100.4, "glucose_fasting": 200,
                "conditions": {"neuropathy": true, "vision": true},
                "orthostat_sympt": "Dizziness",
                "interventions": {"pain": true},
                "followup": {"pt": true, "med_review": true}
            }"#,
        );
        // Only the patient-reported fall history counts as a driver.
        assert_eq!(risk_drivers(&p), 2);
        assert_eq!(mitigators(&p), 3);

        let now = assess_portal_intake(&p).score;
        assert_eq!(now, 58.0);
        let t = project_trajectory(now, &p);
        // 58 - 4 - 23 * 0.08 = 52.16, then 52.16 - 4 - 17.16 * 0.08
        assert_eq!(t.now.bucket, PortalBucket::High);
        assert_eq!(t.day_14.score, 52.2);
        assert_eq!(t.day_14.bucket, PortalBucket::Moderate);
        assert_eq!(t.day_28.score, 46.8);
    }

    #[test]
    fn heavy_mitigation_floors_at_zero() {
        let p = intake(
            r#"{"interventions": {"pain": true, "wound": true},
                "followup": {"pt": true, "home_safety": true, "med_review": true, "orthostatics": true}}"#,
        );
        assert_eq!(mitigators(&p), 6);
        let t = project_trajectory(0.0, &p);
        assert_eq!(t.day_14.score, 0.0);
        assert_eq!(t.day_28.score, 0.0);
    }

    #[test]
    fn low_systolic_alone_is_a_driver() {
        assert_eq!(risk_drivers(&intake(r#"{"bp_syst": 95}"#)), 1);
        assert_eq!(risk_drivers(&intake(r#"{"bp_syst": 0, "spo2": 0}"#)), 0);
    }
}
