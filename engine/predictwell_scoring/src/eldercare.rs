//! Rule-based fall/cognition risk for older adults.

use serde::{Deserialize, Serialize};

use crate::assessment::{RiskAssessment, RiskFlag};
use crate::error::{check_range, Result};

/// Weekly eldercare check-in.
///
/// Missing fields take the form defaults; an omitted `age` fails validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EldercareCheckIn {
    /// 50..=120
    pub age: u32,
    pub recent_fall: bool,
    /// Days with instability in the last week, 0..=7
    pub instability_last_week: u32,
    pub meds_changed: bool,
    /// 1 (poor) ..= 5 (good)
    pub sleep_quality: u32,
    /// 0.0..=3.0
    pub gait_speed_m_s: f64,
    /// Words recalled out of three, 0..=3
    pub word_recall_3_item: u32,
    /// 0..=5
    pub depression_flags: u32,
}

impl Default for EldercareCheckIn {
    fn default() -> Self {
        Self {
            age: 0,
            recent_fall: false,
            instability_last_week: 0,
            meds_changed: false,
            sleep_quality: 3,
            gait_speed_m_s: 1.0,
            word_recall_3_item: 3,
            depression_flags: 0,
        }
    }
}

const SLOW_GAIT_M_S: f64 = 0.8;

impl EldercareCheckIn {
    pub fn validate(&self) -> Result<()> {
        check_range("age", self.age, 50.0, 120.0)?;
        check_range("instability_last_week", self.instability_last_week, 0.0, 7.0)?;
        check_range("sleep_quality", self.sleep_quality, 1.0, 5.0)?;
        check_range("gait_speed_m_s", self.gait_speed_m_s, 0.0, 3.0)?;
        check_range("word_recall_3_item", self.word_recall_3_item, 0.0, 3.0)?;
        check_range("depression_flags", self.depression_flags, 0.0, 5.0)?;
        Ok(())
    }
}

/// Score a check-in on the 0–100 scale.
///
/// Age adds 0.4 per year over 50; falls, medication changes, slow gait and
/// poor recall add fixed amounts; instability, poor sleep and depression add
/// capped per-unit amounts.
pub fn assess_eldercare(c: &EldercareCheckIn) -> Result<RiskAssessment> {
    c.validate()?;

    let mut score = f64::from(c.age - 50) * 0.4;
    let mut flags = Vec::new();

    if c.recent_fall {
        score += 18.0;
        flags.push(RiskFlag::RecentFall);
    }
    score += (f64::from(c.instability_last_week) * 3.0).min(15.0);
    if c.meds_changed {
        score += 8.0;
        flags.push(RiskFlag::MedicationChange);
    }
    score += f64::from(3u32.saturating_sub(c.sleep_quality)) * 2.5;
    if c.gait_speed_m_s < SLOW_GAIT_M_S {
        score += 12.0;
        flags.push(RiskFlag::SlowGait);
    }
    if c.word_recall_3_item <= 1 {
        score += 10.0;
        flags.push(RiskFlag::LowWordRecall);
    }
    score += (f64::from(c.depression_flags) * 2.0).min(8.0);

    let assessment = RiskAssessment::from_raw(score, flags);
    log::debug!(
        "eldercare: score={} level={} flags={:?}",
        assessment.score,
        assessment.level,
        assessment.flags
    );
    Ok(assessment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::RiskLevel;
    use crate::error::ScoringError;
    use pretty_assertions::assert_eq;

    fn checkin(age: u32) -> EldercareCheckIn {
        EldercareCheckIn {
            age,
            ..Default::default()
        }
    }

    #[test]
    fn healthy_fifty_year_old_scores_zero() {
        let a = assess_eldercare(&checkin(50)).unwrap();
        assert_eq!(a.score, 0.0);
        assert_eq!(a.level, RiskLevel::Low);
        assert!(a.flags.is_empty());
    }

    #[test]
    fn age_alone_adds_point_four_per_year() {
        let a = assess_eldercare(&checkin(80)).unwrap();
        assert_eq!(a.score, 12.0);
    }

    #[test]
    fn every_rule_firing() {
        let c = EldercareCheckIn {
            age: 85,
            recent_fall: true,
            instability_last_week: 7,
            meds_changed: true,
            sleep_quality: 1,
            gait_speed_m_s: 0.5,
            word_recall_3_item: 0,
            depression_flags: 5,
        };
        // 14 + 18 + 15 + 8 + 5 + 12 + 10 + 8 = 90
        let a = assess_eldercare(&c).unwrap();
        assert_eq!(a.score, 90.0);
        assert_eq!(a.level, RiskLevel::High);
        assert_eq!(
            a.flags,
            vec![
                RiskFlag::RecentFall,
                RiskFlag::MedicationChange,
                RiskFlag::SlowGait,
                RiskFlag::LowWordRecall,
            ]
        );
    }

    #[test]
    fn moderate_case() {
        let c = EldercareCheckIn {
            age: 78,
            recent_fall: true,
            instability_last_week: 2,
            sleep_quality: 2,
            ..Default::default()
        };
        // 11.2 + 18 + 6 + 2.5 = 37.7, still low until a med change is added
        assert_eq!(assess_eldercare(&c).unwrap().level, RiskLevel::Low);
        let c = EldercareCheckIn {
            meds_changed: true,
            ..c
        };
        let a = assess_eldercare(&c).unwrap();
        assert_eq!(a.score, 45.7);
        assert_eq!(a.level, RiskLevel::Moderate);
    }

    #[test]
    fn gait_threshold_is_strict() {
        let c = EldercareCheckIn {
            gait_speed_m_s: 0.8,
            ..checkin(60)
        };
        assert!(assess_eldercare(&c).unwrap().flags.is_empty());
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        let err = assess_eldercare(&checkin(49)).unwrap_err();
        assert!(matches!(err, ScoringError::OutOfRange { field: "age", .. }));

        let c = EldercareCheckIn {
            sleep_quality: 0,
            ..checkin(70)
        };
        assert!(matches!(
            assess_eldercare(&c).unwrap_err(),
            ScoringError::OutOfRange {
                field: "sleep_quality",
                ..
            }
        ));
    }

    #[test]
    fn json_check_in_uses_defaults_for_missing_fields() {
        let c: EldercareCheckIn =
            serde_json::from_str(r#"{"age": 72, "recent_fall": true}"#).unwrap();
        assert_eq!(c.sleep_quality, 3);
        assert_eq!(c.word_recall_3_item, 3);
        // 8.8 + 18
        assert_eq!(assess_eldercare(&c).unwrap().score, 26.8);
    }
}
