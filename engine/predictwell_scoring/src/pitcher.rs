//! Workload and mechanics risk for pitchers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assessment::{RiskAssessment, RiskFlag};
use crate::error::{check_range, Result, ScoringError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitcherLevel {
    Youth,
    /// High school
    Hs,
    College,
    Pro,
}

/// Pitch-count and rest limits for one competitive level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadCaps {
    pub daily: u32,
    /// Fewer rest days than this counts as insufficient rest.
    pub rest_ok: u32,
    pub three_day: u32,
}

impl PitcherLevel {
    pub const fn caps(self) -> WorkloadCaps {
        match self {
            PitcherLevel::Youth => WorkloadCaps {
                daily: 75,
                rest_ok: 2,
                three_day: 120,
            },
            PitcherLevel::Hs => WorkloadCaps {
                daily: 95,
                rest_ok: 1,
                three_day: 160,
            },
            PitcherLevel::College => WorkloadCaps {
                daily: 110,
                rest_ok: 1,
                three_day: 220,
            },
            PitcherLevel::Pro => WorkloadCaps {
                daily: 120,
                rest_ok: 1,
                three_day: 260,
            },
        }
    }
}

impl FromStr for PitcherLevel {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youth" => Ok(PitcherLevel::Youth),
            "hs" => Ok(PitcherLevel::Hs),
            "college" => Ok(PitcherLevel::College),
            "pro" => Ok(PitcherLevel::Pro),
            _ => Err(ScoringError::UnknownLevel(s.to_string())),
        }
    }
}

impl fmt::Display for PitcherLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PitcherLevel::Youth => "youth",
            PitcherLevel::Hs => "hs",
            PitcherLevel::College => "college",
            PitcherLevel::Pro => "pro",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitcherInput {
    pub age: u32,
    pub level: PitcherLevel,
    pub pitches_today: u32,
    pub pitches_last3d: u32,
    pub rest_days: u32,
    #[serde(default, alias = "elbow_pain_0_10")]
    pub elbow_pain: u32,
    #[serde(default, alias = "shoulder_pain_0_10")]
    pub shoulder_pain: u32,
    /// Velocity lost against the pitcher's norm; negative means a gain.
    #[serde(default, alias = "velo_drop_mph")]
    pub velo_drop: f64,
    #[serde(default)]
    pub mechanics_flags: u32,
}

impl PitcherInput {
    pub fn validate(&self) -> Result<()> {
        check_range("age", self.age, 10.0, 50.0)?;
        check_range("pitches_today", self.pitches_today, 0.0, 200.0)?;
        check_range("pitches_last3d", self.pitches_last3d, 0.0, 400.0)?;
        check_range("rest_days", self.rest_days, 0.0, 7.0)?;
        check_range("elbow_pain", self.elbow_pain, 0.0, 10.0)?;
        check_range("shoulder_pain", self.shoulder_pain, 0.0, 10.0)?;
        check_range("velo_drop", self.velo_drop, -10.0, 20.0)?;
        check_range("mechanics_flags", self.mechanics_flags, 0.0, 5.0)?;
        Ok(())
    }
}

const HIGH_PAIN: u32 = 5;
const MANY_MECHANICS_FLAGS: u32 = 3;

/// Score a pitcher's session on the 0–100 scale against the caps for their level.
pub fn assess_pitcher(p: &PitcherInput) -> Result<RiskAssessment> {
    p.validate()?;
    let caps = p.level.caps();
    let mut score = 0.0;
    let mut flags = Vec::new();

    if p.pitches_today > caps.daily {
        let over = f64::from(p.pitches_today - caps.daily);
        score += (over * 0.6).min(25.0);
        flags.push(RiskFlag::OverDailyCap);
    }
    if p.pitches_last3d > caps.three_day {
        let over = f64::from(p.pitches_last3d - caps.three_day);
        score += (over * 0.3).min(20.0);
        flags.push(RiskFlag::HighThreeDayWorkload);
    }
    if p.rest_days < caps.rest_ok {
        score += 12.0;
        flags.push(RiskFlag::InsufficientRest);
    }

    let pain = p.elbow_pain.max(p.shoulder_pain);
    score += f64::from(pain) * 3.0;
    if pain >= HIGH_PAIN {
        flags.push(RiskFlag::HighPain);
    }
    score += p.velo_drop.max(0.0) * 1.2;

    score += (f64::from(p.mechanics_flags) * 4.0).min(16.0);
    if p.mechanics_flags >= MANY_MECHANICS_FLAGS {
        flags.push(RiskFlag::MultipleMechanicsFlags);
    }
    if p.level == PitcherLevel::Youth {
        score += 6.0;
    }

    let assessment = RiskAssessment::from_raw(score, flags);
    log::debug!(
        "pitcher[{}]: score={} level={} flags={:?}",
        p.level,
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
    use pretty_assertions::assert_eq;

    fn rested(level: PitcherLevel) -> PitcherInput {
        PitcherInput {
            age: 17,
            level,
            pitches_today: 40,
            pitches_last3d: 40,
            rest_days: 3,
            elbow_pain: 0,
            shoulder_pain: 0,
            velo_drop: 0.0,
            mechanics_flags: 0,
        }
    }

    #[test]
    fn light_session_is_low_risk() {
        let a = assess_pitcher(&rested(PitcherLevel::Hs)).unwrap();
        assert_eq!(a.score, 0.0);
        assert_eq!(a.level, RiskLevel::Low);
        assert!(a.flags.is_empty());
    }

    #[test]
    fn youth_carry_a_base_penalty() {
        assert_eq!(assess_pitcher(&rested(PitcherLevel::Youth)).unwrap().score, 6.0);
    }

    #[test]
    fn overuse_session_hits_every_rule() {
        let p = PitcherInput {
            pitches_today: 140,
            pitches_last3d: 250,
            rest_days: 0,
            elbow_pain: 6,
            shoulder_pain: 2,
            velo_drop: 3.0,
            mechanics_flags: 3,
            ..rested(PitcherLevel::Hs)
        };
        // 25 (capped from 27) + 20 (capped from 27) + 12 + 18 + 3.6 + 12
        let a = assess_pitcher(&p).unwrap();
        assert_eq!(a.score, 90.6);
        assert_eq!(a.level, RiskLevel::High);
        assert_eq!(
            a.flags,
            vec![
                RiskFlag::OverDailyCap,
                RiskFlag::HighThreeDayWorkload,
                RiskFlag::InsufficientRest,
                RiskFlag::HighPain,
                RiskFlag::MultipleMechanicsFlags,
            ]
        );
    }

    #[test]
    fn caps_depend_on_level() {
        let p = PitcherInput {
            pitches_today: 100,
            ..rested(PitcherLevel::Hs)
        };
        // 5 over the high-school cap
        assert_eq!(assess_pitcher(&p).unwrap().score, 3.0);
        let p = PitcherInput {
            level: PitcherLevel::Pro,
            ..p
        };
        assert_eq!(assess_pitcher(&p).unwrap().score, 0.0);
    }

    #[test]
    fn velocity_gain_is_not_rewarded() {
        let p = PitcherInput {
            velo_drop: -4.0,
            ..rested(PitcherLevel::College)
        };
        assert_eq!(assess_pitcher(&p).unwrap().score, 0.0);
    }

    #[test]
    fn level_parsing() {
        assert_eq!("HS".parse::<PitcherLevel>().unwrap(), PitcherLevel::Hs);
        assert_eq!(" pro ".parse::<PitcherLevel>().unwrap(), PitcherLevel::Pro);
        let err = "minor".parse::<PitcherLevel>().unwrap_err();
        assert!(matches!(err, ScoringError::UnknownLevel(ref s) if s == "minor"));
        assert_eq!(PitcherLevel::College.to_string(), "college");
    }

    #[test]
    fn json_accepts_suffixed_field_names() {
        let p: PitcherInput = serde_json::from_str(
            r#"{"age": 16, "level": "hs", "pitches_today": 60, "pitches_last3d": 90,
                "rest_days": 1, "elbow_pain_0_10": 5, "velo_drop_mph": 1.5}"#,
        )
        .unwrap();
        assert_eq!(p.elbow_pain, 5);
        assert_eq!(p.velo_drop, 1.5);
        assert_eq!(p.mechanics_flags, 0);
        // 15 + 1.8
        assert_eq!(assess_pitcher(&p).unwrap().score, 16.8);
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        let p = PitcherInput {
            pitches_today: 250,
            ..rested(PitcherLevel::Pro)
        };
        assert!(matches!(
            assess_pitcher(&p).unwrap_err(),
            ScoringError::OutOfRange {
                field: "pitches_today",
                ..
            }
        ));
        assert!(serde_json::from_str::<PitcherInput>(
            r#"{"age": 16, "level": "minors", "pitches_today": 1, "pitches_last3d": 1, "rest_days": 1}"#
        )
        .is_err());
    }
}
