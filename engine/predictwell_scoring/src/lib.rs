//! Deterministic risk scoring for PredictWell check-ins.
//!
//! Each scorer is a fixed weighted sum or rule cascade over a questionnaire:
//!
//! - [`assess_eldercare`]: fall/cognition risk on a 0–100 scale
//! - [`assess_pitcher`]: workload and mechanics risk on a 0–100 scale
//! - [`regional_scores`]: per-region fatigue scores for a pitcher intake
//! - [`wellness_risk`]: logistic workload/sleep/stress risk in `[0, 1]`
//! - [`assess_portal_intake`]: patient/clinician portal fall-risk index on a
//!   0–100 scale, with [`project_trajectory`] for the 14- and 28-day outlook
//! - [`SignalWeights::score`]: normalized daily index in `[0, 1]`, the value
//!   tracked over time by `predictwell_trend`
//!
//! Weight, band and cap tables are plain immutable values passed to the
//! scorers; nothing here holds global state.

pub mod assessment;
pub mod athletics;
pub mod band;
pub mod eldercare;
pub mod error;
pub mod pitcher;
pub mod portal;
pub mod trajectory;
pub mod weights;
pub mod wellness;

pub use assessment::{RiskAssessment, RiskFlag, RiskLevel};
pub use athletics::{regional_scores, PitcherIntake, RegionScores};
pub use band::{band_for, Band, BandTable, RiskBand};
pub use eldercare::{assess_eldercare, EldercareCheckIn};
pub use error::{Result, ScoringError};
pub use pitcher::{assess_pitcher, PitcherInput, PitcherLevel, WorkloadCaps};
pub use portal::{
    assess_portal_intake, Contributor, PortalAnswers, PortalAssessment, PortalBucket, PortalIntake,
};
pub use trajectory::{project_trajectory, Projection, Trajectory};
pub use weights::{DailySignals, SignalWeights};
pub use wellness::{wellness_risk, WellnessInput, WellnessRisk};
