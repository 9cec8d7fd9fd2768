//! Fall-risk index for the patient and clinician portal check-ins.
//!
//! The patient portal sends twelve short answers, usually nested under
//! `inputs` with compact tokens (`"2plus"`, `"hard"`, `"8+"`). The clinician
//! portal sends the same questions at the top level in its own wording,
//! together with vitals, condition checkboxes and follow-up plans. Both
//! vocabularies deserialize into the same answer enums.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::assessment::round_to;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Living {
    #[serde(rename = "alone", alias = "Alone")]
    Alone,
    #[serde(rename = "with_family", alias = "With family/partner")]
    WithFamily,
    #[serde(rename = "assisted", alias = "Assisted living")]
    Assisted,
    #[serde(rename = "facility", alias = "Skilled nursing facility")]
    Facility,
}

/// Falls in the last twelve months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallCount {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2plus", alias = "2 or more", alias = "2+")]
    TwoOrMore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Steadiness {
    #[serde(rename = "no", alias = "No")]
    Steady,
    #[serde(rename = "sometimes", alias = "Sometimes")]
    Sometimes,
    #[serde(rename = "often", alias = "Often")]
    Often,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallFear {
    #[serde(rename = "no", alias = "No")]
    No,
    #[serde(rename = "a_little", alias = "A little")]
    ALittle,
    #[serde(rename = "yes", alias = "Yes")]
    Yes,
}

/// Can the person rise from a chair without using their arms?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChairRise {
    #[serde(rename = "yes", alias = "Yes")]
    Yes,
    #[serde(rename = "hard", alias = "Yes, but hard")]
    Hard,
    #[serde(rename = "no", alias = "No")]
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dizziness {
    #[serde(rename = "no", alias = "No")]
    No,
    #[serde(rename = "occasional", alias = "Occasionally")]
    Occasional,
    #[serde(rename = "frequent", alias = "Often")]
    Frequent,
}

/// Number of daily medications. The two portals bucket differently; the
/// clinician's "0–2", "3–4" and "5 or more" map onto the patient's ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedCount {
    #[serde(rename = "0-3", alias = "0–2")]
    Few,
    #[serde(rename = "4-7", alias = "3–4", alias = "3-4")]
    Several,
    #[serde(rename = "8+", alias = "5 or more", alias = "5+")]
    Many,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryChange {
    #[serde(rename = "no", alias = "No")]
    No,
    #[serde(rename = "mild", alias = "Some days")]
    Mild,
    #[serde(rename = "significant", alias = "Most days")]
    Significant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "no", alias = "No")]
    Fine,
    #[serde(rename = "sometimes", alias = "Somewhat down/anxious")]
    SometimesLow,
    #[serde(rename = "often", alias = "Depressed or anxious")]
    OftenLow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activity {
    #[serde(rename = "low", alias = "Hardly active")]
    Low,
    #[serde(rename = "moderate", alias = "2–3x/week")]
    Moderate,
    #[serde(rename = "high", alias = "4+ x/week")]
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeHazards {
    #[serde(rename = "none", alias = "No")]
    Clear,
    #[serde(rename = "some", alias = "Yes")]
    Present,
    #[serde(rename = "many")]
    Many,
    #[serde(rename = "not_sure", alias = "Not sure")]
    NotSure,
}

impl HomeHazards {
    fn present_or_unknown(self) -> bool {
        self != HomeHazards::Clear
    }
}

/// The twelve portal questions. Every answer is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalAnswers {
    #[serde(deserialize_with = "lenient_age")]
    pub age: Option<u32>,
    pub living: Option<Living>,
    pub falls_12m: Option<FallCount>,
    pub unsteady: Option<Steadiness>,
    pub fear_fall: Option<FallFear>,
    pub chair_rise: Option<ChairRise>,
    #[serde(alias = "dizzy")]
    pub dizzy_stand: Option<Dizziness>,
    pub med_count: Option<MedCount>,
    #[serde(alias = "memory")]
    pub memory_change: Option<MemoryChange>,
    pub mood: Option<Mood>,
    pub activity: Option<Activity>,
    #[serde(alias = "home_haz")]
    pub home_hazards: Option<HomeHazards>,
}

impl PortalAnswers {
    /// Field-wise merge: answers given here win, gaps are filled from `fallback`.
    pub fn or(&self, fallback: &PortalAnswers) -> PortalAnswers {
        PortalAnswers {
            age: self.age.or(fallback.age),
            living: self.living.or(fallback.living),
            falls_12m: self.falls_12m.or(fallback.falls_12m),
            unsteady: self.unsteady.or(fallback.unsteady),
            fear_fall: self.fear_fall.or(fallback.fear_fall),
            chair_rise: self.chair_rise.or(fallback.chair_rise),
            dizzy_stand: self.dizzy_stand.or(fallback.dizzy_stand),
            med_count: self.med_count.or(fallback.med_count),
            memory_change: self.memory_change.or(fallback.memory_change),
            mood: self.mood.or(fallback.mood),
            activity: self.activity.or(fallback.activity),
            home_hazards: self.home_hazards.or(fallback.home_hazards),
        }
    }

    pub(crate) fn is_unsteady(&self) -> bool {
        matches!(
            self.unsteady,
            Some(Steadiness::Sometimes | Steadiness::Often)
        )
    }

    pub(crate) fn chair_rise_impaired(&self) -> bool {
        matches!(self.chair_rise, Some(ChairRise::Hard | ChairRise::No))
    }

    pub(crate) fn memory_changed(&self) -> bool {
        matches!(
            self.memory_change,
            Some(MemoryChange::Mild | MemoryChange::Significant)
        )
    }

    pub(crate) fn hazards_at_home(&self) -> bool {
        self.home_hazards.is_some_and(HomeHazards::present_or_unknown)
    }
}

/// Patient forms send the age as text.
fn lenient_age<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrText {
        Num(u32),
        Text(String),
    }
    Ok(match Option::<NumOrText>::deserialize(d)? {
        Some(NumOrText::Num(n)) => Some(n),
        Some(NumOrText::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Conditions {
    pub gait_balance: bool,
    pub neuropathy: bool,
    pub dementia: bool,
    pub depression: bool,
    pub osteoporosis: bool,
    pub vision: bool,
    pub hearing: bool,
}

impl Conditions {
    pub fn any(&self) -> bool {
        self.gait_balance
            || self.neuropathy
            || self.dementia
            || self.depression
            || self.osteoporosis
            || self.vision
            || self.hearing
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interventions {
    pub pain: bool,
    pub wound: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowUp {
    pub pt: bool,
    pub home_safety: bool,
    pub med_review: bool,
    pub orthostatics: bool,
}

/// Score chip computed by the patient portal, either bare or as `{"score": n, ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClientScore {
    Value(f64),
    Chip { score: f64 },
}

impl ClientScore {
    pub fn value(self) -> f64 {
        match self {
            ClientScore::Value(v) | ClientScore::Chip { score: v } => v,
        }
    }
}

/// A portal check-in from either portal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalIntake {
    #[serde(flatten)]
    pub answers: PortalAnswers,
    /// Patient-portal answers; they take precedence over top-level ones.
    pub inputs: Option<PortalAnswers>,
    pub client_score: Option<ClientScore>,

    pub pt_age: Option<u32>,
    pub falls_12m_doctor: Option<FallCount>,

    pub bp_syst: Option<f64>,
    pub bp_diast: Option<f64>,
    pub hr: Option<f64>,
    pub spo2: Option<f64>,
    /// Degrees Fahrenheit.
    pub temp: Option<f64>,
    pub glucose_fasting: Option<f64>,

    pub orthostatics: Option<String>,
    pub orthostat_sympt: Option<String>,
    pub postural_drops: Option<String>,

    pub conditions: Conditions,
    pub interventions: Interventions,
    pub followup: FollowUp,
}

impl PortalIntake {
    /// The answers the scorer sees after merging `inputs` over the top level.
    pub fn answers(&self) -> PortalAnswers {
        match &self.inputs {
            Some(inputs) => inputs.or(&self.answers),
            None => self.answers.clone(),
        }
    }
}

/// Unfilled form fields arrive as 0.
pub(crate) fn reading(v: Option<f64>) -> Option<f64> {
    v.filter(|x| *x != 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PortalBucket {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl PortalBucket {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            PortalBucket::VeryHigh
        } else if score >= 55.0 {
            PortalBucket::High
        } else if score >= 35.0 {
            PortalBucket::Moderate
        } else {
            PortalBucket::Low
        }
    }
}

impl fmt::Display for PortalBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PortalBucket::Low => "Low",
            PortalBucket::Moderate => "Moderate",
            PortalBucket::High => "High",
            PortalBucket::VeryHigh => "Very High",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contributor {
    AdvancedAge,
    Age75To84,
    Age65To74,
    LivesAlone,
    AssistedLiving,
    OneFall,
    RepeatFalls,
    UnsteadyGait,
    FearOfFalling,
    ChairRiseDifficult,
    CannotRiseFromChair,
    DizzyOnStanding,
    ModerateMedCount,
    Polypharmacy,
    MemoryChanges,
    MoodConcern,
    LowActivity,
    HazardsAtHome,
    LowSpo2,
    AbnormalHeartRate,
    LowBloodPressure,
    Fever,
    HighGlucose,
    GaitBalanceDisorder,
    Neuropathy,
    Dementia,
    Depression,
    Osteoporosis,
    SensoryImpairment,
    OrthostaticFindings,
}

impl fmt::Display for Contributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Contributor::AdvancedAge => "Advanced age (85+)",
            Contributor::Age75To84 => "Age 75–84",
            Contributor::Age65To74 => "Age 65–74",
            Contributor::LivesAlone => "Lives alone",
            Contributor::AssistedLiving => "Assisted living",
            Contributor::OneFall => "1 fall in 12m",
            Contributor::RepeatFalls => "2+ falls in 12m",
            Contributor::UnsteadyGait => "Unsteady gait",
            Contributor::FearOfFalling => "Fear of falling",
            Contributor::ChairRiseDifficult => "Chair rise difficult",
            Contributor::CannotRiseFromChair => "Cannot rise from chair",
            Contributor::DizzyOnStanding => "Orthostatic symptoms",
            Contributor::ModerateMedCount => "3–4 meds",
            Contributor::Polypharmacy => "Polypharmacy (5+)",
            Contributor::MemoryChanges => "Memory changes",
            Contributor::MoodConcern => "Mood concern",
            Contributor::LowActivity => "Low activity",
            Contributor::HazardsAtHome => "Home hazards",
            Contributor::LowSpo2 => "Low SpO₂",
            Contributor::AbnormalHeartRate => "Abnormal HR",
            Contributor::LowBloodPressure => "Orthostatic/low BP suspected",
            Contributor::Fever => "Fever",
            Contributor::HighGlucose => "High glucose",
            Contributor::GaitBalanceDisorder => "Gait/balance disorder",
            Contributor::Neuropathy => "Neuropathy",
            Contributor::Dementia => "Dementia",
            Contributor::Depression => "Depression",
            Contributor::Osteoporosis => "Osteoporosis",
            Contributor::SensoryImpairment => "Vision/hearing impairment",
            Contributor::OrthostaticFindings => "Orthostatic symptoms/drops",
        })
    }
}

/// Current fall-risk index on the 0–100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalAssessment {
    /// Clamped to `[0, 100]` and rounded to one decimal.
    pub score: f64,
    pub bucket: PortalBucket,
    /// In the order the rules fired.
    pub contributors: Vec<Contributor>,
}

pub(crate) const LOW_SPO2: f64 = 92.0;
pub(crate) const LOW_SYSTOLIC: f64 = 100.0;
const LOW_DIASTOLIC: f64 = 60.0;
const FEVER_F: f64 = 100.4;
const HIGH_GLUCOSE: f64 = 180.0;
const CONDITION_POINTS: f64 = 10.0;
/// The portal chip runs 0–33; scaled by this it becomes a floor on the index.
const CHIP_SCALE: f64 = 3.0;

/// Score a portal check-in.
///
/// Each answer adds fixed points; vitals, diagnoses and orthostatic findings
/// from the clinician portal add more. A client chip score, when present,
/// can only raise the result.
pub fn assess_portal_intake(intake: &PortalIntake) -> PortalAssessment {
    let a = intake.answers();
    let mut t = Tally::default();

    match a.age.or(intake.pt_age).unwrap_or(0) {
        85.. => t.add(14.0, Contributor::AdvancedAge),
        75..=84 => t.add(10.0, Contributor::Age75To84),
        65..=74 => t.add(6.0, Contributor::Age65To74),
        _ => {}
    }
    match a.living {
        Some(Living::Alone) => t.add(6.0, Contributor::LivesAlone),
        Some(Living::Assisted) => t.add(3.0, Contributor::AssistedLiving),
        _ => {}
    }
    match a.falls_12m.or(intake.falls_12m_doctor) {
        Some(FallCount::One) => t.add(8.0, Contributor::OneFall),
        Some(FallCount::TwoOrMore) => t.add(16.0, Contributor::RepeatFalls),
        _ => {}
    }
    if a.is_unsteady() {
        t.add(8.0, Contributor::UnsteadyGait);
    }
    if a.fear_fall == Some(FallFear::Yes) {
        t.add(6.0, Contributor::FearOfFalling);
    }
    match a.chair_rise {
        Some(ChairRise::Hard) => t.add(6.0, Contributor::ChairRiseDifficult),
        Some(ChairRise::No) => t.add(10.0, Contributor::CannotRiseFromChair),
        _ => {}
    }
    if matches!(
        a.dizzy_stand,
        Some(Dizziness::Occasional | Dizziness::Frequent)
    ) {
        t.add(6.0, Contributor::DizzyOnStanding);
    }
    match a.med_count {
        Some(MedCount::Several) => t.add(4.0, Contributor::ModerateMedCount),
        Some(MedCount::Many) => t.add(8.0, Contributor::Polypharmacy),
        _ => {}
    }
    if a.memory_changed() {
        t.add(6.0, Contributor::MemoryChanges);
    }
    if matches!(a.mood, Some(Mood::SometimesLow | Mood::OftenLow)) {
        t.add(4.0, Contributor::MoodConcern);
    }
    if a.activity == Some(Activity::Low) {
        t.add(6.0, Contributor::LowActivity);
    }
    if a.hazards_at_home() {
        t.add(6.0, Contributor::HazardsAtHome);
    }

    if reading(intake.spo2).is_some_and(|v| v < LOW_SPO2) {
        t.add(8.0, Contributor::LowSpo2);
    }
    if reading(intake.hr).is_some_and(|v| !(50.0..=100.0).contains(&v)) {
        t.add(4.0, Contributor::AbnormalHeartRate);
    }
    if let (Some(sbp), Some(dbp)) = (reading(intake.bp_syst), reading(intake.bp_diast)) {
        if sbp < LOW_SYSTOLIC || dbp < LOW_DIASTOLIC {
            t.add(8.0, Contributor::LowBloodPressure);
        }
    }
    if reading(intake.temp).is_some_and(|v| v >= FEVER_F) {
        t.add(3.0, Contributor::Fever);
    }
    if reading(intake.glucose_fasting).is_some_and(|v| v >= HIGH_GLUCOSE) {
        t.add(3.0, Contributor::HighGlucose);
    }

    let c = intake.conditions;
    for (present, contributor) in [
        (c.gait_balance, Contributor::GaitBalanceDisorder),
        (c.neuropathy, Contributor::Neuropathy),
        (c.dementia, Contributor::Dementia),
        (c.depression, Contributor::Depression),
        (c.osteoporosis, Contributor::Osteoporosis),
        (c.vision || c.hearing, Contributor::SensoryImpairment),
    ] {
        if present {
            t.contributors.push(contributor);
        }
    }
    if c.any() {
        t.score += CONDITION_POINTS;
    }

    if orthostatic_findings(intake) {
        t.add(8.0, Contributor::OrthostaticFindings);
    }

    if let Some(chip) = intake.client_score {
        t.score = t.score.max((chip.value() * CHIP_SCALE).min(100.0));
    }

    let score = round_to(t.score.clamp(0.0, 100.0), 1);
    log::debug!(
        "portal: score={score} contributors={} chip={:?}",
        t.contributors.len(),
        intake.client_score
    );
    PortalAssessment {
        score,
        bucket: PortalBucket::from_score(score),
        contributors: t.contributors,
    }
}

#[derive(Default)]
struct Tally {
    score: f64,
    contributors: Vec<Contributor>,
}

impl Tally {
    fn add(&mut self, points: f64, c: Contributor) {
        self.score += points;
        self.contributors.push(c);
    }
}

fn orthostatic_findings(intake: &PortalIntake) -> bool {
    matches!(
        intake.orthostatics.as_deref(),
        Some("Dizziness on standing" | "Lightheaded / near-syncope")
    ) || matches!(
        intake.orthostat_sympt.as_deref(),
        Some("Dizziness" | "Lightheadedness" | "Syncope")
    ) || intake.postural_drops.as_deref() == Some("Yes")
}
