//! Closed vocabularies shared by agents and the decision pipeline

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A named learning-failure phenomenon, identified by a stable `Mxx` id.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Moment {
    #[serde(rename = "M01")]
    AttentionDrop,
    #[serde(rename = "M02")]
    CognitiveOverload,
    #[serde(rename = "M03")]
    KnowledgeGap,
    #[serde(rename = "M04")]
    MasteryVerification,
    #[serde(rename = "M05")]
    PreLessonAnxiety,
    #[serde(rename = "M06")]
    StealthBoredom,
    #[serde(rename = "M07")]
    Frustration,
    #[serde(rename = "M08")]
    Insight,
    #[serde(rename = "M09")]
    ConfidenceCollapse,
    #[serde(rename = "M10")]
    Fatigue,
    #[serde(rename = "M11")]
    PhysicalDiscomfort,
    #[serde(rename = "M12")]
    CircadianPeak,
    #[serde(rename = "M13")]
    WrongMethod,
    #[serde(rename = "M14")]
    PseudoUnderstanding,
    #[serde(rename = "M15")]
    Misconception,
    #[serde(rename = "M16")]
    WorkingMemoryOverflow,
    #[serde(rename = "M17")]
    ForgettingCurve,
    #[serde(rename = "M18")]
    TransferFailure,
    #[serde(rename = "M19")]
    SleepWindow,
    #[serde(rename = "M20")]
    DopamineCrash,
    #[serde(rename = "M21")]
    Interruption,
    #[serde(rename = "M22")]
    PlateauEscape,
}

impl Moment {
    pub const ALL: [Moment; 22] = [
        Moment::AttentionDrop,
        Moment::CognitiveOverload,
        Moment::KnowledgeGap,
        Moment::MasteryVerification,
        Moment::PreLessonAnxiety,
        Moment::StealthBoredom,
        Moment::Frustration,
        Moment::Insight,
        Moment::ConfidenceCollapse,
        Moment::Fatigue,
        Moment::PhysicalDiscomfort,
        Moment::CircadianPeak,
        Moment::WrongMethod,
        Moment::PseudoUnderstanding,
        Moment::Misconception,
        Moment::WorkingMemoryOverflow,
        Moment::ForgettingCurve,
        Moment::TransferFailure,
        Moment::SleepWindow,
        Moment::DopamineCrash,
        Moment::Interruption,
        Moment::PlateauEscape,
    ];

    /// Stable wire id, e.g. `"M07"`.
    pub fn id(&self) -> &'static str {
        match self {
            Moment::AttentionDrop => "M01",
            Moment::CognitiveOverload => "M02",
            Moment::KnowledgeGap => "M03",
            Moment::MasteryVerification => "M04",
            Moment::PreLessonAnxiety => "M05",
            Moment::StealthBoredom => "M06",
            Moment::Frustration => "M07",
            Moment::Insight => "M08",
            Moment::ConfidenceCollapse => "M09",
            Moment::Fatigue => "M10",
            Moment::PhysicalDiscomfort => "M11",
            Moment::CircadianPeak => "M12",
            Moment::WrongMethod => "M13",
            Moment::PseudoUnderstanding => "M14",
            Moment::Misconception => "M15",
            Moment::WorkingMemoryOverflow => "M16",
            Moment::ForgettingCurve => "M17",
            Moment::TransferFailure => "M18",
            Moment::SleepWindow => "M19",
            Moment::DopamineCrash => "M20",
            Moment::Interruption => "M21",
            Moment::PlateauEscape => "M22",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Moment::AttentionDrop => "attention drop",
            Moment::CognitiveOverload => "cognitive overload",
            Moment::KnowledgeGap => "knowledge gap",
            Moment::MasteryVerification => "mastery verification",
            Moment::PreLessonAnxiety => "pre-lesson anxiety",
            Moment::StealthBoredom => "stealth boredom",
            Moment::Frustration => "frustration",
            Moment::Insight => "insight",
            Moment::ConfidenceCollapse => "confidence collapse",
            Moment::Fatigue => "fatigue",
            Moment::PhysicalDiscomfort => "physical discomfort",
            Moment::CircadianPeak => "circadian peak",
            Moment::WrongMethod => "wrong method",
            Moment::PseudoUnderstanding => "pseudo-understanding",
            Moment::Misconception => "misconception",
            Moment::WorkingMemoryOverflow => "working-memory overflow",
            Moment::ForgettingCurve => "forgetting curve",
            Moment::TransferFailure => "transfer failure",
            Moment::SleepWindow => "sleep window",
            Moment::DopamineCrash => "dopamine crash",
            Moment::Interruption => "interruption",
            Moment::PlateauEscape => "plateau escape",
        }
    }
}

impl std::fmt::Display for Moment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Moment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Moment::ALL
            .iter()
            .copied()
            .find(|m| m.id() == s)
            .ok_or_else(|| Error::UnknownMoment(s.to_string()))
    }
}

/// Concrete action surfaced to the consuming application.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum InterventionKind {
    PauseVideo,
    SimplifyPhrase,
    ExplainConcept,
    RescueFrustration,
    SkipToChallenge,
    ShowKnowledgeMirror,
    ForceBreak,
    CheckpointConcepts,
    ClearMisconception,
    MethodOverhaul,
}

impl InterventionKind {
    pub const ALL: [InterventionKind; 10] = [
        InterventionKind::PauseVideo,
        InterventionKind::SimplifyPhrase,
        InterventionKind::ExplainConcept,
        InterventionKind::RescueFrustration,
        InterventionKind::SkipToChallenge,
        InterventionKind::ShowKnowledgeMirror,
        InterventionKind::ForceBreak,
        InterventionKind::CheckpointConcepts,
        InterventionKind::ClearMisconception,
        InterventionKind::MethodOverhaul,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionKind::PauseVideo => "pause_video",
            InterventionKind::SimplifyPhrase => "simplify_phrase",
            InterventionKind::ExplainConcept => "explain_concept",
            InterventionKind::RescueFrustration => "rescue_frustration",
            InterventionKind::SkipToChallenge => "skip_to_challenge",
            InterventionKind::ShowKnowledgeMirror => "show_knowledge_mirror",
            InterventionKind::ForceBreak => "force_break",
            InterventionKind::CheckpointConcepts => "checkpoint_concepts",
            InterventionKind::ClearMisconception => "clear_misconception",
            InterventionKind::MethodOverhaul => "method_overhaul",
        }
    }
}

impl std::fmt::Display for InterventionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InterventionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        InterventionKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::UnknownInterventionKind(s.to_string()))
    }
}

/// Coarse priority band. Ordering follows `rank()`, so `Critical` is the maximum.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Urgency {
    pub fn rank(&self) -> u8 {
        match self {
            Urgency::Critical => 4,
            Urgency::High => 3,
            Urgency::Medium => 2,
            Urgency::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Critical => "critical",
            Urgency::High => "high",
            Urgency::Medium => "medium",
            Urgency::Low => "low",
        }
    }
}

impl PartialOrd for Urgency {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Urgency {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "critical" => Ok(Urgency::Critical),
            "high" => Ok(Urgency::High),
            "medium" => Ok(Urgency::Medium),
            "low" => Ok(Urgency::Low),
            other => Err(Error::UnknownUrgency(other.to_string())),
        }
    }
}

/// Direction of the response-time series over the recent window.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseTimeTrend {
    #[default]
    Stable,
    Increasing,
    Decreasing,
}
