//! Per-cycle signal structs produced by the acquisition layers
//!
//! The engine consumes these as already-computed values. Missing fields
//! deserialize to neutral defaults so partial frames stay usable.

use crate::types::ResponseTimeTrend;
use serde::{Deserialize, Serialize};

/// Aggregated interaction signals.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BehavioralSignals {
    pub frustration_score: f64,
    pub fatigue_score: f64,
    pub response_time_mean_ms: f64,
    pub response_time_trend: ResponseTimeTrend,
    pub fast_answer_rate: f64,
    pub rewinds_per_minute: f64,
    pub rewind_burst: bool,
    pub idle_frequency: f64,
    pub interaction_variance: f64,
    pub insight_detected: bool,
    pub reward_ready: bool,
}

/// Aggregated camera signals. Absent entirely when no camera is available.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WebcamSignals {
    pub attention_score: f64,
    pub off_screen_triggered: bool,
    pub off_screen_duration_ms: f64,
    pub frustration_boost: f64,
    pub boredom_score: f64,
    pub discomfort_probability: f64,
    pub fatigue_boost: f64,
    pub face_detected: bool,
}

impl Default for WebcamSignals {
    fn default() -> Self {
        Self {
            attention_score: 0.8,
            off_screen_triggered: false,
            off_screen_duration_ms: 0.0,
            frustration_boost: 0.0,
            boredom_score: 0.0,
            discomfort_probability: 0.0,
            fatigue_boost: 0.0,
            face_detected: true,
        }
    }
}

/// Aggregated knowledge-graph signals.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KnowledgeSignals {
    pub current_segment_mastery: f64,
    pub gaps_pending: Vec<String>,
    pub misconceptions_pending: Vec<String>,
    pub plateau_detected: bool,
    pub plateau_concept_id: Option<String>,
}

/// Aggregated language-analysis signals. Absent when no transcript is available.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NlpSignals {
    pub overload_detected: bool,
    pub target_simplification_phrase: Option<String>,
    pub max_complexity_score: f64,
    pub confusion_score: f64,
    pub entities_found: Vec<String>,
    pub overflow_risk: bool,
    pub unconfirmed_count: u32,
    pub concepts_to_review: Vec<String>,
}

/// Everything the acquisition layers hand over for one cycle.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SignalFrame {
    pub behavioral: BehavioralSignals,
    pub webcam: Option<WebcamSignals>,
    pub knowledge: Option<KnowledgeSignals>,
    pub nlp: Option<NlpSignals>,
    pub lesson_position_ms: f64,
    pub session_duration_minutes: f64,
}

impl SignalFrame {
    pub fn new(behavioral: BehavioralSignals) -> Self {
        Self {
            behavioral,
            ..Default::default()
        }
    }

    pub fn with_webcam(mut self, webcam: WebcamSignals) -> Self {
        self.webcam = Some(webcam);
        self
    }

    pub fn with_knowledge(mut self, knowledge: KnowledgeSignals) -> Self {
        self.knowledge = Some(knowledge);
        self
    }

    pub fn with_nlp(mut self, nlp: NlpSignals) -> Self {
        self.nlp = Some(nlp);
        self
    }

    pub fn at_position(mut self, lesson_position_ms: f64) -> Self {
        self.lesson_position_ms = lesson_position_ms;
        self
    }

    pub fn with_session_minutes(mut self, minutes: f64) -> Self {
        self.session_duration_minutes = minutes;
        self
    }
}
