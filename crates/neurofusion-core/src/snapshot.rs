//! Per-cycle fusion snapshot and per-agent audit records

use crate::proposal::InterventionProposal;
use crate::signals::{BehavioralSignals, KnowledgeSignals, NlpSignals, SignalFrame, WebcamSignals};
use crate::types::Moment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Audit record for one agent in one cycle. Written by the graph, never by agents.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AgentState {
    pub agent_name: String,
    pub last_detection_timestamp: f64,
    pub detection_count_session: u32,
    pub cooldown_until: f64,
    pub active_moments: Vec<Moment>,
    pub confidence: f64,
}

/// Everything agents may read during one cycle.
///
/// Built fresh by the coordinator each cycle and handed to agents by shared
/// reference. `agent_states` and `proposed_interventions` stay empty until the
/// graph returns its updated copy.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FusionSnapshot {
    pub session_id: String,
    pub student_id: String,
    pub timestamp: f64,
    pub cycle_number: u64,

    pub behavioral: BehavioralSignals,
    pub webcam: Option<WebcamSignals>,
    pub knowledge: KnowledgeSignals,
    pub nlp: Option<NlpSignals>,

    pub session_duration_minutes: f64,
    pub lesson_position_ms: f64,
    /// Moments fired within the recent window, oldest first.
    pub recent_interventions: Vec<Moment>,

    pub agent_states: BTreeMap<String, AgentState>,
    pub proposed_interventions: Vec<InterventionProposal>,
}

impl FusionSnapshot {
    pub fn new(session_id: impl Into<String>, student_id: impl Into<String>, timestamp: f64) -> Self {
        Self {
            session_id: session_id.into(),
            student_id: student_id.into(),
            timestamp,
            cycle_number: 0,
            behavioral: BehavioralSignals::default(),
            webcam: None,
            knowledge: KnowledgeSignals::default(),
            nlp: None,
            session_duration_minutes: 0.0,
            lesson_position_ms: 0.0,
            recent_interventions: Vec::new(),
            agent_states: BTreeMap::new(),
            proposed_interventions: Vec::new(),
        }
    }

    /// Snapshot for one coordinator cycle. Absent knowledge becomes the neutral default.
    pub fn from_frame(
        session_id: impl Into<String>,
        student_id: impl Into<String>,
        timestamp: f64,
        cycle_number: u64,
        frame: SignalFrame,
        recent_interventions: Vec<Moment>,
    ) -> Self {
        Self {
            cycle_number,
            behavioral: frame.behavioral,
            webcam: frame.webcam,
            knowledge: frame.knowledge.unwrap_or_default(),
            nlp: frame.nlp,
            session_duration_minutes: frame.session_duration_minutes,
            lesson_position_ms: frame.lesson_position_ms,
            recent_interventions,
            ..Self::new(session_id, student_id, timestamp)
        }
    }

    pub fn with_behavioral(mut self, behavioral: BehavioralSignals) -> Self {
        self.behavioral = behavioral;
        self
    }

    pub fn with_webcam(mut self, webcam: WebcamSignals) -> Self {
        self.webcam = Some(webcam);
        self
    }

    pub fn with_knowledge(mut self, knowledge: KnowledgeSignals) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn with_nlp(mut self, nlp: NlpSignals) -> Self {
        self.nlp = Some(nlp);
        self
    }

    pub fn with_cycle(mut self, cycle_number: u64) -> Self {
        self.cycle_number = cycle_number;
        self
    }

    pub fn with_lesson_position(mut self, lesson_position_ms: f64) -> Self {
        self.lesson_position_ms = lesson_position_ms;
        self
    }

    pub fn with_session_minutes(mut self, minutes: f64) -> Self {
        self.session_duration_minutes = minutes;
        self
    }
}
