//! Intervention proposals and agent evaluations

use crate::error::{Error, Result};
use crate::types::{InterventionKind, Moment, Urgency};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque key/value data interpreted by the consuming application.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Tracker cooldown applied when a builder does not set one.
pub const DEFAULT_COOLDOWN_SECONDS: u32 = 120;

/// A candidate action recommended by an agent. Immutable once built.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "ProposalRecord")]
pub struct InterventionProposal {
    intervention_id: Uuid,
    moment_id: Moment,
    agent_name: String,
    intervention_type: InterventionKind,
    urgency: Urgency,
    confidence: f64,
    payload: Payload,
    signals_supporting: Vec<String>,
    cooldown_seconds: u32,
    timestamp: f64,
}

impl InterventionProposal {
    pub fn builder(
        moment: Moment,
        agent_name: impl Into<String>,
        kind: InterventionKind,
    ) -> ProposalBuilder {
        ProposalBuilder {
            moment,
            agent_name: agent_name.into(),
            kind,
            urgency: Urgency::default(),
            confidence: 0.0,
            payload: Payload::new(),
            signals_supporting: Vec::new(),
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
            timestamp: 0.0,
        }
    }

    pub fn intervention_id(&self) -> Uuid {
        self.intervention_id
    }
    pub fn moment_id(&self) -> Moment {
        self.moment_id
    }
    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }
    pub fn intervention_type(&self) -> InterventionKind {
        self.intervention_type
    }
    pub fn urgency(&self) -> Urgency {
        self.urgency
    }
    pub fn confidence(&self) -> f64 {
        self.confidence
    }
    pub fn payload(&self) -> &Payload {
        &self.payload
    }
    pub fn signals_supporting(&self) -> &[String] {
        &self.signals_supporting
    }
    pub fn cooldown_seconds(&self) -> u32 {
        self.cooldown_seconds
    }
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    fn validate(&self) -> Result<()> {
        if self.agent_name.trim().is_empty() {
            return Err(Error::invalid_proposal("agent_name", "must not be empty"));
        }
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(Error::invalid_proposal(
                "confidence",
                format!("{} is outside [0, 1]", self.confidence),
            ));
        }
        if !self.timestamp.is_finite() || self.timestamp < 0.0 {
            return Err(Error::invalid_proposal(
                "timestamp",
                format!("{} is not a valid time", self.timestamp),
            ));
        }
        Ok(())
    }
}

/// Builder returned by [`InterventionProposal::builder`].
#[derive(Clone, Debug)]
pub struct ProposalBuilder {
    moment: Moment,
    agent_name: String,
    kind: InterventionKind,
    urgency: Urgency,
    confidence: f64,
    payload: Payload,
    signals_supporting: Vec<String>,
    cooldown_seconds: u32,
    timestamp: f64,
}

impl ProposalBuilder {
    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Merge the entries of a JSON object into the payload. Non-object values are ignored.
    pub fn payload(mut self, payload: serde_json::Value) -> Self {
        if let serde_json::Value::Object(map) = payload {
            self.payload.extend(map);
        }
        self
    }

    pub fn signal(mut self, name: impl Into<String>) -> Self {
        self.signals_supporting.push(name.into());
        self
    }

    pub fn signals<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.signals_supporting
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn cooldown_seconds(mut self, seconds: u32) -> Self {
        self.cooldown_seconds = seconds;
        self
    }

    pub fn timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn build(self) -> Result<InterventionProposal> {
        let proposal = InterventionProposal {
            intervention_id: Uuid::new_v4(),
            moment_id: self.moment,
            agent_name: self.agent_name,
            intervention_type: self.kind,
            urgency: self.urgency,
            confidence: self.confidence,
            payload: self.payload,
            signals_supporting: self.signals_supporting,
            cooldown_seconds: self.cooldown_seconds,
            timestamp: self.timestamp,
        };
        proposal.validate()?;
        Ok(proposal)
    }
}

/// Wire shape accepted on deserialization, validated before becoming a proposal.
#[derive(Deserialize)]
struct ProposalRecord {
    #[serde(default = "Uuid::new_v4")]
    intervention_id: Uuid,
    moment_id: Moment,
    agent_name: String,
    intervention_type: InterventionKind,
    #[serde(default)]
    urgency: Urgency,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    payload: Payload,
    #[serde(default)]
    signals_supporting: Vec<String>,
    #[serde(default = "default_cooldown")]
    cooldown_seconds: u32,
    #[serde(default)]
    timestamp: f64,
}

fn default_cooldown() -> u32 {
    DEFAULT_COOLDOWN_SECONDS
}

impl TryFrom<ProposalRecord> for InterventionProposal {
    type Error = Error;

    fn try_from(record: ProposalRecord) -> Result<Self> {
        let proposal = InterventionProposal {
            intervention_id: record.intervention_id,
            moment_id: record.moment_id,
            agent_name: record.agent_name,
            intervention_type: record.intervention_type,
            urgency: record.urgency,
            confidence: record.confidence,
            payload: record.payload,
            signals_supporting: record.signals_supporting,
            cooldown_seconds: record.cooldown_seconds,
            timestamp: record.timestamp,
        };
        proposal.validate()?;
        Ok(proposal)
    }
}

/// What one agent concluded about one snapshot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AgentEvaluation {
    pub agent_name: String,
    /// May be non-empty with no interventions, e.g. detected while cooling down.
    pub detected_moments: Vec<Moment>,
    pub interventions: Vec<InterventionProposal>,
    pub confidence: f64,
    /// Diagnostic only.
    pub reasoning: String,
}

impl AgentEvaluation {
    /// Nothing detected, nothing proposed.
    pub fn no_action(agent_name: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            detected_moments: Vec::new(),
            interventions: Vec::new(),
            confidence: 0.0,
            reasoning: reasoning.into(),
        }
    }

    /// Moments detected but suppressed by the agent's own guard.
    pub fn suppressed(
        agent_name: impl Into<String>,
        moments: Vec<Moment>,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            detected_moments: moments,
            interventions: Vec::new(),
            confidence,
            reasoning: reasoning.into(),
        }
    }

    pub fn proposing(
        agent_name: impl Into<String>,
        moments: Vec<Moment>,
        interventions: Vec<InterventionProposal>,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            detected_moments: moments,
            interventions,
            confidence,
            reasoning: reasoning.into(),
        }
    }

    /// Zero-confidence stand-in for an agent whose evaluation failed.
    pub fn failed(agent_name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::no_action(agent_name, format!("Error: {}", reason))
    }

    pub fn has_interventions(&self) -> bool {
        !self.interventions.is_empty()
    }
}
