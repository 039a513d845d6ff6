//! Misconception agent (M15): clear a known wrong model before contradicting content plays

use crate::state::AgentMemory;
use crate::registry::Agent;
use neurofusion_core::config::MisconceptionConfig;
use neurofusion_core::{
    AgentEvaluation, FusionSnapshot, InterventionKind, InterventionProposal, Moment, Result, Urgency,
};
use serde_json::json;
use std::collections::HashSet;

const MOMENTS: [Moment; 1] = [Moment::Misconception];

pub struct MisconceptionAgent {
    config: MisconceptionConfig,
    memory: AgentMemory,
    cleared: HashSet<String>,
}

impl MisconceptionAgent {
    pub const NAME: &'static str = "misconception_agent";

    pub fn new(config: MisconceptionConfig) -> Self {
        Self { config, memory: AgentMemory::new(), cleared: HashSet::new() }
    }

    pub fn is_cleared(&self, concept_id: &str) -> bool {
        self.cleared.contains(concept_id)
    }
}

impl Default for MisconceptionAgent {
    fn default() -> Self { Self::new(MisconceptionConfig::default()) }
}

#[async_trait::async_trait]
impl Agent for MisconceptionAgent {
    fn name(&self) -> &str { Self::NAME }

    fn monitored_moments(&self) -> &[Moment] { &MOMENTS }

    fn detection_count(&self) -> u32 { self.memory.detection_count() }

    async fn evaluate(&mut self, snapshot: &FusionSnapshot) -> Result<AgentEvaluation> {
        if snapshot.knowledge.misconceptions_pending.is_empty() {
            return Ok(AgentEvaluation::no_action(Self::NAME, "No misconceptions pending"));
        }

        let mut interventions = Vec::new();
        for concept_id in &snapshot.knowledge.misconceptions_pending {
            if !self.cleared.insert(concept_id.clone()) {
                continue;
            }
            interventions.push(
                InterventionProposal::builder(Moment::Misconception, Self::NAME, InterventionKind::ClearMisconception)
                    .urgency(Urgency::High)
                    .confidence(self.config.confidence)
                    .payload(json!({
                        "concept_id": concept_id,
                        "message": "Heads-up: there's a common misconception about this.",
                        "proactive": true,
                    }))
                    .signal("graph_misconception_conflict")
                    .cooldown_seconds(0)
                    .timestamp(snapshot.timestamp)
                    .build()?,
            );
        }

        if interventions.is_empty() {
            return Ok(AgentEvaluation::no_action(Self::NAME, "All misconceptions already cleared"));
        }

        self.memory.record_detection(snapshot.timestamp);

        let count = interventions.len();
        Ok(AgentEvaluation::proposing(
            Self::NAME,
            vec![Moment::Misconception; count],
            interventions,
            self.config.confidence,
            format!("Clearing {} misconceptions", count),
        ))
    }
}
