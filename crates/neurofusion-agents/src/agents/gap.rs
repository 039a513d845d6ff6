//! Gap agent (M03): explain prerequisite concepts the knowledge graph reports missing

use crate::state::AgentMemory;
use crate::registry::Agent;
use neurofusion_core::config::GapConfig;
use neurofusion_core::{
    AgentEvaluation, FusionSnapshot, InterventionKind, InterventionProposal, Moment, Result, Urgency,
};
use serde_json::json;
use std::collections::HashSet;

const MOMENTS: [Moment; 1] = [Moment::KnowledgeGap];

pub struct GapAgent {
    config: GapConfig,
    memory: AgentMemory,
    explained: HashSet<String>,
}

impl GapAgent {
    pub const NAME: &'static str = "gap_agent";

    pub fn new(config: GapConfig) -> Self {
        Self { config, memory: AgentMemory::new(), explained: HashSet::new() }
    }

    pub fn is_explained(&self, concept_id: &str) -> bool {
        self.explained.contains(concept_id)
    }
}

impl Default for GapAgent {
    fn default() -> Self { Self::new(GapConfig::default()) }
}

#[async_trait::async_trait]
impl Agent for GapAgent {
    fn name(&self) -> &str { Self::NAME }

    fn monitored_moments(&self) -> &[Moment] { &MOMENTS }

    fn detection_count(&self) -> u32 { self.memory.detection_count() }

    async fn evaluate(&mut self, snapshot: &FusionSnapshot) -> Result<AgentEvaluation> {
        if snapshot.knowledge.gaps_pending.is_empty() {
            return Ok(AgentEvaluation::no_action(Self::NAME, "No gaps detected"));
        }

        let mut interventions = Vec::new();
        let mut fresh = Vec::new();

        for concept_id in &snapshot.knowledge.gaps_pending {
            if self.explained.contains(concept_id) {
                continue;
            }
            interventions.push(
                InterventionProposal::builder(Moment::KnowledgeGap, Self::NAME, InterventionKind::ExplainConcept)
                    .urgency(Urgency::High)
                    .confidence(self.config.confidence)
                    .payload(json!({ "concept_id": concept_id, "proactive": true }))
                    .signals(["nlp_entity_detected", "graph_gap_confirmed"])
                    .cooldown_seconds(0)
                    .timestamp(snapshot.timestamp)
                    .build()?,
            );
            self.explained.insert(concept_id.clone());
            fresh.push(concept_id.as_str());
        }

        if interventions.is_empty() {
            return Ok(AgentEvaluation::no_action(Self::NAME, "All gaps already explained"));
        }

        self.memory.record_detection(snapshot.timestamp);

        Ok(AgentEvaluation::proposing(
            Self::NAME,
            vec![Moment::KnowledgeGap; interventions.len()],
            interventions,
            self.config.confidence,
            format!("Detected {} new gaps: {:?}", fresh.len(), fresh),
        ))
    }
}
