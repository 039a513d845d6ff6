//! Plateau agent (M22): switch teaching method after repeated failures on one concept

use crate::state::AgentMemory;
use crate::registry::Agent;
use neurofusion_core::config::PlateauConfig;
use neurofusion_core::{
    AgentEvaluation, FusionSnapshot, InterventionKind, InterventionProposal, Moment, Result, Urgency,
};
use serde_json::json;
use std::collections::HashSet;

const MOMENTS: [Moment; 1] = [Moment::PlateauEscape];

pub struct PlateauAgent {
    config: PlateauConfig,
    memory: AgentMemory,
    switched: HashSet<String>,
}

impl PlateauAgent {
    pub const NAME: &'static str = "plateau_agent";

    pub fn new(config: PlateauConfig) -> Self {
        Self { config, memory: AgentMemory::new(), switched: HashSet::new() }
    }
}

impl Default for PlateauAgent {
    fn default() -> Self { Self::new(PlateauConfig::default()) }
}

#[async_trait::async_trait]
impl Agent for PlateauAgent {
    fn name(&self) -> &str { Self::NAME }

    fn monitored_moments(&self) -> &[Moment] { &MOMENTS }

    fn detection_count(&self) -> u32 { self.memory.detection_count() }

    async fn evaluate(&mut self, snapshot: &FusionSnapshot) -> Result<AgentEvaluation> {
        if !snapshot.knowledge.plateau_detected {
            return Ok(AgentEvaluation::no_action(Self::NAME, "No plateau detected"));
        }

        let concept_id = snapshot
            .knowledge
            .plateau_concept_id
            .as_deref()
            .unwrap_or("unknown");

        if self.switched.contains(concept_id) {
            return Ok(AgentEvaluation::suppressed(
                Self::NAME,
                vec![Moment::PlateauEscape],
                0.70,
                format!("Plateau on {} but method already switched", concept_id),
            ));
        }

        let proposal = InterventionProposal::builder(Moment::PlateauEscape, Self::NAME, InterventionKind::MethodOverhaul)
            .urgency(Urgency::High)
            .confidence(self.config.confidence)
            .payload(json!({
                "concept_id": concept_id,
                "new_method": self.config.replacement_method,
                "message": "Let's try a completely different approach.",
                "abandon_current_method": true,
            }))
            .signal("graph_plateau_3_failures")
            .cooldown_seconds(0)
            .timestamp(snapshot.timestamp)
            .build()?;

        self.switched.insert(concept_id.to_string());
        self.memory.record_detection(snapshot.timestamp);

        Ok(AgentEvaluation::proposing(
            Self::NAME,
            vec![Moment::PlateauEscape],
            vec![proposal],
            self.config.confidence,
            format!("Plateau on {} — switching method", concept_id),
        ))
    }
}
