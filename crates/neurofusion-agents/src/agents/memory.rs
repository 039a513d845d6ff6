//! Memory agent (M16): consolidate when too many concepts sit unconfirmed

use crate::state::AgentMemory;
use crate::registry::Agent;
use neurofusion_core::config::MemoryConfig;
use neurofusion_core::{
    AgentEvaluation, FusionSnapshot, InterventionKind, InterventionProposal, Moment, Result, Urgency,
};
use serde_json::json;

const MOMENTS: [Moment; 1] = [Moment::WorkingMemoryOverflow];

/// Fires every cycle while the overflow flag holds; the cooldown tracker does not apply.
pub struct MemoryAgent {
    config: MemoryConfig,
    memory: AgentMemory,
}

impl MemoryAgent {
    pub const NAME: &'static str = "memory_agent";

    pub fn new(config: MemoryConfig) -> Self {
        Self { config, memory: AgentMemory::new() }
    }
}

impl Default for MemoryAgent {
    fn default() -> Self { Self::new(MemoryConfig::default()) }
}

#[async_trait::async_trait]
impl Agent for MemoryAgent {
    fn name(&self) -> &str { Self::NAME }

    fn monitored_moments(&self) -> &[Moment] { &MOMENTS }

    fn detection_count(&self) -> u32 { self.memory.detection_count() }

    async fn evaluate(&mut self, snapshot: &FusionSnapshot) -> Result<AgentEvaluation> {
        let nlp = match &snapshot.nlp {
            Some(n) if n.overflow_risk => n,
            _ => return Ok(AgentEvaluation::no_action(Self::NAME, "No chunk overflow risk")),
        };

        let review: Vec<&String> = nlp
            .concepts_to_review
            .iter()
            .take(self.config.max_concepts_listed)
            .collect();

        let proposal = InterventionProposal::builder(Moment::WorkingMemoryOverflow, Self::NAME, InterventionKind::CheckpointConcepts)
            .urgency(Urgency::High)
            .confidence(0.85)
            .payload(json!({
                "unconfirmed_count": nlp.unconfirmed_count,
                "concepts_to_review": review,
                "message": format!(
                    "Let's consolidate these {} concepts before adding more.",
                    nlp.unconfirmed_count
                ),
            }))
            .signal("nlp_chunk_overflow")
            .cooldown_seconds(0)
            .timestamp(snapshot.timestamp)
            .build()?;

        self.memory.record_detection(snapshot.timestamp);

        Ok(AgentEvaluation::proposing(
            Self::NAME,
            vec![Moment::WorkingMemoryOverflow],
            vec![proposal],
            0.85,
            format!("Working memory overflow: {} unconfirmed", nlp.unconfirmed_count),
        ))
    }
}
