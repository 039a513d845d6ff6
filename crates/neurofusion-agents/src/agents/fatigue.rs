//! Fatigue agent (M10): force a break once fatigue crosses the critical threshold

use crate::state::AgentMemory;
use crate::registry::Agent;
use neurofusion_core::config::FatigueConfig;
use neurofusion_core::{
    AgentEvaluation, FusionSnapshot, InterventionKind, InterventionProposal, Moment, Result, Urgency,
};
use serde_json::json;

const MOMENTS: [Moment; 1] = [Moment::Fatigue];

pub struct FatigueAgent {
    config: FatigueConfig,
    memory: AgentMemory,
}

impl FatigueAgent {
    pub const NAME: &'static str = "fatigue_agent";

    pub fn new(config: FatigueConfig) -> Self {
        Self { config, memory: AgentMemory::new() }
    }
}

impl Default for FatigueAgent {
    fn default() -> Self { Self::new(FatigueConfig::default()) }
}

#[async_trait::async_trait]
impl Agent for FatigueAgent {
    fn name(&self) -> &str { Self::NAME }

    fn monitored_moments(&self) -> &[Moment] { &MOMENTS }

    fn detection_count(&self) -> u32 { self.memory.detection_count() }

    async fn evaluate(&mut self, snapshot: &FusionSnapshot) -> Result<AgentEvaluation> {
        let fatigue = snapshot.behavioral.fatigue_score;
        if fatigue < self.config.threshold {
            return Ok(AgentEvaluation::no_action(
                Self::NAME,
                format!("Fatigue {:.2} below critical", fatigue),
            ));
        }

        if self.memory.is_on_cooldown(snapshot.timestamp, self.config.cooldown_secs) {
            return Ok(AgentEvaluation::suppressed(
                Self::NAME,
                vec![Moment::Fatigue],
                0.80,
                "Fatigue critical but on break cooldown",
            ));
        }

        let proposal = InterventionProposal::builder(Moment::Fatigue, Self::NAME, InterventionKind::ForceBreak)
            .urgency(Urgency::Critical)
            .confidence(0.90)
            .payload(json!({
                "fatigue_score": fatigue,
                "session_duration_minutes": snapshot.session_duration_minutes,
                "break_duration_seconds": self.config.break_duration_secs,
                "message": "Your brain needs a 2-minute break.",
            }))
            .signals([
                "behavioral_variance_erratic",
                "session_duration_long",
                "webcam_fatigue_boost",
            ])
            .cooldown_seconds(self.config.cooldown_secs)
            .timestamp(snapshot.timestamp)
            .build()?;

        self.memory.record_detection(snapshot.timestamp);

        Ok(AgentEvaluation::proposing(
            Self::NAME,
            vec![Moment::Fatigue],
            vec![proposal],
            0.90,
            format!(
                "CRITICAL fatigue {:.2} after {:.1} min",
                fatigue, snapshot.session_duration_minutes
            ),
        ))
    }
}
