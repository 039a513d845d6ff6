//! Attention agent (M01): pause the video when gaze leaves the screen

use crate::state::AgentMemory;
use crate::registry::Agent;
use neurofusion_core::config::AttentionConfig;
use neurofusion_core::{
    AgentEvaluation, FusionSnapshot, InterventionKind, InterventionProposal, Moment, Result, Urgency,
};
use serde_json::json;

const MOMENTS: [Moment; 1] = [Moment::AttentionDrop];

pub struct AttentionAgent {
    config: AttentionConfig,
    memory: AgentMemory,
}

impl AttentionAgent {
    pub const NAME: &'static str = "attention_agent";

    pub fn new(config: AttentionConfig) -> Self {
        Self { config, memory: AgentMemory::new() }
    }
}

impl Default for AttentionAgent {
    fn default() -> Self { Self::new(AttentionConfig::default()) }
}

#[async_trait::async_trait]
impl Agent for AttentionAgent {
    fn name(&self) -> &str { Self::NAME }

    fn monitored_moments(&self) -> &[Moment] { &MOMENTS }

    fn detection_count(&self) -> u32 { self.memory.detection_count() }

    async fn evaluate(&mut self, snapshot: &FusionSnapshot) -> Result<AgentEvaluation> {
        let webcam = match &snapshot.webcam {
            Some(w) if w.face_detected => w,
            _ => {
                return Ok(AgentEvaluation::no_action(
                    Self::NAME,
                    "Webcam unavailable — cannot monitor attention",
                ))
            }
        };

        if !webcam.off_screen_triggered || webcam.off_screen_duration_ms < self.config.min_off_screen_ms {
            return Ok(AgentEvaluation::no_action(Self::NAME, "Student gaze on screen — attention OK"));
        }

        if self.memory.is_on_cooldown(snapshot.timestamp, self.config.cooldown_secs) {
            return Ok(AgentEvaluation::suppressed(
                Self::NAME,
                vec![Moment::AttentionDrop],
                0.7,
                "Attention drop detected but on cooldown",
            ));
        }

        let proposal = InterventionProposal::builder(Moment::AttentionDrop, Self::NAME, InterventionKind::PauseVideo)
            .urgency(Urgency::High)
            .confidence(self.config.confidence)
            .payload(json!({
                "off_screen_duration_ms": webcam.off_screen_duration_ms,
                "message": "Ready to continue?",
                "resume_from_ms": snapshot.lesson_position_ms,
            }))
            .signal("webcam_gaze_off_screen")
            .cooldown_seconds(self.config.cooldown_secs)
            .timestamp(snapshot.timestamp)
            .build()?;

        self.memory.record_detection(snapshot.timestamp);

        Ok(AgentEvaluation::proposing(
            Self::NAME,
            vec![Moment::AttentionDrop],
            vec![proposal],
            self.config.confidence,
            format!("Gaze off-screen for {:.0} ms", webcam.off_screen_duration_ms),
        ))
    }
}
