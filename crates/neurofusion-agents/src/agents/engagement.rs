//! Engagement agent (M07, M06, M09)
//!
//! One agent owns frustration, boredom and confidence collapse so that at most
//! one of them fires per cycle. Bands are checked in priority order:
//! frustration rescue, then skip-ahead on high mastery, then the knowledge
//! mirror for moderate frustration. A band that matches stops the chain even
//! when its own guard suppresses the proposal.

use crate::state::AgentMemory;
use crate::registry::Agent;
use neurofusion_core::config::EngagementConfig;
use neurofusion_core::{
    AgentEvaluation, FusionSnapshot, InterventionKind, InterventionProposal, Moment, Result, Urgency,
};
use serde_json::json;

const MOMENTS: [Moment; 3] = [Moment::StealthBoredom, Moment::Frustration, Moment::ConfidenceCollapse];

pub struct EngagementAgent {
    config: EngagementConfig,
    /// Cooldown anchor covers the rescue band only.
    memory: AgentMemory,
}

impl EngagementAgent {
    pub const NAME: &'static str = "engagement_agent";

    pub fn new(config: EngagementConfig) -> Self {
        Self { config, memory: AgentMemory::new() }
    }

    fn rescue(&mut self, snapshot: &FusionSnapshot) -> Result<AgentEvaluation> {
        if self.memory.is_on_cooldown(snapshot.timestamp, self.config.rescue_cooldown_secs) {
            return Ok(AgentEvaluation::suppressed(
                Self::NAME,
                vec![Moment::Frustration],
                0.85,
                "Frustration detected but rescue on cooldown",
            ));
        }

        let proposal = InterventionProposal::builder(Moment::Frustration, Self::NAME, InterventionKind::RescueFrustration)
            .urgency(Urgency::Critical)
            .confidence(0.85)
            .payload(json!({
                "frustration_score": snapshot.behavioral.frustration_score,
                "message": "This is genuinely hard — that means you're growing!",
                "method_switch": true,
            }))
            .signals(["behavioral_frustration", "webcam_tension"])
            .cooldown_seconds(self.config.rescue_cooldown_secs)
            .timestamp(snapshot.timestamp)
            .build()?;

        self.memory.record_detection(snapshot.timestamp);
        Ok(Self::fired(Moment::Frustration, proposal))
    }

    fn skip(&mut self, snapshot: &FusionSnapshot) -> Result<AgentEvaluation> {
        let mastery = snapshot.knowledge.current_segment_mastery;
        let webcam_confirms = snapshot
            .webcam
            .as_ref()
            .is_some_and(|w| w.boredom_score > self.config.webcam_boredom);

        if !webcam_confirms && mastery <= self.config.mastery_certain {
            return Ok(AgentEvaluation::no_action(
                Self::NAME,
                format!("Mastery {:.2} high but boredom unconfirmed", mastery),
            ));
        }

        let (confidence, signals) = if webcam_confirms {
            (0.75, vec!["graph_high_mastery", "webcam_boredom"])
        } else {
            (0.65, vec!["graph_high_mastery"])
        };

        let proposal = InterventionProposal::builder(Moment::StealthBoredom, Self::NAME, InterventionKind::SkipToChallenge)
            .urgency(Urgency::Medium)
            .confidence(confidence)
            .payload(json!({
                "segment_mastery": mastery,
                "message": "You already know this! Skip to harder part?",
            }))
            .signals(signals)
            .cooldown_seconds(self.config.skip_cooldown_secs)
            .timestamp(snapshot.timestamp)
            .build()?;

        self.memory.count_detection();
        Ok(Self::fired(Moment::StealthBoredom, proposal))
    }

    fn mirror(&mut self, snapshot: &FusionSnapshot) -> Result<AgentEvaluation> {
        let mastery_count = (snapshot.knowledge.current_segment_mastery * 10.0).floor() as i64;

        let proposal = InterventionProposal::builder(Moment::ConfidenceCollapse, Self::NAME, InterventionKind::ShowKnowledgeMirror)
            .urgency(Urgency::Medium)
            .confidence(0.70)
            .payload(json!({
                "current_mastery_count": mastery_count,
                "message": "Let's see what you've actually learned so far.",
            }))
            .signal("behavioral_frustration_medium")
            .cooldown_seconds(self.config.mirror_cooldown_secs)
            .timestamp(snapshot.timestamp)
            .build()?;

        self.memory.count_detection();
        Ok(Self::fired(Moment::ConfidenceCollapse, proposal))
    }

    fn fired(moment: Moment, proposal: InterventionProposal) -> AgentEvaluation {
        let confidence = proposal.confidence();
        AgentEvaluation::proposing(
            Self::NAME,
            vec![moment],
            vec![proposal],
            confidence,
            format!("Engagement interventions: [{}]", moment),
        )
    }
}

impl Default for EngagementAgent {
    fn default() -> Self { Self::new(EngagementConfig::default()) }
}

#[async_trait::async_trait]
impl Agent for EngagementAgent {
    fn name(&self) -> &str { Self::NAME }

    fn monitored_moments(&self) -> &[Moment] { &MOMENTS }

    fn detection_count(&self) -> u32 { self.memory.detection_count() }

    async fn evaluate(&mut self, snapshot: &FusionSnapshot) -> Result<AgentEvaluation> {
        let frustration = snapshot.behavioral.frustration_score;
        let mastery = snapshot.knowledge.current_segment_mastery;

        if frustration > self.config.frustration_rescue {
            self.rescue(snapshot)
        } else if mastery > self.config.mastery_boredom {
            self.skip(snapshot)
        } else if frustration > self.config.frustration_mirror {
            self.mirror(snapshot)
        } else {
            Ok(AgentEvaluation::no_action(Self::NAME, "Engagement levels normal"))
        }
    }
}
