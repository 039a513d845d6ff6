//! Overload agent (M02): simplify a phrase the NLP layer flags as too complex

use crate::state::AgentMemory;
use crate::registry::Agent;
use neurofusion_core::config::OverloadConfig;
use neurofusion_core::{
    AgentEvaluation, FusionSnapshot, InterventionKind, InterventionProposal, Moment, ResponseTimeTrend,
    Result, Urgency,
};
use serde_json::json;
use std::collections::HashMap;

const MOMENTS: [Moment; 1] = [Moment::CognitiveOverload];

pub struct OverloadAgent {
    config: OverloadConfig,
    memory: AgentMemory,
    /// phrase -> timestamp of its last simplification
    simplified_at: HashMap<String, f64>,
}

impl OverloadAgent {
    pub const NAME: &'static str = "overload_agent";

    pub fn new(config: OverloadConfig) -> Self {
        Self { config, memory: AgentMemory::new(), simplified_at: HashMap::new() }
    }

    /// Phrases still inside their suppression window.
    pub fn tracked_phrases(&self) -> usize {
        self.simplified_at.len()
    }

    fn phrase_on_cooldown(&self, phrase: &str, now: f64) -> bool {
        self.simplified_at
            .get(phrase)
            .is_some_and(|last| now - last < f64::from(self.config.phrase_cooldown_secs))
    }
}

impl Default for OverloadAgent {
    fn default() -> Self { Self::new(OverloadConfig::default()) }
}

#[async_trait::async_trait]
impl Agent for OverloadAgent {
    fn name(&self) -> &str { Self::NAME }

    fn monitored_moments(&self) -> &[Moment] { &MOMENTS }

    fn detection_count(&self) -> u32 { self.memory.detection_count() }

    async fn evaluate(&mut self, snapshot: &FusionSnapshot) -> Result<AgentEvaluation> {
        let nlp = match &snapshot.nlp {
            Some(n) if n.overload_detected => n,
            _ => return Ok(AgentEvaluation::no_action(Self::NAME, "No overload detected by NLP")),
        };

        let Some(phrase) = nlp.target_simplification_phrase.as_deref() else {
            return Ok(AgentEvaluation::suppressed(
                Self::NAME,
                vec![Moment::CognitiveOverload],
                0.6,
                "Overload detected but no target phrase identified",
            ));
        };

        if self.phrase_on_cooldown(phrase, snapshot.timestamp) {
            return Ok(AgentEvaluation::suppressed(
                Self::NAME,
                vec![Moment::CognitiveOverload],
                0.7,
                format!("Phrase '{}' already simplified recently", phrase),
            ));
        }

        let mut confidence = self.config.base_confidence;
        let mut signals = vec!["nlp_complexity_high"];

        if snapshot.behavioral.response_time_trend == ResponseTimeTrend::Increasing {
            confidence += self.config.boost;
            signals.push("response_time_increasing");
        }
        if snapshot
            .webcam
            .as_ref()
            .is_some_and(|w| w.frustration_boost > self.config.webcam_tension_threshold)
        {
            confidence += self.config.boost;
            signals.push("webcam_tension");
        }
        let confidence = confidence.min(1.0);

        // Cooldown lives in the agent, keyed by phrase.
        let proposal = InterventionProposal::builder(Moment::CognitiveOverload, Self::NAME, InterventionKind::SimplifyPhrase)
            .urgency(Urgency::Medium)
            .confidence(confidence)
            .payload(json!({
                "original_phrase": phrase,
                "complexity_score": nlp.max_complexity_score,
            }))
            .signals(signals)
            .cooldown_seconds(0)
            .timestamp(snapshot.timestamp)
            .build()?;

        let window = f64::from(self.config.phrase_cooldown_secs);
        let now = snapshot.timestamp;
        self.simplified_at.retain(|_, last| now - *last < window);
        self.simplified_at.insert(phrase.to_string(), now);
        self.memory.record_detection(snapshot.timestamp);

        Ok(AgentEvaluation::proposing(
            Self::NAME,
            vec![Moment::CognitiveOverload],
            vec![proposal],
            confidence,
            format!("Complexity {:.2} for: {}", nlp.max_complexity_score, phrase),
        ))
    }
}
