//! Lesson-level entry point: one orchestrator per playback session

use crate::clock::{Clock, SystemClock};
use crate::coordinator::FusionCoordinator;
use neurofusion_core::{
    BehavioralSignals, FusionConfig, InterventionProposal, KnowledgeSignals, NlpSignals, Result,
    SignalFrame, WebcamSignals,
};
use std::sync::Arc;
use tracing::info;

/// Call [`LessonOrchestrator::run_lesson_cycle`] every cycle interval during playback.
pub struct LessonOrchestrator {
    session_id: String,
    student_id: String,
    started_at: f64,
    clock: Arc<dyn Clock>,
    coordinator: FusionCoordinator,
}

impl LessonOrchestrator {
    pub fn new(session_id: impl Into<String>, student_id: impl Into<String>, config: &FusionConfig) -> Result<Self> {
        Self::with_clock(session_id, student_id, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        session_id: impl Into<String>,
        student_id: impl Into<String>,
        config: &FusionConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let coordinator = FusionCoordinator::new(config)?.with_clock(Arc::clone(&clock));
        let session_id = session_id.into();
        info!(
            session = %session_id,
            agents = coordinator.agent_names().len(),
            "Lesson orchestrator initialised"
        );
        Ok(Self {
            session_id,
            student_id: student_id.into(),
            started_at: clock.now(),
            clock,
            coordinator,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn coordinator(&self) -> &FusionCoordinator {
        &self.coordinator
    }

    /// Minutes since this orchestrator was created.
    pub fn session_minutes(&self) -> f64 {
        (self.clock.now() - self.started_at) / 60.0
    }

    /// One lesson-loop iteration. Absent behavioral signals count as neutral.
    pub async fn run_lesson_cycle(
        &self,
        behavioral: Option<BehavioralSignals>,
        webcam: Option<WebcamSignals>,
        knowledge: Option<KnowledgeSignals>,
        nlp: Option<NlpSignals>,
        lesson_position_ms: f64,
    ) -> Vec<InterventionProposal> {
        let frame = SignalFrame {
            behavioral: behavioral.unwrap_or_default(),
            webcam,
            knowledge,
            nlp,
            lesson_position_ms,
            session_duration_minutes: self.session_minutes(),
        };
        self.coordinator
            .process_cycle(&self.session_id, &self.student_id, frame)
            .await
    }
}
