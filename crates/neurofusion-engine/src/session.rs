//! Orchestrators keyed by session id

use crate::clock::{Clock, SystemClock};
use crate::orchestrator::LessonOrchestrator;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use neurofusion_core::{FusionConfig, Result};
use std::sync::Arc;
use tracing::info;

pub struct SessionRegistry {
    sessions: DashMap<String, Arc<LessonOrchestrator>>,
    config: FusionConfig,
    clock: Arc<dyn Clock>,
}

impl SessionRegistry {
    pub fn new(config: FusionConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: FusionConfig, clock: Arc<dyn Clock>) -> Self {
        Self { sessions: DashMap::new(), config, clock }
    }

    /// Existing orchestrator for `session_id`, or a fresh one with its own agents.
    pub fn get_or_create(&self, session_id: &str, student_id: &str) -> Result<Arc<LessonOrchestrator>> {
        if let Some(existing) = self.sessions.get(session_id) {
            return Ok(Arc::clone(existing.value()));
        }
        match self.sessions.entry(session_id.to_string()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let orchestrator = Arc::new(LessonOrchestrator::with_clock(
                    session_id,
                    student_id,
                    &self.config,
                    Arc::clone(&self.clock),
                )?);
                entry.insert(Arc::clone(&orchestrator));
                info!(session = %session_id, student = %student_id, "Session created");
                Ok(orchestrator)
            }
        }
    }

    pub fn get(&self, session_id: &str) -> Option<Arc<LessonOrchestrator>> {
        self.sessions.get(session_id).map(|s| Arc::clone(s.value()))
    }

    pub fn remove(&self, session_id: &str) -> Option<Arc<LessonOrchestrator>> {
        self.sessions.remove(session_id).map(|(_, s)| s)
    }

    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
