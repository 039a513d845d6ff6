//! Per-cycle audit record pushed to an optional external sink

use neurofusion_core::{AgentState, InterventionProposal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleReport {
    pub session_id: String,
    pub student_id: String,
    pub cycle_number: u64,
    pub timestamp: f64,
    /// Proposals returned by the graph.
    pub proposed: usize,
    /// Left after the cooldown filter.
    pub available: usize,
    /// Left after conflict resolution.
    pub compatible: usize,
    pub selected: Vec<InterventionProposal>,
    pub agent_states: BTreeMap<String, AgentState>,
    pub elapsed_ms: f64,
}

impl CycleReport {
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
