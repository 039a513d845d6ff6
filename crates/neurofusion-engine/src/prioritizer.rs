//! Final selection: at most N proposals, distinct moments, no conflicting pair

use crate::conflict::{by_priority, ConflictTable};
use neurofusion_core::InterventionProposal;

pub const DEFAULT_MAX_INTERVENTIONS: usize = 2;

#[derive(Debug, Clone)]
pub struct Prioritizer {
    table: ConflictTable,
    max_interventions: usize,
}

impl Prioritizer {
    pub fn new(table: ConflictTable, max_interventions: usize) -> Self {
        Self { table, max_interventions }
    }

    pub fn max_interventions(&self) -> usize {
        self.max_interventions
    }

    pub fn prioritize(&self, mut proposals: Vec<InterventionProposal>) -> Vec<InterventionProposal> {
        proposals.sort_by(by_priority);

        let mut selected: Vec<InterventionProposal> = Vec::with_capacity(self.max_interventions);
        for proposal in proposals {
            if selected.len() >= self.max_interventions {
                break;
            }
            // Re-checked here for callers that skip the resolver.
            let conflicts = selected
                .iter()
                .any(|s| self.table.conflicts(s.intervention_type(), proposal.intervention_type()));
            let duplicate = selected.iter().any(|s| s.moment_id() == proposal.moment_id());
            if !conflicts && !duplicate {
                selected.push(proposal);
            }
        }
        selected
    }
}

impl Default for Prioritizer {
    fn default() -> Self {
        Self::new(ConflictTable::default(), DEFAULT_MAX_INTERVENTIONS)
    }
}
