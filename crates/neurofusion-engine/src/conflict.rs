//! Mutually exclusive intervention types and the greedy resolver

use neurofusion_core::{FusionConfig, InterventionKind, InterventionProposal, Result};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::debug;

/// Unordered pairs of intervention kinds that must not fire together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictTable {
    pairs: HashSet<(InterventionKind, InterventionKind)>,
}

impl ConflictTable {
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (InterventionKind, InterventionKind)>,
    {
        let mut table = Self::empty();
        for (a, b) in pairs {
            table.insert(a, b);
        }
        table
    }

    pub fn empty() -> Self {
        Self { pairs: HashSet::new() }
    }

    pub fn from_config(config: &FusionConfig) -> Result<Self> {
        Ok(Self::new(config.conflict_pairs()?))
    }

    pub fn insert(&mut self, a: InterventionKind, b: InterventionKind) {
        self.pairs.insert(normalize(a, b));
    }

    /// Order-independent lookup.
    pub fn conflicts(&self, a: InterventionKind, b: InterventionKind) -> bool {
        self.pairs.contains(&normalize(a, b))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for ConflictTable {
    /// Pause vs break, pause vs skip, break vs checkpoint, skip vs explain.
    fn default() -> Self {
        use InterventionKind::*;
        Self::new([
            (PauseVideo, ForceBreak),
            (PauseVideo, SkipToChallenge),
            (ForceBreak, CheckpointConcepts),
            (SkipToChallenge, ExplainConcept),
        ])
    }
}

fn normalize(a: InterventionKind, b: InterventionKind) -> (InterventionKind, InterventionKind) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Urgency rank descending, then confidence descending.
pub(crate) fn by_priority(a: &InterventionProposal, b: &InterventionProposal) -> Ordering {
    b.urgency()
        .rank()
        .cmp(&a.urgency().rank())
        .then_with(|| b.confidence().total_cmp(&a.confidence()))
}

/// Keeps the highest-priority proposal of every conflicting pair.
#[derive(Debug, Clone)]
pub struct ConflictResolver {
    table: ConflictTable,
}

impl ConflictResolver {
    pub fn new(table: ConflictTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ConflictTable {
        &self.table
    }

    /// Stable priority sort, then greedy keep. Ties keep input order.
    pub fn resolve(&self, mut proposals: Vec<InterventionProposal>) -> Vec<InterventionProposal> {
        proposals.sort_by(by_priority);

        let mut kept: Vec<InterventionProposal> = Vec::with_capacity(proposals.len());
        for proposal in proposals {
            let clash = kept
                .iter()
                .find(|k| self.table.conflicts(k.intervention_type(), proposal.intervention_type()));
            match clash {
                Some(winner) => debug!(
                    dropped = %proposal.intervention_type(),
                    kept = %winner.intervention_type(),
                    "Resolved intervention conflict"
                ),
                None => kept.push(proposal),
            }
        }
        kept
    }
}
