//! Per-moment cooldown windows
//!
//! Keyed by moment, so two agents proposing the same moment share one window.
//! Only proposals that actually fired start a window.

use neurofusion_core::{InterventionProposal, Moment};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CooldownTracker {
    /// moment -> expiry timestamp
    expiries: BTreeMap<Moment, f64>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the expiry lies strictly after `now`.
    pub fn is_on_cooldown(&self, moment: Moment, now: f64) -> bool {
        self.expiries.get(&moment).is_some_and(|expiry| now < *expiry)
    }

    /// Seconds left on the window, if any.
    pub fn remaining(&self, moment: Moment, now: f64) -> Option<f64> {
        self.expiries
            .get(&moment)
            .map(|expiry| expiry - now)
            .filter(|left| *left > 0.0)
    }

    pub fn set_cooldown(&mut self, moment: Moment, fired_at: f64, cooldown_seconds: u32) {
        self.expiries.insert(moment, fired_at + f64::from(cooldown_seconds));
    }

    /// Drop proposals whose moment is still cooling down.
    pub fn filter(&self, proposals: Vec<InterventionProposal>, now: f64) -> Vec<InterventionProposal> {
        proposals
            .into_iter()
            .filter(|p| match self.remaining(p.moment_id(), now) {
                Some(left) => {
                    debug!(moment = %p.moment_id(), remaining_secs = left, "Skipping proposal on cooldown");
                    false
                }
                None => true,
            })
            .collect()
    }

    /// Start windows for fired proposals that carry a cooldown.
    pub fn update_from_fired(&mut self, fired: &[InterventionProposal]) {
        for p in fired.iter().filter(|p| p.cooldown_seconds() > 0) {
            self.set_cooldown(p.moment_id(), p.timestamp(), p.cooldown_seconds());
        }
    }

    /// Current windows ordered by moment id.
    pub fn snapshot(&self) -> Vec<(Moment, f64)> {
        self.expiries.iter().map(|(m, e)| (*m, *e)).collect()
    }

    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }
}
