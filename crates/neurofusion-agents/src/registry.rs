//! The Agent contract and the ordered collection the fusion graph runs
//!
//! Registration order is evaluation-merge order, so it is part of the
//! engine's observable output.

use neurofusion_core::{AgentEvaluation, FusionSnapshot, Moment, Result};

/// A detector evaluated once per cycle. Implement this to add a new agent.
///
/// An agent reads one snapshot and may update only its own private memory.
/// Evaluation must be pure computation over the snapshot: no I/O, no blocking.
#[async_trait::async_trait]
pub trait Agent: Send {
    /// Unique agent name (e.g. "fatigue_agent").
    fn name(&self) -> &str;

    /// Moments this agent can report.
    fn monitored_moments(&self) -> &[Moment];

    /// Number of fires this session.
    fn detection_count(&self) -> u32;

    /// Evaluate one snapshot.
    async fn evaluate(&mut self, snapshot: &FusionSnapshot) -> Result<AgentEvaluation>;
}

/// Agents in registration order.
pub struct AgentRegistry {
    agents: Vec<Box<dyn Agent>>,
}

impl Default for AgentRegistry {
    fn default() -> Self { Self::new() }
}

impl AgentRegistry {
    pub fn new() -> Self { Self { agents: Vec::new() } }

    /// Register an agent. Replaces any existing agent with the same name, keeping its slot.
    pub fn register(&mut self, agent: impl Agent + 'static) {
        self.register_boxed(Box::new(agent));
    }

    pub fn register_boxed(&mut self, agent: Box<dyn Agent>) {
        match self.agents.iter().position(|a| a.name() == agent.name()) {
            Some(idx) => {
                tracing::debug!("Replacing agent {}", agent.name());
                self.agents[idx] = agent;
            }
            None => self.agents.push(agent),
        }
    }

    /// Remove an agent by name.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.agents.len();
        self.agents.retain(|a| a.name() != name);
        self.agents.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.agents.iter().any(|a| a.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.name()).collect()
    }

    pub fn len(&self) -> usize { self.agents.len() }

    pub fn is_empty(&self) -> bool { self.agents.is_empty() }

    pub fn into_agents(self) -> Vec<Box<dyn Agent>> { self.agents }
}
