//! Fusion graph: fan every agent out over one snapshot, fan the results back in
//!
//! Each agent runs in its own tokio task against a shared, read-only snapshot.
//! Results are merged in registration order. A failing or panicking agent is
//! downgraded to a zero-confidence evaluation and never takes its siblings down.
//!
//! Tasks are detached: if the caller drops `run` mid-flight, agents still finish
//! their evaluation and the results are discarded. The next cycle waits on the
//! agent lock, so an agent never evaluates two snapshots at once.

use futures::future::join_all;
use neurofusion_agents::{Agent, AgentRegistry};
use neurofusion_core::{AgentEvaluation, AgentState, FusionSnapshot};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::task::JoinError;
use tracing::{debug, error};

type SharedAgent = Arc<Mutex<Box<dyn Agent>>>;

/// Output of one graph execution.
#[derive(Debug, Clone)]
pub struct GraphRun {
    /// Input snapshot with `agent_states` and `proposed_interventions` filled in.
    pub snapshot: FusionSnapshot,
    /// One evaluation per agent, in registration order.
    pub evaluations: Vec<AgentEvaluation>,
}

pub struct FusionGraph {
    names: Vec<String>,
    agents: Vec<SharedAgent>,
}

impl FusionGraph {
    pub fn new(registry: AgentRegistry) -> Self {
        let agents: Vec<Box<dyn Agent>> = registry.into_agents();
        let names = agents.iter().map(|a| a.name().to_string()).collect();
        let agents = agents.into_iter().map(|a| Arc::new(Mutex::new(a))).collect();
        Self { names, agents }
    }

    pub fn agent_names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Evaluate every agent and return the merged snapshot.
    pub async fn execute(&self, snapshot: FusionSnapshot) -> FusionSnapshot {
        self.run(snapshot).await.snapshot
    }

    /// Evaluate every agent, keeping the individual evaluations.
    pub async fn run(&self, snapshot: FusionSnapshot) -> GraphRun {
        let started = Instant::now();
        let shared = Arc::new(snapshot);

        let handles: Vec<_> = self
            .agents
            .iter()
            .map(|agent| {
                let agent = Arc::clone(agent);
                let snapshot = Arc::clone(&shared);
                tokio::spawn(async move {
                    let mut agent = agent.lock_owned().await;
                    agent.evaluate(&snapshot).await
                })
            })
            .collect();

        let results = join_all(handles).await;

        let mut evaluations = Vec::with_capacity(results.len());
        for (name, result) in self.names.iter().zip(results) {
            let evaluation = match result {
                Ok(Ok(evaluation)) => evaluation,
                Ok(Err(e)) => {
                    error!(agent = %name, error = %e, "Agent evaluation failed");
                    AgentEvaluation::failed(name.as_str(), e)
                }
                Err(join_error) => {
                    let reason = join_failure(join_error);
                    error!(agent = %name, error = %reason, "Agent task aborted");
                    AgentEvaluation::failed(name.as_str(), reason)
                }
            };
            evaluations.push(evaluation);
        }

        let mut snapshot = Arc::unwrap_or_clone(shared);
        for ((name, agent), evaluation) in self.names.iter().zip(&self.agents).zip(&evaluations) {
            let detection_count = agent.lock().await.detection_count();
            let last_detection_timestamp = if evaluation.has_interventions() {
                snapshot.timestamp
            } else {
                0.0
            };
            snapshot.agent_states.insert(
                name.clone(),
                AgentState {
                    agent_name: name.clone(),
                    last_detection_timestamp,
                    detection_count_session: detection_count,
                    cooldown_until: 0.0,
                    active_moments: evaluation.detected_moments.clone(),
                    confidence: evaluation.confidence,
                },
            );
            snapshot
                .proposed_interventions
                .extend(evaluation.interventions.iter().cloned());
        }

        debug!(
            agents = self.agents.len(),
            proposals = snapshot.proposed_interventions.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Fusion graph executed"
        );

        GraphRun { snapshot, evaluations }
    }
}

fn join_failure(error: JoinError) -> String {
    if !error.is_panic() {
        return "task cancelled".to_string();
    }
    let payload = error.into_panic();
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {}", msg)
    } else {
        "panicked".to_string()
    }
}
