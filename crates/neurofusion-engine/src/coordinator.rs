//! Fusion coordinator: one instance per session, one call per cycle
//!
//! Pipeline: snapshot -> graph -> cooldown filter -> conflict resolver ->
//! prioritizer -> cooldown update -> fired log.
//!
//! Cycle state sits behind an async mutex, so overlapping calls on one
//! coordinator queue up instead of interleaving. Nothing is written until the
//! graph has returned, which means a cycle dropped at the graph await leaves
//! cooldowns, the fired log and the counter exactly as they were.

use crate::audit::CycleReport;
use crate::clock::{Clock, SystemClock};
use crate::conflict::{ConflictResolver, ConflictTable};
use crate::cooldown::CooldownTracker;
use crate::graph::FusionGraph;
use crate::prioritizer::Prioritizer;
use neurofusion_agents::{create_default_registry, AgentRegistry};
use neurofusion_core::config::CycleConfig;
use neurofusion_core::{FusionConfig, FusionSnapshot, InterventionProposal, Moment, Result, SignalFrame};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Default)]
struct CycleState {
    cycle_count: u64,
    cooldowns: CooldownTracker,
    /// (fired_at, moment), oldest first. The window edge is inclusive.
    fired: VecDeque<(f64, Moment)>,
}

impl CycleState {
    fn recent(&self, now: f64, window: f64) -> Vec<Moment> {
        self.fired
            .iter()
            .filter(|(at, _)| now - at <= window)
            .map(|(_, m)| *m)
            .collect()
    }

    fn prune(&mut self, now: f64, window: f64) {
        self.fired.retain(|(at, _)| now - at <= window);
    }
}

pub struct FusionCoordinator {
    graph: FusionGraph,
    resolver: ConflictResolver,
    prioritizer: Prioritizer,
    config: CycleConfig,
    clock: Arc<dyn Clock>,
    audit: Option<mpsc::Sender<CycleReport>>,
    state: Mutex<CycleState>,
}

impl FusionCoordinator {
    /// Coordinator over the eight default agents.
    pub fn new(config: &FusionConfig) -> Result<Self> {
        Self::with_registry(config, create_default_registry(config))
    }

    pub fn with_registry(config: &FusionConfig, registry: AgentRegistry) -> Result<Self> {
        config.validate()?;
        let table = ConflictTable::from_config(config)?;
        info!("Fusion coordinator initialised with {} agents", registry.len());
        Ok(Self {
            graph: FusionGraph::new(registry),
            resolver: ConflictResolver::new(table.clone()),
            prioritizer: Prioritizer::new(table, config.cycle.max_interventions),
            config: config.cycle.clone(),
            clock: Arc::new(SystemClock),
            audit: None,
            state: Mutex::new(CycleState::default()),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Push a [`CycleReport`] per cycle. Reports are dropped when the channel is full.
    pub fn with_audit(mut self, sender: mpsc::Sender<CycleReport>) -> Self {
        self.audit = Some(sender);
        self
    }

    pub fn agent_names(&self) -> &[String] {
        self.graph.agent_names()
    }

    pub async fn process_cycle(
        &self,
        session_id: &str,
        student_id: &str,
        frame: SignalFrame,
    ) -> Vec<InterventionProposal> {
        let mut state = self.state.lock().await;
        let started = Instant::now();
        let now = self.clock.now();
        let window = self.config.recent_window_secs;
        let cycle_number = state.cycle_count + 1;

        let snapshot = FusionSnapshot::from_frame(
            session_id,
            student_id,
            now,
            cycle_number,
            frame,
            state.recent(now, window),
        );

        let run = self.graph.run(snapshot).await;
        let snapshot = run.snapshot;

        // Commit point: everything below is synchronous.
        state.cycle_count = cycle_number;
        state.prune(now, window);

        let proposed = snapshot.proposed_interventions.len();
        let available = state.cooldowns.filter(snapshot.proposed_interventions.clone(), now);
        let available_count = available.len();
        let compatible = self.resolver.resolve(available);
        let compatible_count = compatible.len();
        let selected = self.prioritizer.prioritize(compatible);

        state.cooldowns.update_from_fired(&selected);
        state.fired.extend(selected.iter().map(|p| (now, p.moment_id())));
        drop(state);

        let elapsed = started.elapsed();
        info!(
            cycle = cycle_number,
            proposed,
            available = available_count,
            compatible = compatible_count,
            selected = selected.len(),
            "Fusion cycle complete"
        );
        if elapsed.as_millis() > u128::from(self.config.latency_ceiling_ms) {
            warn!(
                cycle = cycle_number,
                elapsed_ms = elapsed.as_millis() as u64,
                ceiling_ms = self.config.latency_ceiling_ms,
                "Fusion cycle exceeded latency ceiling"
            );
        }

        if let Some(sender) = &self.audit {
            let report = CycleReport {
                session_id: snapshot.session_id,
                student_id: snapshot.student_id,
                cycle_number,
                timestamp: now,
                proposed,
                available: available_count,
                compatible: compatible_count,
                selected: selected.clone(),
                agent_states: snapshot.agent_states,
                elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            };
            match sender.try_send(report) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => warn!(cycle = cycle_number, "Audit channel full, report dropped"),
                Err(TrySendError::Closed(_)) => warn!(cycle = cycle_number, "Audit channel closed, report dropped"),
            }
        }

        selected
    }

    pub async fn cycle_count(&self) -> u64 {
        self.state.lock().await.cycle_count
    }

    /// Active cooldown windows as (moment, expiry), ordered by moment.
    pub async fn cooldown_snapshot(&self) -> Vec<(Moment, f64)> {
        self.state.lock().await.cooldowns.snapshot()
    }

    /// Moments fired within the recent window as of `now`, oldest first.
    pub async fn recent_interventions(&self, now: f64) -> Vec<Moment> {
        self.state.lock().await.recent(now, self.config.recent_window_secs)
    }
}
